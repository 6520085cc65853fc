use http::Method;
use radix_dispatch::hot_reload::{reload, watch_routes};
use radix_dispatch::router::{Params, SharedRouter};
use radix_dispatch::runtime_config::RuntimeConfig;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::temp_files;

const ROUTES_V1: &str = r#"
routes:
  - method: GET
    path: /foo
    handler: foo_one
"#;

const ROUTES_V2: &str = r#"
routes:
  - method: GET
    path: /foo
    handler: foo_two
  - method: GET
    path: /bar/:id
    handler: bar
"#;

fn handler_for(shared: &SharedRouter<String>, path: &str) -> Option<String> {
    let router = shared.load();
    let mut params = Params::new();
    router
        .find(&Method::GET, path, &mut params)
        .map(|(h, _)| h.clone())
}

#[test]
fn test_reload_publishes_new_table() {
    let file = temp_files::create_temp_yaml(ROUTES_V1);
    let path = file.path().to_path_buf();
    let shared: SharedRouter<String> = SharedRouter::default();

    let count = reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();
    assert_eq!(count, 1);
    assert_eq!(handler_for(&shared, "/foo").as_deref(), Some("foo_one"));

    std::fs::write(&path, ROUTES_V2).unwrap();
    let count = reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();
    assert_eq!(count, 2);
    assert_eq!(handler_for(&shared, "/foo").as_deref(), Some("foo_two"));
    assert_eq!(handler_for(&shared, "/bar/1").as_deref(), Some("bar"));
}

#[test]
fn test_failed_reload_keeps_previous_router() {
    let file = temp_files::create_temp_yaml(ROUTES_V1);
    let path = file.path().to_path_buf();
    let shared: SharedRouter<String> = SharedRouter::default();
    reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();

    // Broken file
    std::fs::write(&path, "routes: [ {").unwrap();
    assert!(reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .is_err());
    assert_eq!(handler_for(&shared, "/foo").as_deref(), Some("foo_one"));

    // Valid file, unresolvable handler
    std::fs::write(&path, ROUTES_V2).unwrap();
    assert!(reload(&path, &shared, RuntimeConfig::default(), |e| {
        (e.handler != "bar").then(|| e.handler.clone())
    })
    .is_err());
    assert_eq!(handler_for(&shared, "/foo").as_deref(), Some("foo_one"));
}

#[test]
fn test_snapshot_survives_publish() {
    let file = temp_files::create_temp_yaml(ROUTES_V1);
    let path = file.path().to_path_buf();
    let shared: SharedRouter<String> = SharedRouter::default();
    reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();

    let snapshot = shared.load_full();

    std::fs::write(&path, ROUTES_V2).unwrap();
    reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();

    let mut params = Params::new();
    let (handler, _) = snapshot.find(&Method::GET, "/foo", &mut params).unwrap();
    assert_eq!(handler, "foo_one");
}

#[test]
fn test_watch_routes_reload() {
    let file = temp_files::create_temp_yaml(ROUTES_V1);
    let path = file.path().to_path_buf();
    let shared: Arc<SharedRouter<String>> = Arc::new(SharedRouter::default());
    reload(&path, &shared, RuntimeConfig::default(), |e| {
        Some(e.handler.clone())
    })
    .unwrap();

    let watcher = watch_routes(
        &path,
        Arc::clone(&shared),
        RuntimeConfig::default(),
        |e| Some(e.handler.clone()),
    )
    .expect("watch_routes");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(&path, ROUTES_V2).unwrap();

    // wait for the watcher to publish the new table
    for _ in 0..40 {
        if handler_for(&shared, "/foo").as_deref() == Some("foo_two") {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    assert_eq!(handler_for(&shared, "/foo").as_deref(), Some("foo_two"));
    assert_eq!(handler_for(&shared, "/bar/9").as_deref(), Some("bar"));

    drop(watcher);
}
