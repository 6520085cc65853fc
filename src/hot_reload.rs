//! # Hot Reload Module
//!
//! Live reloading of route tables without restarting the process.
//!
//! ## Overview
//!
//! [`watch_routes`] watches a route table file and, on every modify or create
//! event:
//! 1. **Parse** - the table is loaded again ([`RouteTable::load`])
//! 2. **Build** - a complete new [`Router`] is built off to the side
//! 3. **Publish** - the new router is swapped into the [`SharedRouter`]
//!
//! Requests already holding a snapshot finish on the old router; new requests
//! see the new one. There is no point at which a half-built tree is visible.
//!
//! ## Error Handling
//!
//! If the table fails to load or a handler cannot be resolved the error is
//! logged and the previously published router stays live.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use radix_dispatch::hot_reload::watch_routes;
//! use radix_dispatch::router::SharedRouter;
//! use radix_dispatch::runtime_config::RuntimeConfig;
//! use std::sync::Arc;
//!
//! let shared: Arc<SharedRouter<String>> = Arc::new(SharedRouter::default());
//! let _watcher = watch_routes(
//!     "routes.yaml",
//!     Arc::clone(&shared),
//!     RuntimeConfig::from_env(),
//!     |entry| Some(entry.handler.clone()),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [`Router`]: crate::router::Router

use anyhow::{Context, Result};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::route_table::{RouteEntry, RouteTable};
use crate::router::SharedRouter;
use crate::runtime_config::RuntimeConfig;

/// Load `path`, build a router, and publish it.
///
/// Returns the number of routes now live. On error nothing is published.
pub fn reload<H, F>(
    path: &Path,
    shared: &SharedRouter<H>,
    config: RuntimeConfig,
    resolve: F,
) -> Result<usize>
where
    F: FnMut(&RouteEntry) -> Option<H>,
{
    let table = RouteTable::load(path)?;
    let router = table
        .build_router(config, resolve)
        .with_context(|| format!("failed to build router from {}", path.display()))?;
    let count = router.route_count();
    shared.publish(router);
    Ok(count)
}

/// Watch a route table and republish the router whenever it changes.
///
/// The returned watcher must be kept alive for as long as reloading should
/// continue.
pub fn watch_routes<P, H, F>(
    path: P,
    shared: Arc<SharedRouter<H>>,
    config: RuntimeConfig,
    mut resolve: F,
) -> Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    H: Send + Sync + 'static,
    F: FnMut(&RouteEntry) -> Option<H> + Send + 'static,
{
    let path: PathBuf = path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match reload(&watch_path, &shared, config, &mut resolve) {
                        Ok(count) => info!(
                            path = %watch_path.display(),
                            routes_count = count,
                            "hot-reload: route table applied"
                        ),
                        Err(e) => error!(
                            path = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: keeping previous routes"
                        ),
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )
    .context("failed to create route table watcher")?;

    watcher
        .watch(&path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", path.display()))?;

    info!(path = %path.display(), "hot-reload: watching route table");
    Ok(watcher)
}
