//! Unit tests for CLI commands

use crate::cli::{run_cli, Cli, Commands};
use crate::runtime_config::RuntimeConfig;
use clap::Parser;
use std::io::Write;

const ROUTES_YAML: &str = r#"
routes:
  - method: GET
    path: /users/:id
    handler: get_user
    handler_id: 2
  - method: GET
    path: /static/*
    handler: static_files
"#;

fn routes_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(ROUTES_YAML.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> (u8, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let code = run_cli(cli, RuntimeConfig::default(), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_lookup_command_parses() {
    let cli = Cli::try_parse_from(["radix-dispatch", "lookup", "--routes", "r.yaml", "GET", "/a"])
        .unwrap();

    match cli.command {
        Commands::Lookup {
            routes,
            method,
            path,
        } => {
            assert_eq!(routes.to_string_lossy(), "r.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/a");
        }
        _ => panic!("Expected Lookup command"),
    }
}

#[test]
fn test_lookup_requires_routes() {
    assert!(Cli::try_parse_from(["radix-dispatch", "lookup", "GET", "/a"]).is_err());
}

#[test]
fn test_lookup_prints_match() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();

    let (code, out) = run(&["radix-dispatch", "lookup", "-r", path, "get", "/users/42"]);
    assert_eq!(code, 0);
    assert_eq!(out, "handler: get_user\nhandler_id: 2\nparam: id=42\n");
}

#[test]
fn test_lookup_miss_exits_non_zero() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();

    let (code, out) = run(&["radix-dispatch", "lookup", "-r", path, "GET", "/nope"]);
    assert_eq!(code, 1);
    assert_eq!(out, "no route for GET /nope\n");
}

#[test]
fn test_routes_and_tree_commands() {
    let file = routes_file();
    let path = file.path().to_str().unwrap();

    let (_, routes) = run(&["radix-dispatch", "routes", "--routes", path]);
    assert_eq!(routes, "GET /users/:id -> #2\nGET /static/* -> #0\n");

    let (_, tree) = run(&["radix-dispatch", "tree", "--routes", path]);
    assert!(tree.starts_with("GET\n"));
    assert!(tree.contains("users/ [param]"));
    assert!(tree.contains(":id [static] -> #2"));
    assert!(tree.contains("static/ [wildcard] -> #0"));
}
