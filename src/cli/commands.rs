use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hot_reload::{reload, watch_routes};
use crate::route_table::{parse_method, RouteTable};
use crate::router::{Router, SharedRouter};
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for radix-dispatch
///
/// Inspect route tables and try lookups against them.
#[derive(Parser)]
#[command(name = "radix-dispatch")]
#[command(about = "Radix tree route table tools", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up a request against a route table
    ///
    /// Prints the handler, its id, and captured parameters. Exits with status 1
    /// when no route matches.
    Lookup {
        /// Path to the route table (YAML, TOML, or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method, e.g. GET
        method: String,

        /// Request path, e.g. /users/42
        path: String,
    },
    /// Print the compressed tree for every method
    Tree {
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// List the routes in a table in registration order
    Routes {
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Keep a router live and rebuild it whenever the table changes
    Watch {
        #[arg(short, long)]
        routes: PathBuf,
    },
}

fn load_router(path: &Path, config: RuntimeConfig) -> Result<Router<String>> {
    RouteTable::load(path)?.build_named_router(config)
}

/// Execute a parsed command, writing its output to `out`.
///
/// Returns the process exit status: 0 on success, 1 when a lookup misses.
pub fn run_cli(cli: Cli, config: RuntimeConfig, out: &mut dyn Write) -> Result<u8> {
    match cli.command {
        Commands::Lookup {
            routes,
            method,
            path,
        } => {
            let router = load_router(&routes, config)?;
            let method = parse_method(&method)?;
            let status = match router.lookup(&method, &path) {
                Some(matched) => {
                    writeln!(out, "handler: {}", matched.handler)?;
                    writeln!(out, "handler_id: {}", matched.handler_id)?;
                    for param in &matched.params {
                        writeln!(out, "param: {}={}", param.name, param.value)?;
                    }
                    0
                }
                None => {
                    writeln!(out, "no route for {method} {path}")?;
                    1
                }
            };
            Ok(status)
        }
        Commands::Tree { routes } => {
            let router = load_router(&routes, config)?;
            write!(out, "{}", router.render_tree())?;
            Ok(0)
        }
        Commands::Routes { routes } => {
            let router = load_router(&routes, config)?;
            for route in router.routes() {
                writeln!(
                    out,
                    "{} {} -> #{}",
                    route.method, route.pattern, route.handler_id
                )?;
            }
            Ok(0)
        }
        Commands::Watch { routes } => {
            let shared: Arc<SharedRouter<String>> = Arc::new(SharedRouter::default());
            let count = reload(&routes, &shared, config, |entry| Some(entry.handler.clone()))?;
            writeln!(out, "watching {} ({count} routes)", routes.display())?;
            out.flush()?;

            let _watcher = watch_routes(&routes, Arc::clone(&shared), config, |entry| {
                Some(entry.handler.clone())
            })?;
            loop {
                std::thread::park();
            }
        }
    }
}
