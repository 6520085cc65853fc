//! # radix-dispatch
//!
//! A path-matching dispatcher: given an HTTP method and a request path it finds
//! the registered handler, plus any parameters embedded in the path, in time
//! proportional to the path length and independent of the number of routes.
//!
//! ## Overview
//!
//! Routes are compiled into one compressed prefix tree (radix tree) per HTTP
//! method. Patterns mix literal text with two kinds of token:
//!
//! - `:name` matches one path segment (anything up to the next `/`)
//! - `*` matches the whole remainder of the path
//!
//! ```rust
//! use http::Method;
//! use radix_dispatch::router::{HandlerId, Params, Router, CATCH_ALL_KEY};
//!
//! let mut router = Router::new();
//! router.add(Method::GET, "/", "index", HandlerId(0));
//! router.add(Method::GET, "/users/:id", "get_user", HandlerId(0));
//! router.add(Method::GET, "/users/:id/posts", "list_posts", HandlerId(0));
//! router.add(Method::GET, "/static/*", "files", HandlerId(1));
//!
//! let mut params = Params::new();
//! let (handler, id) = router.find(&Method::GET, "/static/css/a.css", &mut params).unwrap();
//! assert_eq!((*handler, id), ("files", HandlerId(1)));
//! assert_eq!(params.get(CATCH_ALL_KEY), Some("css/a.css"));
//!
//! assert!(router.find(&Method::GET, "/unknown", &mut params).is_none());
//! ```
//!
//! ## Architecture
//!
//! - **[`router`]** - the radix tree, [`Router`](router::Router), [`Params`](router::Params),
//!   and lock-free publication via [`SharedRouter`](router::SharedRouter)
//! - **[`route_table`]** - route definitions loaded from YAML, TOML, or JSON
//! - **[`hot_reload`]** - rebuild and republish the router when a table changes
//! - **[`runtime_config`]** - environment-driven settings
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `radix-dispatch` command-line tool
//!
//! ## Concurrency
//!
//! Build a router single-threaded, then share it. Lookups only read the tree,
//! so any number can run in parallel without locking. Each lookup writes into a
//! [`Params`](router::Params) owned by the request.
//!
//! ## What this crate does not do
//!
//! It performs no I/O on the request path, does not run handlers, and has no
//! opinion about not-found handling: a `None` from
//! [`Router::find`](router::Router::find) is the caller's cue to run its own fallback.

pub mod cli;
pub mod hot_reload;
pub mod logging;
pub mod route_table;
pub mod router;
pub mod runtime_config;

pub use router::{HandlerId, Params, RouteMatch, Router, SharedRouter};
