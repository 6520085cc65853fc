//! # Router Module
//!
//! Path matching for HTTP requests using a compressed prefix tree (radix tree)
//! per HTTP method.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (`/users/:id`, `/static/*`) into per-method trees
//! - Matching a method and request path to the registered handler
//! - Extracting path parameters from the matched path
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Construction**: routes are added single-threaded with [`Router::add`]. Nodes
//!    are split and extended in place as shared prefixes are discovered.
//!
//! 2. **Matching**: once built, the router is read-only. [`Router::find`] walks one
//!    tree byte by byte, trying static edges before parameter and catch-all
//!    captures, so `/users/new` wins over `/users/:id` whatever the registration
//!    order.
//!
//! To replace routes while serving, build a new [`Router`] and publish it through
//! a [`SharedRouter`].
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use radix_dispatch::router::{HandlerId, Params, Router};
//!
//! let mut router = Router::new();
//! router.add(Method::GET, "/users/:id", "get_user", HandlerId(0));
//! router.add(Method::GET, "/static/*", "files", HandlerId(1));
//!
//! let mut params = Params::new();
//! let (handler, _) = router.find(&Method::GET, "/users/42", &mut params).unwrap();
//! assert_eq!(*handler, "get_user");
//! assert_eq!(params.get("id"), Some("42"));
//! ```
//!
//! ## Performance
//!
//! - Lookup is O(k) in the path length, independent of the number of routes
//! - `find` performs no heap allocation for routes with ≤8 parameters

mod core;
mod params;
mod radix;
mod shared;

pub use self::core::{RouteInfo, RouteMatch, Router};
pub use params::{Param, Params, CATCH_ALL_KEY, MAX_INLINE_PARAMS};
pub use radix::HandlerId;
pub use shared::SharedRouter;
