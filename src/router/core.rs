//! Router core module - registration and the lookup hot path.
//!
//! `find` allocates nothing: parameter names and values are borrowed slices
//! stored in a caller-provided [`Params`] buffer.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::params::Params;
use super::radix::{HandlerId, Node, NodeKind};
use crate::runtime_config::RuntimeConfig;

/// A registered route, kept for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    pub pattern: String,
    pub handler_id: HandlerId,
}

/// Result of [`Router::lookup`]
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub handler_id: HandlerId,
    /// Path parameters in traversal order
    pub params: Params<'a>,
}

impl<'a, H> RouteMatch<'a, H> {
    /// Get a path parameter by name (last write wins)
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name)
    }
}

/// Router that matches HTTP requests to handlers using one radix tree per method
///
/// Build it single-threaded with [`Router::add`], then share it read-only
/// (`&Router`, `Arc<Router>`, or a [`SharedRouter`](super::SharedRouter)).
/// Lookups never mutate the tree, so any number may run in parallel.
///
/// # Performance
///
/// - Insertion: O(k) tree descents where k is the pattern length
/// - Lookup: O(k) where k is the path length, independent of the route count
#[derive(Debug, Clone)]
pub struct Router<H> {
    trees: HashMap<Method, Node<H>>,
    routes: Vec<RouteInfo>,
    config: RuntimeConfig,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            trees: HashMap::new(),
            routes: Vec::new(),
            config,
        }
    }

    /// Register a route pattern for `method`
    ///
    /// A pattern is literal text with optional tokens:
    /// - `:name` captures one path segment (up to the next `/`)
    /// - `*` captures the rest of the path under [`CATCH_ALL_KEY`]; anything
    ///   after it in the pattern is ignored
    ///
    /// Registering the same pattern twice replaces the earlier handler.
    /// Patterns are not validated.
    ///
    /// [`CATCH_ALL_KEY`]: super::CATCH_ALL_KEY
    pub fn add(&mut self, method: Method, pattern: &str, handler: H, handler_id: HandlerId) {
        info!(
            method = %method,
            pattern = %pattern,
            handler_id = %handler_id,
            "Registering route"
        );
        self.routes.push(RouteInfo {
            method: method.clone(),
            pattern: pattern.to_owned(),
            handler_id,
        });

        let root = self.trees.entry(method).or_default();
        let bytes = pattern.as_bytes();
        let len = bytes.len();
        let mut i = 0;

        while i < len {
            match bytes[i] {
                b':' => {
                    root.insert(&pattern[..i], NodeKind::Param, None, handler_id);
                    while i < len && bytes[i] != b'/' {
                        i += 1;
                    }
                    if i == len {
                        root.insert(pattern, NodeKind::Static, Some(handler), handler_id);
                        return;
                    }
                    root.insert(&pattern[..i], NodeKind::Static, None, handler_id);
                }
                b'*' => {
                    root.insert(&pattern[..i], NodeKind::Wildcard, Some(handler), handler_id);
                    return;
                }
                _ => {}
            }
            i += 1;
        }

        root.insert(pattern, NodeKind::Static, Some(handler), handler_id);
    }

    /// Match a request path against the tree for `method`
    ///
    /// `params` is cleared and then filled with the captured segments. On
    /// `None` the caller should run its not-found handler; `params` may then
    /// hold partial captures and should be ignored.
    #[inline]
    pub fn find<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
        params: &mut Params<'a>,
    ) -> Option<(&'a H, HandlerId)> {
        params.clear();
        let node = self.trees.get(method)?.find(path, params)?;
        node.handler().map(|h| (h, node.handler_id()))
    }

    /// Convenience wrapper around [`Router::find`] that owns its parameters
    /// and logs the outcome.
    #[must_use]
    pub fn lookup<'a>(&'a self, method: &Method, path: &'a str) -> Option<RouteMatch<'a, H>> {
        let start = Instant::now();
        let mut params = Params::new();
        let result = self.find(method, path, &mut params);
        let elapsed = start.elapsed();

        if elapsed > self.config.slow_lookup {
            warn!(
                method = %method,
                path = %path,
                duration_us = elapsed.as_micros(),
                "Slow route lookup detected"
            );
        }

        match result {
            Some((handler, handler_id)) => {
                debug!(
                    method = %method,
                    path = %path,
                    handler_id = %handler_id,
                    params = ?params,
                    duration_us = elapsed.as_micros(),
                    "Route matched"
                );
                Some(RouteMatch {
                    handler,
                    handler_id,
                    params,
                })
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = elapsed.as_micros(),
                    "No route matched"
                );
                None
            }
        }
    }

    /// Registered routes in registration order (re-registrations included)
    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Methods that have at least one route, sorted by name
    #[must_use]
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.trees.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Render every per-method tree as indented text, methods sorted by name.
    ///
    /// Each line shows a node's prefix, its kind, and `-> #id` when a handler is
    /// bound there.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        for method in self.methods() {
            if let Some(root) = self.trees.get(&method) {
                let _ = writeln!(out, "{method}");
                let _ = root.write_tree(&mut out, 1);
            }
        }
        out
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> #{}",
                route.method, route.pattern, route.handler_id
            );
        }
    }
}
