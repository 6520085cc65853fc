//! Radix tree implementation for HTTP route matching
//!
//! This module provides the compressed prefix tree behind [`Router`]. One tree
//! exists per HTTP method. Chains of single-child nodes are merged into a single
//! node holding a multi-byte prefix, so a lookup costs O(k) where k is the path
//! length, independent of the number of registered routes.
//!
//! ## Node kinds
//!
//! - **Static** nodes match their prefix literally.
//! - **Param** nodes match their prefix literally, then capture the next path
//!   segment (up to `/` or the end, possibly empty) through the child labelled
//!   `:`. That child's prefix is `:name`.
//! - **Wildcard** nodes match their prefix literally, then capture the entire
//!   remainder of the path. A wildcard node always carries the route's handler.
//!
//! ## Invariants
//!
//! - Prefixes are raw bytes and splits happen at any byte, so a split may fall
//!   inside a multi-byte character. Captured names and values always start and
//!   end next to an ASCII `/` or `:` and are handed out as `&str`.
//! - `label == prefix[0]` for every node with a non-empty prefix.
//! - Sibling edges have pairwise-distinct labels, so at most one static edge can
//!   ever match the next byte of a request path.
//! - Nodes are split and extended in place while building and never removed.
//!
//! [`Router`]: super::Router

use std::fmt::{self, Write as _};
use std::mem;
use std::str;

use tracing::warn;

use super::params::{Params, CATCH_ALL_KEY};

/// Label of the edge leading from a param node to its `:name` child.
const PARAM_LABEL: u8 = b':';

/// Opaque auxiliary identifier attached to a route.
///
/// The router never interprets it; the dispatch layer uses it to select a
/// middleware chain or similar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HandlerId(pub u8);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happens once a node's prefix has been fully consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NodeKind {
    #[default]
    Static,
    Param,
    Wildcard,
}

impl NodeKind {
    fn as_str(self) -> &'static str {
        match self {
            NodeKind::Static => "static",
            NodeKind::Param => "param",
            NodeKind::Wildcard => "wildcard",
        }
    }
}

/// Node in the radix tree
///
/// Each node exclusively owns its children; there are no cross links.
#[derive(Debug, Clone)]
pub(crate) struct Node<H> {
    /// First byte of `prefix`, or 0 for an empty root
    label: u8,
    prefix: Vec<u8>,
    kind: NodeKind,
    handler: Option<H>,
    handler_id: HandlerId,
    edges: Vec<Node<H>>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            label: 0,
            prefix: Vec::new(),
            kind: NodeKind::Static,
            handler: None,
            handler_id: HandlerId::default(),
            edges: Vec::new(),
        }
    }
}

impl<H> Node<H> {
    fn new(
        prefix: &[u8],
        kind: NodeKind,
        handler: Option<H>,
        handler_id: HandlerId,
        edges: Vec<Node<H>>,
    ) -> Self {
        Self {
            label: prefix.first().copied().unwrap_or(0),
            prefix: prefix.to_vec(),
            kind,
            handler,
            handler_id,
            edges,
        }
    }

    /// An untouched root: nothing has been inserted yet.
    fn is_pristine(&self) -> bool {
        self.prefix.is_empty()
            && self.kind == NodeKind::Static
            && self.edges.is_empty()
            && self.handler.is_none()
    }

    fn find_edge(&self, label: u8) -> Option<&Node<H>> {
        self.edges.iter().find(|e| e.label == label)
    }

    fn find_edge_mut(&mut self, label: u8) -> Option<&mut Node<H>> {
        self.edges.iter_mut().find(|e| e.label == label)
    }

    fn display_prefix(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.prefix)
    }

    fn bind(&mut self, handler: Option<H>, handler_id: HandlerId) {
        if let Some(handler) = handler {
            if self.handler.is_some() {
                warn!(prefix = %self.display_prefix(), handler_id = %handler_id, "Overwriting handler of an existing route");
            }
            self.handler = Some(handler);
            self.handler_id = handler_id;
        }
    }

    /// Insert `search` below this node, splitting prefixes where needed.
    ///
    /// `kind`, `handler` and `handler_id` land on the node that ends exactly at
    /// the end of `search`. Inserting an existing prefix again only upgrades a
    /// static kind and (re)binds the handler; last write wins.
    pub(crate) fn insert(
        &mut self,
        search: &str,
        kind: NodeKind,
        handler: Option<H>,
        handler_id: HandlerId,
    ) {
        self.insert_bytes(search.as_bytes(), kind, handler, handler_id);
    }

    fn insert_bytes(
        &mut self,
        search: &[u8],
        kind: NodeKind,
        handler: Option<H>,
        handler_id: HandlerId,
    ) {
        if self.is_pristine() {
            self.label = search.first().copied().unwrap_or(0);
            self.prefix = search.to_vec();
            self.kind = kind;
            self.bind(handler, handler_id);
            return;
        }

        let l = lcp(search, &self.prefix);

        if l < self.prefix.len() {
            if self.prefix.first() == Some(&PARAM_LABEL)
                && l > 0
                && !self.prefix[..l].contains(&b'/')
            {
                warn!(
                    existing = %self.display_prefix(),
                    inserted = %String::from_utf8_lossy(search),
                    "Conflicting parameter names at the same position"
                );
            }

            // Old tail keeps everything the node had.
            let tail = Node::new(
                &self.prefix[l..],
                self.kind,
                self.handler.take(),
                self.handler_id,
                mem::take(&mut self.edges),
            );
            self.edges.push(tail);

            self.prefix.truncate(l);
            self.label = self.prefix.first().copied().unwrap_or(0);
            self.kind = NodeKind::Static;
            self.handler_id = HandlerId::default();

            if l == search.len() {
                self.kind = kind;
                self.bind(handler, handler_id);
            } else {
                self.edges
                    .push(Node::new(&search[l..], kind, handler, handler_id, Vec::new()));
            }
        } else if l < search.len() {
            let rest = &search[l..];
            match self.find_edge_mut(rest[0]) {
                Some(child) => child.insert_bytes(rest, kind, handler, handler_id),
                None => self
                    .edges
                    .push(Node::new(rest, kind, handler, handler_id, Vec::new())),
            }
        } else {
            match (self.kind, kind) {
                (_, NodeKind::Static) => {}
                (NodeKind::Static, _) => self.kind = kind,
                (existing, inserted) if existing != inserted => warn!(
                    prefix = %self.display_prefix(),
                    existing = existing.as_str(),
                    inserted = inserted.as_str(),
                    "Conflicting dynamic segments at the same position, keeping the first"
                ),
                _ => {}
            }
            self.bind(handler, handler_id);
        }
    }

    /// Match `path` against this node and its subtree.
    ///
    /// Returns the node holding the bound handler. An empty path matches the
    /// root itself when it carries a handler. Parameters captured on a branch
    /// that ends without a handler are removed again before the next
    /// alternative is tried.
    pub(crate) fn find<'a>(&'a self, path: &'a str, params: &mut Params<'a>) -> Option<&'a Node<H>> {
        if path.is_empty() {
            return self.handler.as_ref().map(|_| self);
        }
        self.find_at(path, 0, params)
    }

    /// Match this node's prefix against `path[pos..]`, then continue below it.
    fn find_at<'a>(&'a self, path: &'a str, pos: usize, params: &mut Params<'a>) -> Option<&'a Node<H>> {
        if !path.as_bytes().get(pos..)?.starts_with(&self.prefix) {
            return None;
        }
        self.find_below(path, pos + self.prefix.len(), params)
    }

    /// Continue matching at `path[pos..]` once this node's prefix has been consumed.
    fn find_below<'a>(&'a self, path: &'a str, pos: usize, params: &mut Params<'a>) -> Option<&'a Node<H>> {
        let rest = path.as_bytes().get(pos..)?;
        if rest.is_empty() && self.handler.is_some() {
            return Some(self);
        }

        let mark = params.len();

        // Static edges first
        if let Some(&next) = rest.first() {
            if next != PARAM_LABEL {
                if let Some(child) = self.find_edge(next) {
                    if let Some(found) = child.find_at(path, pos, params) {
                        return Some(found);
                    }
                    params.truncate(mark);
                }
            }
        }

        match self.kind {
            NodeKind::Param => {
                let child = self.find_edge(PARAM_LABEL)?;
                let end = rest
                    .iter()
                    .position(|&b| b == b'/')
                    .map_or(path.len(), |i| pos + i);
                params.push(child.param_name(), path.get(pos..end)?);
                let found = child.find_below(path, end, params);
                if found.is_none() {
                    params.truncate(mark);
                }
                found
            }
            NodeKind::Wildcard if !rest.is_empty() => {
                params.push(CATCH_ALL_KEY, path.get(pos..)?);
                self.handler.as_ref().map(|_| self)
            }
            NodeKind::Wildcard | NodeKind::Static => None,
        }
    }

    fn param_name(&self) -> &str {
        let name = self.prefix.strip_prefix(b":").unwrap_or(&self.prefix);
        let end = name.iter().position(|&b| b == b'/').unwrap_or(name.len());
        let name = &name[..end];
        match str::from_utf8(name) {
            Ok(name) => name,
            // A split inside a conflicting name can cut a character in half.
            Err(e) => str::from_utf8(&name[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    pub(crate) fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub(crate) fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    /// Append an indented rendering of this subtree to `out`.
    ///
    /// Prefixes that end inside a multi-byte character are shown lossily.
    pub(crate) fn write_tree(&self, out: &mut String, depth: usize) -> fmt::Result {
        let prefix = self.display_prefix();
        let prefix = if prefix.is_empty() { "\"\"" } else { &*prefix };
        write!(out, "{:indent$}{prefix} [{}]", "", self.kind.as_str(), indent = depth * 2)?;
        if self.handler.is_some() {
            write!(out, " -> #{}", self.handler_id)?;
        }
        out.push('\n');
        for edge in &self.edges {
            edge.write_tree(out, depth + 1)?;
        }
        Ok(())
    }
}

/// Length of the longest common byte prefix of `a` and `b`.
pub(crate) fn lcp(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
