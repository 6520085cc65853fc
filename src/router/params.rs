//! Path parameters captured during a single lookup.
//!
//! Names borrow from the route tree and values borrow from the request path,
//! so filling a [`Params`] never copies string data. Storage is a `SmallVec`
//! so routes with up to [`MAX_INLINE_PARAMS`] dynamic segments stay off the heap.

use smallvec::SmallVec;
use std::collections::HashMap;

/// Maximum number of captured parameters before spilling to the heap.
/// Most REST APIs have ≤4 path params (e.g. `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Name under which a trailing wildcard (`*`) capture is stored.
pub const CATCH_ALL_KEY: &str = "_name";

/// A single captured `(name, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Ordered sequence of parameters in traversal order.
///
/// A `Params` is meant to be owned by one in-flight request. [`Router::find`]
/// clears it before matching, so a buffer can be reused for the next lookup.
///
/// [`Router::find`]: crate::router::Router::find
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    inner: SmallVec<[Param<'a>; MAX_INLINE_PARAMS]>,
}

impl<'a> Params<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics: if the same name was captured twice,
    /// the value captured deepest in the path is returned.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.inner
            .iter()
            .rfind(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Like [`Params::get`] but returns `""` when nothing matched.
    #[inline]
    #[must_use]
    pub fn get_or_empty(&self, name: &str) -> &'a str {
        self.get(name).unwrap_or("")
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param<'a>> {
        self.inner.iter()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Copy the parameters into an owned map.
    /// Note: This allocates - use `get()` in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|p| (p.name.to_string(), p.value.to_string()))
            .collect()
    }

    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        self.inner.push(Param { name, value });
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

impl<'p, 'a> IntoIterator for &'p Params<'a> {
    type Item = &'p Param<'a>;
    type IntoIter = std::slice::Iter<'p, Param<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_last_matching_value() {
        let mut params = Params::new();
        params.push("id", "org-1");
        params.push("team", "7");
        params.push("id", "user-9");

        assert_eq!(params.get("id"), Some("user-9"));
        assert_eq!(params.get("team"), Some("7"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn missing_name_is_none_or_empty() {
        let mut params = Params::new();
        params.push("id", "42");

        assert_eq!(params.get("slug"), None);
        assert_eq!(params.get_or_empty("slug"), "");
        assert_eq!(params.get_or_empty("id"), "42");
    }

    #[test]
    fn truncate_and_clear_reset_by_position() {
        let mut params = Params::new();
        params.push("a", "1");
        params.push("b", "2");
        params.truncate(1);
        assert_eq!(params.get("b"), None);
        assert_eq!(params.get("a"), Some("1"));

        params.clear();
        assert!(params.is_empty());
    }

    #[test]
    fn to_map_copies_pairs() {
        let mut params = Params::new();
        params.push("user_id", "5");
        params.push(CATCH_ALL_KEY, "css/a.css");

        let map = params.to_map();
        assert_eq!(map.get("user_id").map(String::as_str), Some("5"));
        assert_eq!(map.get("_name").map(String::as_str), Some("css/a.css"));
    }

    #[test]
    fn spills_past_inline_capacity() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        let mut params = Params::new();
        for name in names {
            params.push(name, "v");
        }
        assert_eq!(params.len(), names.len());
        assert_eq!(params.iter().map(|p| p.name).collect::<Vec<_>>(), names);
    }
}
