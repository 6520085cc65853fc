//! Lock-free publication of completed routers.
//!
//! A [`Router`] is mutated in place while routes are added, so it must never be
//! visible to readers while it is being built. `SharedRouter` keeps the live
//! router behind an [`ArcSwap`]: writers build a complete replacement and swap
//! it in with one atomic store, readers take a snapshot without locking.

use arc_swap::{ArcSwap, Guard};
use std::sync::Arc;
use tracing::info;

use super::core::Router;

pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
}

impl<H> SharedRouter<H> {
    #[must_use]
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Cheap snapshot for a single request.
    ///
    /// The snapshot stays valid even if a new router is published meanwhile.
    #[inline]
    pub fn load(&self) -> Guard<Arc<Router<H>>> {
        self.current.load()
    }

    /// Owned snapshot, for holding across longer work.
    #[must_use]
    pub fn load_full(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Atomically replace the live router, returning the previous one.
    pub fn publish(&self, router: Router<H>) -> Arc<Router<H>> {
        info!(
            routes_count = router.route_count(),
            "Publishing routing table"
        );
        self.current.swap(Arc::new(router))
    }
}

impl<H> Default for SharedRouter<H> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<H> From<Router<H>> for SharedRouter<H> {
    fn from(router: Router<H>) -> Self {
        Self::new(router)
    }
}
