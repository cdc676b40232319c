//! Cooperative shutdown signalling for the poll loop
//!
//! One process-wide handle; requesting shutdown wakes the inter-cycle sleep
//! so the loop stops between cycles, never in the middle of a watermark
//! write.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Cloneable shutdown handle shared between the poll loop and its owner
#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    requested: Mutex<bool>,
    wake: Condvar,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake any sleeping waiter.
    pub fn request(&self) {
        let mut requested = self.inner.requested.lock().unwrap();
        *requested = true;
        self.inner.wake.notify_all();
    }

    pub fn is_requested(&self) -> bool {
        *self.inner.requested.lock().unwrap()
    }

    /// Sleep for up to `timeout`, returning early when shutdown is requested.
    ///
    /// Returns `true` if shutdown was requested, `false` if the full timeout
    /// elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let requested = self.inner.requested.lock().unwrap();
        let (requested, _) = self
            .inner
            .wake
            .wait_timeout_while(requested, timeout, |requested| !*requested)
            .unwrap();
        *requested
    }
}
