//! Cooperative stop flag.
//!
//! The binary's Ctrl-C handler calls `request()`; the executor checks `is_requested()`
//! between operations so a batch never stops halfway through one.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Clear the flag (tests only).
#[cfg(any(test, feature = "test-helpers"))]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
