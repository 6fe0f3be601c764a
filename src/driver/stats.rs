//! Link statistics: atomic storage shared between the notification paths
//! and the foreground, plus the plain snapshot handed to callers.
//!
//! Each counter has exactly one writer (send path, receive path, or fault
//! path) and increments are its sole mutation, so `Relaxed` atomics are
//! enough: a snapshot racing an increment under-reports that counter by at
//! most one event and never tears.
use core::sync::atomic::{AtomicU32, Ordering};

use crate::driver::fault::ErrorStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Point-in-time copy of the link counters.
pub struct CanStats {
    /// Frames accepted by the outgoing slot.
    pub sent: u32,
    /// Frames consumed through `receive`.
    pub received: u32,
    /// Fault notifications observed.
    pub errors: u32,
    /// Status word of the most recent fault; earlier codes are overwritten.
    pub last_error: ErrorStatus,
}

/// Atomic counter storage. Counters are monotonically non-decreasing for
/// the process lifetime; only [`SharedStats::reset`] (an explicit harness
/// action, never taken by the driver) rewinds them.
pub struct SharedStats {
    sent: AtomicU32,
    received: AtomicU32,
    errors: AtomicU32,
    last_error: AtomicU32,
}

impl SharedStats {
    pub const fn new() -> Self {
        Self {
            sent: AtomicU32::new(0),
            received: AtomicU32::new(0),
            errors: AtomicU32::new(0),
            last_error: AtomicU32::new(0),
        }
    }

    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fault(&self, status: ErrorStatus) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        self.last_error.store(status.bits(), Ordering::Relaxed);
    }

    /// Copies the current counters. Not atomic as a whole; see the module
    /// docs for why that is acceptable.
    pub fn snapshot(&self) -> CanStats {
        CanStats {
            sent: self.sent.load(Ordering::Relaxed),
            received: self.received.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            last_error: ErrorStatus::from_bits_retain(self.last_error.load(Ordering::Relaxed)),
        }
    }

    /// Rewinds every counter to zero.
    pub fn reset(&self) {
        self.sent.store(0, Ordering::Relaxed);
        self.received.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.last_error.store(0, Ordering::Relaxed);
    }
}

impl Default for SharedStats {
    fn default() -> Self {
        Self::new()
    }
}
