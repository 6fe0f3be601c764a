//! Bounded inbound mailbox between the bus notification path and the
//! foreground `receive` path.
//!
//! The hardware latch this replaces held exactly one unconsumed frame and
//! overwrote it silently on a second arrival. Here the buffering is an
//! explicit bounded queue (depth 1 by default) with a chosen overflow
//! policy and a drop counter, so overwrites stay observable. Firmware
//! provides the storage through [`LinkState`]; no allocation is performed
//! by the library.
//!
//! [`LinkState`]: crate::driver::LinkState
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::transport::can_frame::CanFrame;

/// Default queue depth: single-slot mailbox, as the hardware latch had.
pub const DEFAULT_DEPTH: usize = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// What to do with a new arrival when the queue is full.
pub enum OverflowPolicy {
    /// Discard the oldest unconsumed frame; the newest one wins. This is
    /// the behavior of the hardware latch, minus the silence.
    #[default]
    DropOldest,
    /// Keep the queue as-is and discard the arrival.
    RejectNewest,
}

/// Bounded frame queue, safe to fill from an interrupt context and drain
/// from the foreground.
pub struct Mailbox<const DEPTH: usize = DEFAULT_DEPTH> {
    slots: Channel<CriticalSectionRawMutex, CanFrame, DEPTH>,
    policy: OverflowPolicy,
    dropped: AtomicU32,
}

impl<const DEPTH: usize> Mailbox<DEPTH> {
    /// Creates an empty mailbox. `const`, so it can back a `static`.
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self {
            slots: Channel::new(),
            policy,
            dropped: AtomicU32::new(0),
        }
    }

    /// Latches an inbound frame, applying the overflow policy when full.
    /// Returns `false` when a frame (old or new) was dropped.
    ///
    /// Notification-path budget: a couple of queue operations, no waiting.
    pub fn latch(&self, frame: CanFrame) -> bool {
        match self.slots.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(frame)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                if let OverflowPolicy::DropOldest = self.policy {
                    let _ = self.slots.try_receive();
                    let _ = self.slots.try_send(frame);
                }
                false
            }
        }
    }

    /// Takes the oldest unconsumed frame, if any.
    pub fn take(&self) -> Option<CanFrame> {
        self.slots.try_receive().ok()
    }

    /// Discards everything latched so far. Used when the slots are
    /// re-installed during re-initialization.
    pub fn drain(&self) {
        while self.slots.try_receive().is_ok() {}
    }

    /// Number of frames lost to the overflow policy since construction.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
