//! Driver core: owns the bus backend, pumps its notifications, and exposes
//! the send/receive/statistics contract.
//!
//! Shared state ([`LinkState`]) is pre-allocated by the firmware (typically
//! a `static`) and handed in by reference, so the crate performs no
//! allocation and does not depend on a particular BSP.
pub mod fault;
pub mod stats;

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::CanConfig;
use crate::driver::fault::ErrorStatus;
use crate::driver::stats::{CanStats, SharedStats};
use crate::error::DriverError;
use crate::transport::can_frame::CanFrame;
use crate::transport::can_id::CanId;
use crate::transport::mailbox::{Mailbox, OverflowPolicy, DEFAULT_DEPTH};
use crate::transport::traits::can_bus::{BusEvent, CanBus};

/// Process-wide link state: inbound mailbox, statistics, the latched fault
/// indicator, and the arrival counter used to timestamp frames.
///
/// `const`-constructible so it can live in a `static` shared between the
/// foreground and the interrupt glue.
pub struct LinkState<const DEPTH: usize = DEFAULT_DEPTH> {
    mailbox: Mailbox<DEPTH>,
    stats: SharedStats,
    fault: AtomicBool,
    arrivals: AtomicU32,
}

impl LinkState {
    /// Single-slot state with the default drop-oldest policy.
    pub const fn new() -> Self {
        Self::with_policy(OverflowPolicy::DropOldest)
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEPTH: usize> LinkState<DEPTH> {
    /// State with an explicit mailbox overflow policy.
    pub const fn with_policy(policy: OverflowPolicy) -> Self {
        Self {
            mailbox: Mailbox::new(policy),
            stats: SharedStats::new(),
            fault: AtomicBool::new(false),
            arrivals: AtomicU32::new(0),
        }
    }

    /// Latches an inbound frame, stamping its arrival timestamp. Safe to
    /// call from the completion interrupt: two atomics and a queue push.
    pub fn latch_frame(&self, mut frame: CanFrame) -> bool {
        frame.timestamp = self.arrivals.fetch_add(1, Ordering::Relaxed);
        self.mailbox.latch(frame)
    }

    /// Whether the fault indicator is currently latched. Set by the fault
    /// path, never cleared automatically; rendering it on a physical LED is
    /// the application's concern.
    pub fn fault_latched(&self) -> bool {
        self.fault.load(Ordering::Relaxed)
    }

    /// Clears the fault indicator. A human (or test-harness) action.
    pub fn clear_fault(&self) {
        self.fault.store(false, Ordering::Relaxed);
    }

    /// Frames lost to the mailbox overflow policy.
    pub fn dropped_frames(&self) -> u32 {
        self.mailbox.dropped()
    }

    /// Statistics storage, for explicit harness resets.
    pub fn stats(&self) -> &SharedStats {
        &self.stats
    }
}

/// CAN communication driver over a pluggable bus backend.
pub struct CanDriver<'a, B: CanBus, const DEPTH: usize = DEFAULT_DEPTH> {
    bus: B,
    config: CanConfig,
    state: &'a LinkState<DEPTH>,
}

impl<'a, B, const DEPTH: usize> CanDriver<'a, B, DEPTH>
where
    B: CanBus,
{
    /// Wraps a backend. The bus is untouched until [`CanDriver::init`].
    pub fn new(bus: B, config: CanConfig, state: &'a LinkState<DEPTH>) -> Self {
        Self { bus, config, state }
    }

    /// Configures the bus: bit rate, the two fixed-purpose slots, fault and
    /// completion notifications, and optionally self-loopback.
    ///
    /// Idempotent: calling it again (after bus-off, or at any point)
    /// re-installs the slots without leaking configuration and discards
    /// stale mailbox content. Statistics are left untouched; the driver
    /// never resets them.
    pub fn init(&mut self) -> Result<(), DriverError<B::Error>> {
        self.bus
            .configure(&self.config)
            .map_err(DriverError::Configure)?;
        self.state.mailbox.drain();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "link up: {} bit/s, loopback={}",
            self.config.bit_rate.bits_per_second(),
            self.config.loopback
        );
        Ok(())
    }

    /// Hands a frame to the outgoing slot and counts it as sent.
    ///
    /// The payload is clamped to eight bytes and zero-padded. The call does
    /// not wait for bus completion and does not guarantee delivery; it
    /// guarantees only that the outgoing slot accepted the frame.
    pub fn send(&mut self, id: CanId, payload: &[u8]) -> Result<(), DriverError<B::Error>> {
        let frame = CanFrame::new(id, payload);
        self.bus.transmit(&frame).map_err(DriverError::Transmit)?;
        self.state.stats.record_sent();
        Ok(())
    }

    /// Non-blocking receive poll.
    ///
    /// Drains pending bus notifications first, then takes the oldest
    /// unconsumed frame from the mailbox, counting it as received. `None`
    /// means no message and leaves every counter untouched. Callers needing
    /// blocking semantics poll with their own timeout budget (see
    /// [`recv_within`]).
    ///
    /// [`recv_within`]: crate::harness::recv_within
    pub fn receive(&mut self) -> Option<CanFrame> {
        self.service();
        let frame = self.state.mailbox.take()?;
        self.state.stats.record_received();
        Some(frame)
    }

    /// Statistics snapshot. Reads race the notification paths benignly:
    /// counters are monotonic and a torn read under-reports by at most one
    /// event.
    pub fn stats(&self) -> CanStats {
        self.state.stats.snapshot()
    }

    /// Event pump: drains every pending bus notification, latching inbound
    /// frames and dispatching faults. `receive` calls this on entry; call
    /// it directly from the main loop when receiving rarely.
    pub fn service(&mut self) {
        while let Some(event) = self.bus.poll_event() {
            match event {
                BusEvent::Frame(frame) => {
                    if !self.state.latch_frame(frame) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("mailbox overflow, frame dropped");
                    }
                }
                BusEvent::Fault(status) => self.on_bus_fault(status),
            }
        }
    }

    /// Fault notification entry point.
    ///
    /// Counts the fault, records its status word, latches the fault
    /// indicator, and classifies the threshold bits for diagnostics.
    /// Bus-off additionally re-initializes the module; every other class is
    /// reported but not remediated. Nothing here propagates to `send`/
    /// `receive` callers; bus health is inferred from the statistics.
    pub fn on_bus_fault(&mut self, status: ErrorStatus) {
        self.state.stats.record_fault(status);
        self.state.fault.store(true, Ordering::Relaxed);

        #[cfg(feature = "defmt")]
        match status.severity() {
            Some(class) => defmt::warn!("bus fault {=u32:#x}: {}", status.bits(), class),
            None => defmt::warn!("bus fault {=u32:#x}: unclassified", status.bits()),
        }

        if status.is_bus_off() {
            // The only automatic recovery path. A failed re-init leaves the
            // module off the bus; the next fault notification retries.
            match self.init() {
                Ok(()) => {}
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("bus-off recovery failed");
                }
            }
        }
    }

    /// The configuration this driver was built with.
    pub fn config(&self) -> &CanConfig {
        &self.config
    }

    /// Shared state handle, for fault-latch queries and harness resets.
    pub fn state(&self) -> &LinkState<DEPTH> {
        self.state
    }

    /// Releases the backend, for direct manipulation in tests.
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Backend access without giving up the driver.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests;
