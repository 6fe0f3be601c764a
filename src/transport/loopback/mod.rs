//! In-memory CAN bus backend.
//!
//! In loopback mode every transmitted frame is routed straight back to the
//! receive path, which is what the driver's self-loopback configuration
//! does on real hardware. Outside loopback mode the backend models the
//! incoming slot's exact-match filter: peer frames injected with
//! [`SoftLoopback::inject_frame`] are delivered only when their identifier
//! equals the configured rx id. [`SoftLoopback::inject_fault`] feeds the
//! fault notification path.
//!
//! The self-test suite runs against this backend in CI; on a board pair it
//! is replaced by the peripheral-backed [`CanBus`] implementation.
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::CanConfig;
use crate::driver::fault::ErrorStatus;
use crate::error::SoftBusError;
use crate::transport::can_frame::CanFrame;
use crate::transport::traits::can_bus::{BusEvent, CanBus};

/// Pending-notification capacity. Generous compared to the depth-1 mailbox
/// so event loss happens under the mailbox's policy, not silently here.
const EVENT_SLOTS: usize = 16;

/// Software bus double implementing [`CanBus`].
pub struct SoftLoopback {
    config: Option<CanConfig>,
    configured: u32,
    events: Channel<CriticalSectionRawMutex, BusEvent, EVENT_SLOTS>,
}

impl Default for SoftLoopback {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftLoopback {
    /// Creates an unconfigured bus; `configure` installs the slots.
    pub const fn new() -> Self {
        Self {
            config: None,
            configured: 0,
            events: Channel::new(),
        }
    }

    /// Delivers a peer frame to the incoming slot, subject to the
    /// exact-match filter. Returns `false` when the filter rejects it.
    pub fn inject_frame(&mut self, frame: CanFrame) -> Result<bool, SoftBusError> {
        let config = self.config.as_ref().ok_or(SoftBusError::NotConfigured)?;
        if frame.id != config.rx_id {
            return Ok(false);
        }
        self.events
            .try_send(BusEvent::Frame(frame))
            .map_err(|_| SoftBusError::QueueFull)?;
        Ok(true)
    }

    /// Raises a fault notification with the given status word.
    pub fn inject_fault(&mut self, status: ErrorStatus) -> Result<(), SoftBusError> {
        self.events
            .try_send(BusEvent::Fault(status))
            .map_err(|_| SoftBusError::QueueFull)
    }

    /// Number of times `configure` has been called. Lets tests observe the
    /// bus-off recovery path.
    pub fn configured_count(&self) -> u32 {
        self.configured
    }
}

impl CanBus for SoftLoopback {
    type Error = SoftBusError;

    fn configure(&mut self, config: &CanConfig) -> Result<(), Self::Error> {
        // Re-installing the slots discards anything still pending, exactly
        // like resetting the message RAM does.
        while self.events.try_receive().is_ok() {}
        self.config = Some(*config);
        self.configured = self.configured.wrapping_add(1);
        Ok(())
    }

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        let config = self.config.as_ref().ok_or(SoftBusError::NotConfigured)?;
        if config.loopback {
            // Loopback routes the frame back carrying the id it was sent
            // with; the incoming slot's filter is bypassed in test mode.
            self.events
                .try_send(BusEvent::Frame(frame.clone()))
                .map_err(|_| SoftBusError::QueueFull)?;
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Option<BusEvent> {
        self.events.try_receive().ok()
    }
}
