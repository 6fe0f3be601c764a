//! Minimal abstraction for a CAN bus backend with fixed-purpose message
//! slots. Allows the driver to plug into various implementations (embedded
//! peripheral, software loopback, desktop driver, etc.).
use crate::config::CanConfig;
use crate::driver::fault::ErrorStatus;
use crate::transport::can_frame::CanFrame;

#[derive(Clone, Debug, PartialEq, Eq)]
/// One asynchronous bus notification, drained through [`CanBus::poll_event`].
///
/// On hardware these are the frame-completion and fault interrupts; the
/// interrupt handlers queue them and the driver consumes them from the
/// foreground, which keeps the notification budget to a couple of writes.
pub enum BusEvent {
    /// An inbound frame finished arriving.
    Frame(CanFrame),
    /// The module raised a fault; the mask is the raw error status word.
    Fault(ErrorStatus),
}

/// Contract between the driver core and the bus hardware.
///
/// All three operations are non-blocking: `transmit` only hands the frame
/// to the outgoing slot (delivery is not guaranteed and completion is not
/// awaited), and `poll_event` returns whatever notification is pending, if
/// any.
pub trait CanBus {
    type Error: core::fmt::Debug;

    /// Installs the two fixed-purpose slots at the configured bit rate,
    /// enables fault and completion notifications, and optionally enables
    /// self-loopback. Called once at start and again after bus-off; must
    /// not leak slot configuration across calls.
    fn configure(&mut self, config: &CanConfig) -> Result<(), Self::Error>;

    /// Hands a frame to the outgoing slot.
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error>;

    /// Drains one pending notification, oldest first.
    fn poll_event(&mut self) -> Option<BusEvent>;
}
