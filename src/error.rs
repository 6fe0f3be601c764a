//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (identifier construction,
//! bus configuration, frame transmission, and related issues).
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur while building a standard 11-bit CAN identifier.
pub enum FrameError {
    /// The raw value does not fit in the standard identifier range.
    #[error("identifier exceeds the 11-bit standard range: {id:#X}")]
    IdOutOfRange { id: u32 },
}

#[derive(Error, Debug)]
/// Errors surfaced by the driver core while talking to the bus backend.
///
/// Only the synchronous accept path reports through this type; faults the
/// bus raises asynchronously go through the fault handler and are visible
/// exclusively in the statistics.
pub enum DriverError<E: core::fmt::Debug> {
    /// The backend rejected the slot configuration.
    #[error("bus configuration failed: {0:?}")]
    Configure(E),

    /// The outgoing slot refused the frame.
    #[error("outgoing slot rejected the frame: {0:?}")]
    Transmit(E),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Failure modes of the in-memory loopback backend.
pub enum SoftBusError {
    /// An operation was attempted before `configure` installed the slots.
    #[error("bus not configured")]
    NotConfigured,

    /// The backend's event queue is full.
    #[error("event queue full")]
    QueueFull,
}
