//! `canlink` library: a CAN communication driver for dual-board test setups
//! in a `no_std` environment. The crate exposes the transport primitives
//! (frames, identifiers, mailbox, bus/timer/indicator seams), the driver
//! core with its statistics and fault handling, the built-in self-test
//! harness with its two-indicator reporter, and the normal-mode link loop.
#![no_std]
//==================================================================================
/// Periodic send/receive application loop and the echo rule.
pub mod app;
/// Build-time configuration surface: bit rate, loopback, message identifiers.
pub mod config;
/// Driver core: shared link state, send/receive/statistics, fault handling.
pub mod driver;
/// Domain and low-level errors (identifier range, bus configuration,
/// transmission, and related issues).
pub mod error;
/// Black-box self-test suite and the indicator-pulse reporter.
pub mod harness;
/// Transport layer: frame model, inbound mailbox, hardware seams, and the
/// software loopback backend.
pub mod transport;
//==================================================================================
