//! Transport layer: frame model, identifier handling, the bounded inbound
//! mailbox, the hardware seams (bus, timer, indicators), and a software
//! loopback backend for isolated testing.
pub mod can_frame;
pub mod can_id;
pub mod loopback;
pub mod mailbox;
pub mod traits;
