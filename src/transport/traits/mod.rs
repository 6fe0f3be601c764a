//! Abstraction traits used by the driver core (CAN bus backend, timer, and
//! status indicators).
pub mod can_bus;
pub mod indicator;
pub mod link_timer;
