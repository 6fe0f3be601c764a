//! Fault taxonomy of the bus module.
//!
//! The error status word is an opaque bitmask at the driver boundary; the
//! individual bits are decoded here for classification only. Every class
//! except bus-off is reported and left alone; bus-off is the one condition
//! with an automatic remedy (full re-initialization).
use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    /// Raw error status word delivered with a fault notification.
    pub struct ErrorStatus: u32 {
        /// Transmit error counter crossed the warning threshold.
        const TX_WARN = 1 << 0;
        /// Receive error counter crossed the warning threshold.
        const RX_WARN = 1 << 1;
        /// Transmit error counter exceeded the error-passive threshold.
        const TX_ERROR_PASSIVE = 1 << 2;
        /// Receive error counter exceeded the error-passive threshold.
        const RX_ERROR_PASSIVE = 1 << 3;
        /// The module disconnected itself from the bus after excessive
        /// errors. Unrecoverable without re-initialization.
        const BUS_OFF = 1 << 4;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Severity classes, in increasing order.
pub enum FaultClass {
    /// Warning threshold crossed; diagnostic only.
    Warning,
    /// Error-passive threshold exceeded; diagnostic only.
    ErrorPassive,
    /// Module is off the bus; triggers re-initialization.
    BusOff,
}

impl ErrorStatus {
    /// Highest severity present in the mask, if any recognized bit is set.
    /// Unrecognized bits alone classify as `None`: they are still counted
    /// and recorded, just not acted upon.
    pub fn severity(self) -> Option<FaultClass> {
        if self.contains(ErrorStatus::BUS_OFF) {
            Some(FaultClass::BusOff)
        } else if self.intersects(ErrorStatus::TX_ERROR_PASSIVE | ErrorStatus::RX_ERROR_PASSIVE) {
            Some(FaultClass::ErrorPassive)
        } else if self.intersects(ErrorStatus::TX_WARN | ErrorStatus::RX_WARN) {
            Some(FaultClass::Warning)
        } else {
            None
        }
    }

    /// Whether the mask carries the unrecoverable bus-off condition.
    pub fn is_bus_off(self) -> bool {
        self.contains(ErrorStatus::BUS_OFF)
    }
}
