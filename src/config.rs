//! Build-time configuration surface of the link: bus bit rate, loopback
//! mode, and the three fixed message identifiers.
use crate::transport::can_id::CanId;

/// Identifier the outgoing slot transmits with.
pub const DEFAULT_TX_ID: CanId = CanId::from_raw_truncated(0x123);
/// Identifier the incoming slot listens on (exact match, no masking).
pub const DEFAULT_RX_ID: CanId = CanId::from_raw_truncated(0x456);
/// Identifier reserved for echo traffic between the two boards.
pub const DEFAULT_ECHO_ID: CanId = CanId::from_raw_truncated(0x789);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Supported CAN bit rates.
pub enum BitRate {
    /// 250 kbit/s.
    Kbps250,
    /// 500 kbit/s.
    #[default]
    Kbps500,
    /// 1 Mbit/s.
    Kbps1000,
}

impl BitRate {
    /// Nominal bit rate in bits per second, as handed to the bus backend.
    pub const fn bits_per_second(self) -> u32 {
        match self {
            BitRate::Kbps250 => 250_000,
            BitRate::Kbps500 => 500_000,
            BitRate::Kbps1000 => 1_000_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Static link configuration handed to [`CanDriver::init`].
///
/// Standard (non-extended) identifiers only, exact-match addressing on the
/// incoming slot. Loopback routes transmitted frames back to the receive
/// path without leaving the board.
///
/// [`CanDriver::init`]: crate::driver::CanDriver::init
pub struct CanConfig {
    pub bit_rate: BitRate,
    pub loopback: bool,
    pub tx_id: CanId,
    pub rx_id: CanId,
    pub echo_id: CanId,
}

impl Default for CanConfig {
    fn default() -> Self {
        Self {
            bit_rate: BitRate::default(),
            loopback: false,
            tx_id: DEFAULT_TX_ID,
            rx_id: DEFAULT_RX_ID,
            echo_id: DEFAULT_ECHO_ID,
        }
    }
}

impl CanConfig {
    /// Default configuration at the given bit rate.
    pub fn new(bit_rate: BitRate) -> Self {
        Self {
            bit_rate,
            ..Self::default()
        }
    }

    // Fluent setter-style helpers
    /// Enables or disables self-loopback mode.
    pub fn with_loopback(mut self, loopback: bool) -> Self {
        self.loopback = loopback;
        self
    }

    /// Sets the identifier of the outgoing slot.
    pub fn with_tx_id(mut self, id: CanId) -> Self {
        self.tx_id = id;
        self
    }

    /// Sets the identifier of the incoming slot.
    pub fn with_rx_id(mut self, id: CanId) -> Self {
        self.rx_id = id;
        self
    }

    /// Sets the identifier reserved for echo traffic.
    pub fn with_echo_id(mut self, id: CanId) -> Self {
        self.echo_id = id;
        self
    }
}
