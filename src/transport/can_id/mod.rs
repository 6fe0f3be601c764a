//! Standard (non-extended) 11-bit CAN identifiers.
//!
//! The link uses exact-match addressing on fixed identifiers, so the type
//! only guards the range; there is no priority or sub-field structure to
//! decompose.
use crate::error::FrameError;

/// Highest value a standard 11-bit identifier can take.
pub const MAX_STANDARD_ID: u32 = 0x7FF;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates a standard CAN identifier (11 bits).
pub struct CanId(u16);

impl CanId {
    /// Creates an identifier, rejecting values above [`MAX_STANDARD_ID`].
    pub const fn new(raw: u32) -> Result<Self, FrameError> {
        if raw > MAX_STANDARD_ID {
            return Err(FrameError::IdOutOfRange { id: raw });
        }
        Ok(Self(raw as u16))
    }

    /// Creates an identifier from a raw value, keeping only the low 11 bits.
    ///
    /// Used for compile-time constants where the value is known to be in
    /// range; prefer [`CanId::new`] for runtime input.
    pub const fn from_raw_truncated(raw: u32) -> Self {
        Self((raw & MAX_STANDARD_ID) as u16)
    }

    /// Raw identifier value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Identifier offset by `n`, wrapping inside the standard range.
    ///
    /// The sequential-message test emits on a block of consecutive
    /// identifiers starting at a base id.
    pub const fn offset(self, n: u16) -> Self {
        Self(self.0.wrapping_add(n) & MAX_STANDARD_ID as u16)
    }
}

impl From<CanId> for embedded_can::StandardId {
    fn from(id: CanId) -> Self {
        // CanId is range-checked at construction, so this cannot fall back.
        embedded_can::StandardId::new(id.0).unwrap_or(embedded_can::StandardId::ZERO)
    }
}

impl TryFrom<embedded_can::Id> for CanId {
    type Error = FrameError;

    fn try_from(id: embedded_can::Id) -> Result<Self, Self::Error> {
        match id {
            embedded_can::Id::Standard(std) => Ok(Self(std.as_raw())),
            embedded_can::Id::Extended(ext) => Err(FrameError::IdOutOfRange {
                id: ext.as_raw(),
            }),
        }
    }
}
