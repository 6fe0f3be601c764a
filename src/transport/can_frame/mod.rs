//! In-memory representation of one message unit exchanged over the bus.
use crate::transport::can_id::CanId;

/// Classic CAN payload capacity in bytes.
pub const MAX_PAYLOAD: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw frame as handed to or read from the CAN bus.
///
/// Invariant: `len <= 8` and `data[len..]` is zero-filled. Both are
/// enforced by [`CanFrame::new`]; code constructing frames field by field
/// is responsible for upholding them.
pub struct CanFrame {
    /// Standard 11-bit identifier.
    pub id: CanId,
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
    /// Payload buffer. Classic CAN frames always carry eight bytes.
    pub data: [u8; MAX_PAYLOAD],
    /// Monotonic arrival counter stamped when the frame is latched;
    /// zero on outgoing frames.
    pub timestamp: u32,
}

impl CanFrame {
    /// Builds a frame from a caller buffer, clamping the payload to eight
    /// bytes and zero-filling the remainder. Bytes past the clamp point are
    /// never read from `payload`.
    pub fn new(id: CanId, payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_PAYLOAD);
        let mut data = [0u8; MAX_PAYLOAD];
        data[..len].copy_from_slice(&payload[..len]);
        Self {
            id,
            len,
            data,
            timestamp: 0,
        }
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Whether the frame carries no payload. Valid on the wire; the
    /// harness Receive test rejects it as an application message.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_PAYLOAD {
            return None;
        }
        let id = CanId::try_from(id.into()).ok()?;
        Some(CanFrame::new(id, data))
    }

    /// Remote frames are not part of this link design.
    fn new_remote(_id: impl Into<embedded_can::Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> embedded_can::Id {
        embedded_can::Id::Standard(self.id.into())
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}

#[cfg(test)]
mod tests;
