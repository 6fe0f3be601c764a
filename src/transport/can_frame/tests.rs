//! Unit tests for frame construction invariants.
use super::*;

fn id(raw: u32) -> CanId {
    CanId::new(raw).unwrap()
}

#[test]
/// Payload is copied and the tail stays zero-filled.
fn test_new_zero_fills_tail() {
    let frame = CanFrame::new(id(0x123), &[0xAA, 0xBB, 0xCC]);
    assert_eq!(frame.len, 3);
    assert_eq!(frame.data, [0xAA, 0xBB, 0xCC, 0, 0, 0, 0, 0]);
    assert_eq!(frame.payload(), &[0xAA, 0xBB, 0xCC][..]);
}

#[test]
/// Oversized caller buffers are clamped to eight bytes exactly.
fn test_new_clamps_to_eight() {
    let long = [0x55u8; 13];
    let frame = CanFrame::new(id(0x123), &long);
    assert_eq!(frame.len, 8);
    assert_eq!(frame.data, [0x55; 8]);
}

#[test]
/// A zero-length payload is a valid frame at this boundary.
fn test_new_empty_payload() {
    let frame = CanFrame::new(id(0x456), &[]);
    assert_eq!(frame.len, 0);
    assert!(frame.is_empty());
    assert_eq!(frame.data, [0u8; 8]);
    assert_eq!(frame.payload(), &[] as &[u8]);
}

#[test]
/// Outgoing frames carry a zero timestamp until latched.
fn test_new_timestamp_zero() {
    let frame = CanFrame::new(id(0x123), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(frame.timestamp, 0);
}

#[test]
/// `embedded_can::Frame` surface: data frames only, standard format.
fn test_embedded_can_frame_impl() {
    use embedded_can::Frame;

    let std_id = embedded_can::StandardId::new(0x123).unwrap();
    let frame =
        <CanFrame as Frame>::new(embedded_can::Id::Standard(std_id), &[1, 2, 3]).unwrap();
    assert_eq!(frame.dlc(), 3);
    assert_eq!(frame.data(), &[1, 2, 3][..]);
    assert!(!frame.is_extended());
    assert!(!frame.is_remote_frame());

    // Nine bytes do not fit a classic frame.
    assert!(<CanFrame as Frame>::new(embedded_can::Id::Standard(std_id), &[0; 9]).is_none());
    // Remote frames are unsupported by design.
    assert!(CanFrame::new_remote(embedded_can::Id::Standard(std_id), 4).is_none());
    // Extended identifiers are outside this link's addressing scheme.
    let ext = embedded_can::ExtendedId::new(0x1FFF_FFFF).unwrap();
    assert!(<CanFrame as Frame>::new(embedded_can::Id::Extended(ext), &[0; 2]).is_none());
}
