//! Driver core tests against the software loopback backend.
use super::*;
use crate::transport::loopback::SoftLoopback;

fn id(raw: u32) -> CanId {
    CanId::new(raw).unwrap()
}

fn loopback_driver(state: &LinkState) -> CanDriver<'_, SoftLoopback> {
    let config = CanConfig::default().with_loopback(true);
    let mut driver = CanDriver::new(SoftLoopback::new(), config, state);
    driver.init().expect("loopback backend cannot fail init");
    driver
}

#[test]
/// Fresh driver: statistics reachable, all counters zero.
fn test_init_stats_zero() {
    let state = LinkState::new();
    let driver = loopback_driver(&state);
    assert_eq!(driver.stats(), CanStats::default());
    assert!(!state.fault_latched());
}

#[test]
/// `send` counts exactly one per call and accepts zero-length payloads.
fn test_send_increments_sent() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[1, 2, 3]).unwrap();
    assert_eq!(driver.stats().sent, 1);

    driver.send(id(0x123), &[]).unwrap();
    assert_eq!(driver.stats().sent, 2);
    assert_eq!(driver.stats().received, 0);
}

#[test]
/// Oversized payloads reach the bus clamped to eight zero-padded bytes.
fn test_send_clamps_payload() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    let long = [0x42u8; 12];
    driver.send(id(0x123), &long).unwrap();

    let frame = driver.receive().expect("loopback must deliver the frame");
    assert_eq!(frame.len, 8);
    assert_eq!(frame.data, [0x42; 8]);
}

#[test]
/// Short payloads arrive zero-filled past `len` whatever the caller buffer held.
fn test_send_zero_pads_tail() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[0xFF, 0xFF]).unwrap();
    let frame = driver.receive().unwrap();
    assert_eq!(frame.len, 2);
    assert_eq!(frame.data, [0xFF, 0xFF, 0, 0, 0, 0, 0, 0]);
}

#[test]
/// `receive` with nothing pending is a no-op returning `None`.
fn test_receive_empty_returns_none() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);
    assert!(driver.receive().is_none());
    assert_eq!(driver.stats(), CanStats::default());
}

#[test]
/// A latched frame is consumed exactly once.
fn test_receive_consumes_once() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[0xAB]).unwrap();
    assert!(driver.receive().is_some());
    assert!(driver.receive().is_none());

    let stats = driver.stats();
    assert_eq!(stats.sent, 1);
    assert_eq!(stats.received, 1);
}

#[test]
/// Loopback round-trip of the reference pattern.
fn test_loopback_roundtrip_pattern() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    let pattern = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
    driver.send(id(0x123), &pattern).unwrap();

    let frame = driver.receive().expect("pattern must come back");
    assert_eq!(frame.len, 8);
    assert_eq!(frame.payload(), &pattern[..]);
}

#[test]
/// Arrival timestamps are strictly increasing per latched frame.
fn test_timestamps_monotonic() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[1]).unwrap();
    let first = driver.receive().unwrap();
    driver.send(id(0x123), &[2]).unwrap();
    let second = driver.receive().unwrap();
    assert!(second.timestamp > first.timestamp);
}

#[test]
/// Depth-1 mailbox: a burst keeps only the newest frame; drops are counted.
fn test_mailbox_overwrite_policy() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[1]).unwrap();
    driver.send(id(0x123), &[2]).unwrap();
    driver.send(id(0x123), &[3]).unwrap();

    let frame = driver.receive().expect("newest frame must survive");
    assert_eq!(frame.data[0], 3);
    assert!(driver.receive().is_none());
    assert_eq!(state.dropped_frames(), 2);

    // Drops are not faults and are not received traffic.
    let stats = driver.stats();
    assert_eq!(stats.received, 1);
    assert_eq!(stats.errors, 0);
}

#[test]
/// Non-fatal fault classes: counted, recorded, latched, no recovery.
fn test_warning_fault_reported_only() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver
        .bus_mut()
        .inject_fault(ErrorStatus::TX_WARN | ErrorStatus::RX_ERROR_PASSIVE)
        .unwrap();
    driver.service();

    let stats = driver.stats();
    assert_eq!(stats.errors, 1);
    assert_eq!(
        stats.last_error,
        ErrorStatus::TX_WARN | ErrorStatus::RX_ERROR_PASSIVE
    );
    assert!(state.fault_latched());

    // One configure from init; no recovery for non-fatal classes.
    assert_eq!(driver.into_bus().configured_count(), 1);
}

#[test]
/// Bus-off triggers exactly one re-initialization and leaves traffic
/// counters untouched.
fn test_bus_off_reinitializes() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.bus_mut().inject_fault(ErrorStatus::BUS_OFF).unwrap();
    driver.service();

    let stats = driver.stats();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.last_error, ErrorStatus::BUS_OFF);
    assert_eq!(stats.sent, 0);
    assert_eq!(stats.received, 0);
    assert!(state.fault_latched());
    assert_eq!(driver.into_bus().configured_count(), 2);
}

#[test]
/// The fault latch survives until explicitly cleared.
fn test_fault_latch_explicit_clear() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.bus_mut().inject_fault(ErrorStatus::RX_WARN).unwrap();
    driver.service();
    assert!(state.fault_latched());

    // Healthy traffic does not clear it.
    driver.send(id(0x123), &[1]).unwrap();
    driver.receive();
    assert!(state.fault_latched());

    state.clear_fault();
    assert!(!state.fault_latched());
}

#[test]
/// Re-init drops stale latched frames but preserves statistics.
fn test_reinit_drains_mailbox_keeps_stats() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[7]).unwrap();
    driver.service();
    driver.init().unwrap();

    assert!(driver.receive().is_none());
    assert_eq!(driver.stats().sent, 1);
}

#[test]
/// Statistics reset is an explicit state action, not a driver behavior.
fn test_explicit_stats_reset() {
    let state = LinkState::new();
    let mut driver = loopback_driver(&state);

    driver.send(id(0x123), &[1]).unwrap();
    driver.receive();
    state.stats().reset();
    assert_eq!(driver.stats(), CanStats::default());
}
