//! Test doubles for the timer and indicator seams during integration tests.
use canlink::transport::traits::indicator::Indicator;
use canlink::transport::traits::link_timer::LinkTimer;
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl LinkTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Indicator double counting pulses and tracking the current level.
pub struct CountingIndicator {
    pub on: bool,
    /// Number of off→on transitions observed.
    pub pulses: u32,
    /// Number of `toggle` calls observed.
    pub toggles: u32,
}

#[allow(dead_code)]
impl CountingIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for CountingIndicator {
    fn set(&mut self, on: bool) {
        if on && !self.on {
            self.pulses += 1;
        }
        self.on = on;
    }

    fn toggle(&mut self) {
        self.on = !self.on;
        self.toggles += 1;
        if self.on {
            self.pulses += 1;
        }
    }
}

#[allow(dead_code)]
/// Suite timing scaled down so integration tests stay fast.
pub fn fast_timing() -> canlink::harness::SuiteTiming {
    canlink::harness::SuiteTiming {
        startup_ms: 5,
        settle_ms: 2,
        receive_timeout_ms: 40,
        poll_interval_ms: 1,
        inter_message_ms: 1,
    }
}
