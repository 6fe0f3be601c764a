//! Indicator-pulse renderer for a [`SuiteReport`].
//!
//! The operator boundary is two LEDs, so the tally is encoded as timed
//! pulses: one pass-indicator pulse per passed test, a pause, one
//! fail-indicator pulse per failed test, a longer pause, repeat. The
//! renderer only consumes a finished report; it never re-polls the driver,
//! so a fault arriving afterwards is visible solely through the latched
//! fault state.
use crate::harness::SuiteReport;
use crate::transport::traits::indicator::Indicator;
use crate::transport::traits::link_timer::LinkTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pulse-train timing, in milliseconds.
pub struct PulseTiming {
    /// Indicator on-time of one pulse.
    pub pulse_on_ms: u32,
    /// Indicator off-time between pulses of one group.
    pub pulse_off_ms: u32,
    /// Pause between the pass group and the fail group.
    pub group_gap_ms: u32,
    /// Pause after a full cycle, before it repeats.
    pub cycle_gap_ms: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            pulse_on_ms: 150,
            pulse_off_ms: 150,
            group_gap_ms: 700,
            cycle_gap_ms: 1500,
        }
    }
}

/// Emits `count` pulses on one indicator.
pub async fn pulse<I, T>(indicator: &mut I, timer: &mut T, count: u32, timing: &PulseTiming)
where
    I: Indicator,
    T: LinkTimer,
{
    for _ in 0..count {
        indicator.set(true);
        timer.delay_ms(timing.pulse_on_ms).await;
        indicator.set(false);
        timer.delay_ms(timing.pulse_off_ms).await;
    }
}

/// Renders one full tally cycle: pass pulses, pause, fail pulses, pause.
pub async fn pulse_tally<P, F, T>(
    report: &SuiteReport,
    pass: &mut P,
    fail: &mut F,
    timer: &mut T,
    timing: &PulseTiming,
) where
    P: Indicator,
    F: Indicator,
    T: LinkTimer,
{
    pulse(pass, timer, report.passed(), timing).await;
    timer.delay_ms(timing.group_gap_ms).await;
    pulse(fail, timer, report.failed(), timing).await;
    timer.delay_ms(timing.cycle_gap_ms).await;
}

/// Terminal reporting loop. Repeats the tally cycle indefinitely; there is
/// no externally observable way to request a new run once entered.
pub async fn report_forever<P, F, T>(
    report: &SuiteReport,
    pass: &mut P,
    fail: &mut F,
    timer: &mut T,
    timing: &PulseTiming,
) -> !
where
    P: Indicator,
    F: Indicator,
    T: LinkTimer,
{
    #[cfg(feature = "defmt")]
    defmt::info!(
        "suite finished: {} passed, {} failed",
        report.passed(),
        report.failed()
    );

    loop {
        pulse_tally(report, pass, fail, timer, timing).await;
    }
}
