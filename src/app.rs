//! Normal-mode application loop: periodic heartbeat transmission with
//! indicator feedback, plus the echo rule for inbound traffic.
use crate::driver::CanDriver;
use crate::error::DriverError;
use crate::transport::can_frame::CanFrame;
use crate::transport::traits::can_bus::CanBus;
use crate::transport::traits::indicator::Indicator;
use crate::transport::traits::link_timer::LinkTimer;

/// Heartbeat payload sent by the periodic loop.
pub const HEARTBEAT: [u8; 8] = [0xAA, 0xBB, 0xCC, 0xDD, 0x11, 0x22, 0x33, 0x44];

/// Applies the link's message-processing rule to one inbound frame:
/// frames arriving on the rx id are echoed back on the echo id; everything
/// else (echo responses included) is consumed without action.
///
/// Returns whether an echo was transmitted.
pub fn process_frame<B, const DEPTH: usize>(
    driver: &mut CanDriver<'_, B, DEPTH>,
    frame: &CanFrame,
) -> Result<bool, DriverError<B::Error>>
where
    B: CanBus,
{
    if frame.id == driver.config().rx_id {
        let echo_id = driver.config().echo_id;
        driver.send(echo_id, frame.payload())?;
        return Ok(true);
    }
    Ok(false)
}

/// Periodic send/receive loop, the non-test entry of the firmware.
///
/// Every `period_ms` a heartbeat is handed to the outgoing slot; between
/// heartbeats the receive path is polled. The status indicator toggles on
/// every transmission and every consumed frame. Transmit refusals are not
/// retried; bus health is left to the statistics.
pub async fn run_link_loop<B, T, I, const DEPTH: usize>(
    driver: &mut CanDriver<'_, B, DEPTH>,
    timer: &mut T,
    status: &mut I,
    period_ms: u32,
) -> !
where
    B: CanBus,
    T: LinkTimer,
    I: Indicator,
{
    // Poll the receive path a few times per heartbeat period.
    let poll_ms = (period_ms / 8).max(1);

    loop {
        let tx_id = driver.config().tx_id;
        if driver.send(tx_id, &HEARTBEAT).is_ok() {
            status.toggle();
        }

        let mut elapsed_ms = 0;
        while elapsed_ms < period_ms {
            if let Some(frame) = driver.receive() {
                status.toggle();
                let _ = process_frame(driver, &frame);
            }
            timer.delay_ms(poll_ms).await;
            elapsed_ms += poll_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanConfig;
    use crate::driver::LinkState;
    use crate::transport::can_id::CanId;
    use crate::transport::loopback::SoftLoopback;

    #[test]
    /// Frames on the rx id are echoed back on the echo id.
    fn test_echo_rule_on_rx_id() {
        let state = LinkState::new();
        let mut driver = CanDriver::new(SoftLoopback::new(), CanConfig::default(), &state);
        driver.init().unwrap();

        let inbound = CanFrame::new(CanId::new(0x456).unwrap(), &[0x10, 0x20]);
        assert!(process_frame(&mut driver, &inbound).unwrap());
        assert_eq!(driver.stats().sent, 1);
    }

    #[test]
    /// Echo responses and stray ids are consumed without action.
    fn test_no_echo_for_other_ids() {
        let state = LinkState::new();
        let mut driver = CanDriver::new(SoftLoopback::new(), CanConfig::default(), &state);
        driver.init().unwrap();

        let echo_response = CanFrame::new(CanId::new(0x789).unwrap(), &[0x10]);
        assert!(!process_frame(&mut driver, &echo_response).unwrap());

        let stray = CanFrame::new(CanId::new(0x001).unwrap(), &[]);
        assert!(!process_frame(&mut driver, &stray).unwrap());
        assert_eq!(driver.stats().sent, 0);
    }
}
