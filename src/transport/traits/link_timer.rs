//! Asynchronous timer abstraction providing the timing primitives required
//! by the self-test harness and the application loop.
//!
//! Every bounded wait in the crate is expressed as a wall-clock millisecond
//! budget over this trait, never as an iteration count, so timeout behavior
//! does not depend on clock speed or optimization level.

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait LinkTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + 'a;
}

/// [`LinkTimer`] backed by the `embassy-time` driver of the target.
pub struct EmbassyTimer;

impl LinkTimer for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
