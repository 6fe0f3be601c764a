//! Binary status indicator abstraction: the operator boundary is two LEDs
//! and nothing else, so this is the only output seam the crate has.

/// One binary-state visual indicator (typically a GPIO-driven LED).
pub trait Indicator {
    /// Drives the indicator on or off.
    fn set(&mut self, on: bool);

    /// Inverts the indicator state.
    fn toggle(&mut self);
}
