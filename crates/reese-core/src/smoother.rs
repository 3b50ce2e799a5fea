//! Linear parameter smoothing for zipper-free changes.
//!
//! Audio parameters need smooth transitions to avoid audible stepping
//! ("zipper noise") when a control value jumps. [`ParameterSmoother`] ramps
//! linearly from its current value to a new target over a fixed number of
//! samples, `⌈ramp_seconds × sample_rate⌉`, then lands on the target exactly.
//!
//! Every new target starts a fresh ramp from wherever the smoother currently
//! is, so a control thread can rewrite targets at any time (even mid-ramp)
//! without producing a discontinuity.
//!
//! ## Usage
//!
//! ```rust
//! use reese_core::ParameterSmoother;
//!
//! let mut cutoff = ParameterSmoother::new(500.0);
//! cutoff.reset(48000.0, 0.05); // 50 ms ramps
//!
//! cutoff.set_target(1000.0);
//! for _ in 0..2400 {
//!     let _value = cutoff.next_value();
//! }
//! assert_eq!(cutoff.current(), 1000.0);
//! ```

use libm::ceilf;

/// A parameter that ramps linearly toward its target.
///
/// # Invariants
///
/// - A ramp started by [`set_target`](Self::set_target) lasts exactly
///   `ramp_length()` calls to [`next_value`](Self::next_value)
/// - Values move monotonically toward the target during a ramp
/// - [`set_current_and_target`](Self::set_current_and_target) jumps with no ramp
#[derive(Debug, Clone)]
pub struct ParameterSmoother {
    current: f32,
    target: f32,
    step: f32,
    steps_remaining: u32,
    ramp_length: u32,
}

impl ParameterSmoother {
    /// Create a smoother resting at `initial`, with ramping disabled until
    /// [`reset`](Self::reset) configures a ramp length.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            steps_remaining: 0,
            ramp_length: 0,
        }
    }

    /// Configure the ramp length from a sample rate and ramp time.
    ///
    /// Any ramp in progress is abandoned: the smoother jumps to its target.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let samples = ceilf((ramp_seconds * sample_rate).max(0.0));
        self.ramp_length = samples as u32;
        self.set_current_and_target(self.target);
    }

    /// Number of samples a ramp takes to reach its target.
    pub fn ramp_length(&self) -> u32 {
        self.ramp_length
    }

    /// Start a ramp toward `target`.
    ///
    /// Re-issuing the current target is a no-op, so calling this once per
    /// block with an unchanged control value does not restart the ramp.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }

        self.target = target;

        if self.ramp_length == 0 {
            self.set_current_and_target(target);
            return;
        }

        self.steps_remaining = self.ramp_length;
        self.step = (self.target - self.current) / self.ramp_length as f32;
    }

    /// Jump immediately to `value` with no ramp.
    pub fn set_current_and_target(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.steps_remaining = 0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.steps_remaining == 0 {
            return self.target;
        }

        // Measured back from the target so rounding never carries a long
        // ramp past it.
        self.steps_remaining -= 1;
        self.current = self.target - self.step * self.steps_remaining as f32;
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a ramp is in progress.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.steps_remaining > 0
    }
}

impl Default for ParameterSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}
