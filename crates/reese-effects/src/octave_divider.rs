//! Analog-style octave divider.
//!
//! Models the classic comparator + flip-flop sub-octave circuit found in
//! bass synths and octave pedals:
//!
//! ```text
//! input → Schmitt trigger → rising edge → T flip-flop (÷2) → ±1 → one-pole 300 Hz → out
//!                                               └→ T flip-flop (÷4)
//! ```
//!
//! The Schmitt window rejects noise around zero: the comparator only goes
//! HIGH above `threshold + hysteresis` and only goes LOW below
//! `−(threshold + hysteresis)`, holding its state in between. Each rising
//! edge toggles the ÷2 flip-flop, so a periodic input at `f` produces a
//! square wave at `f/2`. The ÷4 stage toggles whenever ÷2 falls and is
//! tracked for a future second sub-octave tap.
//!
//! The one-pole smoother stands in for the RC network that rounds the
//! square's edges in hardware.

use reese_core::{Effect, OnePole};

/// Cutoff of the output smoothing filter.
pub const SMOOTHING_HZ: f32 = 300.0;

/// Default sensitivity (threshold 0.005, hysteresis 0.002).
pub const DEFAULT_SENSITIVITY: f32 = 0.375;

/// Zero-crossing frequency divider with smoothed square output.
///
/// ## Parameters
///
/// - `sensitivity`: 0.0 (tight, threshold 0.002) to 1.0 (loose, threshold 0.01)
///
/// # Example
///
/// ```rust
/// use reese_core::Effect;
/// use reese_effects::OctaveDivider;
///
/// let mut divider = OctaveDivider::new(48000.0);
/// let out = divider.process(0.5);
/// assert!(out.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct OctaveDivider {
    sensitivity: f32,
    threshold: f32,
    hysteresis: f32,

    // Comparator
    previous_high: bool,
    current_high: bool,

    // Flip-flops
    divide_by_2: bool,
    divide_by_4: bool,

    smoothing: OnePole,
}

impl Default for OctaveDivider {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl OctaveDivider {
    /// Create a divider at the given sample rate with default sensitivity.
    pub fn new(sample_rate: f32) -> Self {
        let mut divider = Self {
            sensitivity: 0.0,
            threshold: 0.0,
            hysteresis: 0.0,
            previous_high: false,
            current_high: false,
            divide_by_2: false,
            divide_by_4: false,
            smoothing: OnePole::new(sample_rate, SMOOTHING_HZ),
        };
        divider.set_sensitivity(DEFAULT_SENSITIVITY);
        divider
    }

    /// Set trigger sensitivity (clamped to 0–1).
    ///
    /// `threshold = 0.002 + 0.008·s`, `hysteresis = 0.4·threshold`.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.clamp(0.0, 1.0);
        self.threshold = 0.002 + self.sensitivity * 0.008;
        self.hysteresis = self.threshold * 0.4;
    }

    /// Current sensitivity.
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Comparator threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Comparator hysteresis.
    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    /// Unsmoothed ÷2 output, ±1.0.
    #[inline]
    pub fn square(&self) -> f32 {
        if self.divide_by_2 { 1.0 } else { -1.0 }
    }

    /// State of the ÷4 flip-flop.
    pub fn divide_by_4(&self) -> bool {
        self.divide_by_4
    }

    /// Run the comparator and flip-flops for one sample without smoothing.
    ///
    /// Returns the ÷2 square, ±1.0.
    #[inline]
    pub fn step(&mut self, input: f32) -> f32 {
        let window = self.threshold + self.hysteresis;
        self.current_high = if input > window {
            true
        } else if input < -window {
            false
        } else {
            self.previous_high
        };

        if self.current_high && !self.previous_high {
            self.divide_by_2 = !self.divide_by_2;
            if !self.divide_by_2 {
                self.divide_by_4 = !self.divide_by_4;
            }
        }

        self.previous_high = self.current_high;
        self.square()
    }
}

impl Effect for OctaveDivider {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let square = self.step(input);
        self.smoothing.process(square)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.smoothing.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.previous_high = false;
        self.current_high = false;
        self.divide_by_2 = false;
        self.divide_by_4 = false;
        self.smoothing.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;

    fn count_rising(signal: impl Iterator<Item = f32>) -> usize {
        let mut previous = -1.0;
        let mut count = 0;
        for s in signal {
            if s > 0.0 && previous <= 0.0 {
                count += 1;
            }
            previous = s;
        }
        count
    }

    #[test]
    fn sensitivity_mapping() {
        let mut divider = OctaveDivider::new(48000.0);
        assert!((divider.threshold() - 0.005).abs() < 1e-7);
        assert!((divider.hysteresis() - 0.002).abs() < 1e-7);

        divider.set_sensitivity(0.0);
        assert!((divider.threshold() - 0.002).abs() < 1e-7);
        divider.set_sensitivity(1.0);
        assert!((divider.threshold() - 0.01).abs() < 1e-7);
        assert!((divider.hysteresis() - 0.004).abs() < 1e-7);

        divider.set_sensitivity(5.0);
        assert_eq!(divider.sensitivity(), 1.0);
    }

    #[test]
    fn halves_sine_frequency() {
        let sr = 48000.0;
        let mut divider = OctaveDivider::new(sr);
        let squares: Vec<f32> = (0..48000)
            .map(|n| divider.step(0.5 * libm::sinf(TAU * 100.0 * n as f32 / sr)))
            .collect();

        for &s in &squares {
            assert!(s == 1.0 || s == -1.0);
        }
        // 100 input cycles → 50 output cycles
        let cycles = count_rising(squares.into_iter());
        assert!((49..=51).contains(&cycles), "got {cycles} cycles");
    }

    #[test]
    fn quarter_stage_toggles_at_half_rate() {
        let sr = 48000.0;
        let mut divider = OctaveDivider::new(sr);
        let mut quarter = Vec::with_capacity(48000);
        for n in 0..48000 {
            divider.step(0.5 * libm::sinf(TAU * 200.0 * n as f32 / sr));
            quarter.push(if divider.divide_by_4() { 1.0 } else { -1.0 });
        }
        let cycles = count_rising(quarter.into_iter());
        assert!((49..=51).contains(&cycles), "got {cycles} cycles");
    }

    #[test]
    fn hysteresis_rejects_small_noise() {
        let mut divider = OctaveDivider::new(48000.0);
        let first = divider.step(0.0);
        for n in 0..10_000 {
            let wobble = if n % 2 == 0 { 0.006 } else { -0.006 };
            assert_eq!(divider.step(wobble), first);
        }
    }

    #[test]
    fn output_is_smoothed() {
        let mut divider = OctaveDivider::new(48000.0);
        // First rising edge flips ÷2 to HIGH; the smoother lags behind.
        let out = divider.process(1.0);
        assert!(out > -1.0 && out < 1.0, "got {out}");
    }

    #[test]
    fn silence_settles_to_constant() {
        let mut divider = OctaveDivider::new(48000.0);
        let mut out = 0.0;
        for _ in 0..48000 {
            out = divider.process(0.0);
        }
        assert!((out + 1.0).abs() < 1e-4, "got {out}");
    }

    #[test]
    fn reset_clears_state() {
        let mut divider = OctaveDivider::new(48000.0);
        divider.step(1.0);
        assert_eq!(divider.square(), 1.0);
        divider.reset();
        assert_eq!(divider.square(), -1.0);
        assert!(!divider.divide_by_4());
    }
}
