//! Property-based tests for reese-core DSP primitives.
//!
//! Tests filter stability, smoother ramp timing, and limiter bounds using
//! proptest for randomized input generation.

use proptest::prelude::*;
use reese_core::{
    Effect, OnePole, ParameterSmoother, StateVariableFilter, SvfOutputs, soft_clip_with_threshold,
    soft_limit,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// For any settable cutoff, resonance and drive, the SVF produces finite,
    /// bounded output on all three taps for random input.
    #[test]
    fn svf_stability(
        cutoff in 20.0f32..20000.0f32,
        resonance in 0.0f32..=0.95f32,
        drive in 0.0f32..=2.0f32,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1024),
    ) {
        let mut svf = StateVariableFilter::new(sample_rate);
        svf.set_cutoff(cutoff);
        svf.set_resonance(resonance);
        svf.set_drive(drive);

        for &sample in &input {
            let SvfOutputs { low_pass, band_pass, high_pass } = svf.process_sample(sample);
            prop_assert!(
                low_pass.abs() < 100.0 && band_pass.abs() < 100.0 && high_pass.abs() < 100.0,
                "SVF (fc={}, res={}, drive={}, sr={}) diverged: lp={} bp={} hp={}",
                cutoff, resonance, drive, sample_rate, low_pass, band_pass, high_pass
            );
        }
    }

    /// A ramp of `⌈T·R⌉` samples lands on the target exactly and never moves
    /// away from it along the way.
    #[test]
    fn smoother_ramp_is_bounded_and_monotonic(
        initial in -100.0f32..100.0f32,
        target in -100.0f32..100.0f32,
        sample_rate in prop::sample::select(vec![44100.0f32, 48000.0, 96000.0]),
        ramp_ms in 1.0f32..1000.0f32,
    ) {
        let mut param = ParameterSmoother::new(initial);
        param.reset(sample_rate, ramp_ms / 1000.0);
        param.set_target(target);

        let steps = param.ramp_length();
        prop_assert_eq!(steps, libm::ceilf(ramp_ms / 1000.0 * sample_rate) as u32);

        let direction = if target >= initial { 1.0 } else { -1.0 };
        let mut previous = initial;
        for _ in 0..steps {
            let value = param.next_value();
            prop_assert!(
                (value - previous) * direction >= 0.0,
                "moved away from target: {} -> {} (target {})",
                previous, value, target
            );
            prop_assert!(
                (target - value) * direction >= 0.0,
                "passed target: {} (target {})",
                value, target
            );
            previous = value;
        }
        prop_assert_eq!(param.current(), target);
        prop_assert!(!param.is_smoothing());
    }

    /// The output limiter is transparent below 0.9 and bounded by 1.0 above.
    #[test]
    fn soft_limit_bounds(x in prop::num::f32::NORMAL) {
        let y = soft_limit(x);
        if x.abs() < 0.9 {
            prop_assert_eq!(y, x);
        } else {
            prop_assert!(y.abs() >= 0.9 && y.abs() <= 1.0, "limit({}) = {}", x, y);
            prop_assert_eq!(y.signum(), x.signum());
        }
        prop_assert_eq!(soft_limit(-x), -y);
    }

    /// Threshold soft clip never exceeds `threshold + 0.3`.
    #[test]
    fn threshold_clip_ceiling(x in -1000.0f32..1000.0f32, threshold in 0.1f32..1.0f32) {
        let y = soft_clip_with_threshold(x, threshold);
        prop_assert!(y.abs() <= threshold + 0.3 + 1e-6);
    }

    /// The one-pole smoother never leaves the convex hull of its input.
    #[test]
    fn one_pole_stays_within_input_range(
        freq in 10.0f32..5000.0f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 512),
    ) {
        let mut lp = OnePole::new(48000.0, freq);
        for &sample in &input {
            let out = lp.process(sample);
            prop_assert!(out.abs() <= 1.0 + 1e-6);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Once the input goes silent, every SVF tap settles to exactly zero.
    #[test]
    fn svf_silence_settles_to_zero(
        cutoff in 20.0f32..20000.0f32,
        resonance in 0.0f32..=0.95f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 256),
    ) {
        let mut svf = StateVariableFilter::new(48000.0);
        svf.set_cutoff(cutoff);
        svf.set_resonance(resonance);
        for &sample in &input {
            svf.process_sample(sample);
        }

        let mut out = SvfOutputs::default();
        for _ in 0..500_000 {
            out = svf.process_sample(0.0);
            if out == SvfOutputs::default() {
                break;
            }
        }
        prop_assert_eq!(out, SvfOutputs::default());
    }
}

#[test]
fn svf_effect_trait_block_matches_sample_loop() {
    let mut a = StateVariableFilter::new(48000.0);
    let mut b = StateVariableFilter::new(48000.0);
    a.set_cutoff(900.0);
    b.set_cutoff(900.0);

    let input: Vec<f32> = (0..256).map(|i| libm::sinf(i as f32 * 0.05)).collect();
    let mut block = vec![0.0; input.len()];
    a.process_block(&input, &mut block);

    for (&x, &y) in input.iter().zip(&block) {
        assert_eq!(b.process(x), y);
    }
}
