//! Integration tests for the Reese signal chain.
//!
//! Spectral checks use `rustfft`: the end-to-end render must carry a 20 Hz
//! sub-octave and ±3.5 Hz ring-mod sidebands around a 40 Hz input, and the
//! pink noise source must fall at roughly −3 dB/octave.

use reese_core::Effect;
use reese_effects::{
    NoiseColor, NoiseGenerator, OctaveDivider, ParamSnapshot, ProcessingEngine, RingModulator,
    channel::RING_FILTER,
};
use rustfft::{FftPlanner, num_complex::Complex};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / SAMPLE_RATE))
        .collect()
}

/// Hann-windowed power spectrum, DC to Nyquist.
fn power_spectrum(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    let mut buffer: Vec<Complex<f32>> = signal
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let w = 0.5 * (1.0 - libm::cosf(TAU * i as f32 / n as f32));
            Complex::new(x * w, 0.0)
        })
        .collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);
    buffer.truncate(n / 2 + 1);
    buffer.iter().map(|c| c.norm_sqr()).collect()
}

/// Total power in `[low_hz, high_hz]`.
fn band_power(spectrum: &[f32], fft_size: usize, low_hz: f32, high_hz: f32) -> f32 {
    let bin_hz = SAMPLE_RATE / fft_size as f32;
    let lo = (low_hz / bin_hz).floor() as usize;
    let hi = ((high_hz / bin_hz).ceil() as usize).min(spectrum.len() - 1);
    spectrum[lo..=hi].iter().sum()
}

/// Render `seconds` of a 40 Hz sine through a fresh engine and return the
/// last `fft_size` samples.
fn render(params: &ParamSnapshot, fft_size: usize) -> Vec<f32> {
    let mut engine = ProcessingEngine::with_seed(2024);
    engine.prepare(SAMPLE_RATE).unwrap();
    engine.set_params(params);
    engine.reset();

    let settle = 24_000;
    let mut signal = generate_sine(40.0, settle + fft_size);
    for block in signal.chunks_mut(512) {
        engine.process_mono(block);
    }
    signal.split_off(settle)
}

fn reference_params() -> ParamSnapshot {
    ParamSnapshot {
        cutoff: 600.0,
        resonance: 0.7,
        ring_rate: 3.5,
        ring_depth: 0.5,
        octave_blend: 0.4,
        character: 0.6,
        drive: 1.2,
        volume: 0.0,
        stereo_width: 0.5,
        noise_amount: 0.0,
    }
}

// ============================================================================
// End-to-end
// ============================================================================

const FFT_SIZE: usize = 1 << 17;

#[test]
fn reference_render_is_bounded() {
    let out = render(&reference_params(), FFT_SIZE);
    for (i, &s) in out.iter().enumerate() {
        assert!(s.is_finite() && s.abs() <= 1.0, "sample {i} = {s}");
    }
    let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.05, "render is nearly silent: peak {peak}");
}

#[test]
fn reference_render_has_sub_octave() {
    let with_octave = power_spectrum(&render(&reference_params(), FFT_SIZE));

    let without = ParamSnapshot {
        octave_blend: 0.0,
        character: 0.0,
        ..reference_params()
    };
    let without_octave = power_spectrum(&render(&without, FFT_SIZE));

    let sub = band_power(&with_octave, FFT_SIZE, 19.0, 21.0);
    let sub_reference = band_power(&without_octave, FFT_SIZE, 19.0, 21.0);
    assert!(
        sub > 100.0 * sub_reference,
        "20 Hz power {sub} vs {sub_reference} without the octave path"
    );

    // The sub-octave is a dominant line, not buried in the floor
    let fundamental = band_power(&with_octave, FFT_SIZE, 39.0, 41.0);
    assert!(sub > fundamental * 0.01, "sub {sub}, fundamental {fundamental}");
}

#[test]
fn reference_render_has_ring_sidebands() {
    let modulated = power_spectrum(&render(&reference_params(), FFT_SIZE));

    let flat = ParamSnapshot {
        ring_depth: 0.0,
        ..reference_params()
    };
    let unmodulated = power_spectrum(&render(&flat, FFT_SIZE));

    for (lo, hi) in [(35.5, 37.5), (42.5, 44.5)] {
        let side = band_power(&modulated, FFT_SIZE, lo, hi);
        let side_reference = band_power(&unmodulated, FFT_SIZE, lo, hi);
        assert!(
            side > 20.0 * side_reference,
            "{lo}-{hi} Hz: {side} vs {side_reference} at depth 0"
        );
    }
}

#[test]
fn full_scale_input_at_every_extreme_stays_bounded() {
    let extremes = ParamSnapshot {
        cutoff: 2000.0,
        resonance: 0.95,
        ring_rate: 10.0,
        ring_depth: 1.0,
        octave_blend: 1.0,
        character: 1.0,
        drive: 2.0,
        volume: 6.0,
        stereo_width: 1.0,
        noise_amount: 1.0,
    };
    let mut engine = ProcessingEngine::with_seed(1);
    engine.set_params(&extremes);
    let mut left = generate_sine(40.0, 48_000);
    let mut right: Vec<f32> = left.iter().map(|s| s * 4.0).collect();
    for (l, r) in left.chunks_mut(256).zip(right.chunks_mut(256)) {
        engine.process_stereo(l, r);
    }
    assert!(left.iter().chain(&right).all(|s| s.abs() <= 1.0));
}

// ============================================================================
// Module-level behaviour
// ============================================================================

#[test]
fn octave_divider_output_sits_at_half_frequency() {
    let n = 1 << 15;
    let mut divider = OctaveDivider::new(SAMPLE_RATE);
    let input = generate_sine(300.0, n + 4800);
    let squares: Vec<f32> = input.iter().map(|&x| divider.step(x)).collect();
    let spectrum = power_spectrum(&squares[4800..]);

    let half = band_power(&spectrum, n, 145.0, 155.0);
    let original = band_power(&spectrum, n, 295.0, 305.0);
    assert!(half > 100.0 * original, "150 Hz {half}, 300 Hz {original}");
}

#[test]
fn ring_path_settles_to_zero_on_silence() {
    let mut engine = ProcessingEngine::with_seed(8);
    engine.set_params(&reference_params());
    let mut block = generate_sine(40.0, 4800);
    engine.process_mono(&mut block);

    let mut ring = RingModulator::with_seed(SAMPLE_RATE, 8);
    ring.set_depth(1.0);
    let mut filter = engine
        .channel(0)
        .and_then(|c| c.filter(RING_FILTER))
        .cloned()
        .unwrap();
    let mut last = 1.0;
    for _ in 0..200_000 {
        last = filter.process(ring.process(0.0));
    }
    assert_eq!(last, 0.0);
}

#[test]
fn pink_noise_falls_three_db_per_octave() {
    let slope = |color| {
        let segment = 4096;
        let segments = 64;
        let mut noise = NoiseGenerator::with_seed(77);
        noise.set_color(color);

        let mut averaged = vec![0.0f32; segment / 2 + 1];
        for _ in 0..segments {
            let block: Vec<f32> = (0..segment).map(|_| noise.next_sample()).collect();
            for (acc, p) in averaged.iter_mut().zip(power_spectrum(&block)) {
                *acc += p;
            }
        }

        // Mean PSD per octave band, 100 Hz .. 12.8 kHz
        let bin_hz = SAMPLE_RATE / segment as f32;
        let mut levels = Vec::new();
        let mut low = 100.0f32;
        while low < 12_800.0 {
            let lo = (low / bin_hz).ceil() as usize;
            let hi = (2.0 * low / bin_hz).floor() as usize;
            let mean = averaged[lo..hi].iter().sum::<f32>() / (hi - lo) as f32;
            levels.push(10.0 * libm::log10f(mean));
            low *= 2.0;
        }

        // Least-squares slope in dB per octave
        let n = levels.len() as f32;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = levels.iter().sum::<f32>() / n;
        let (num, den) = levels
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(num, den), (i, &y)| {
                let dx = i as f32 - mean_x;
                (num + dx * (y - mean_y), den + dx * dx)
            });
        num / den
    };

    let pink = slope(NoiseColor::Pink);
    let white = slope(NoiseColor::White);
    assert!((-4.0..=-2.0).contains(&pink), "pink slope {pink} dB/oct");
    assert!(white.abs() < 0.75, "white slope {white} dB/oct");
}
