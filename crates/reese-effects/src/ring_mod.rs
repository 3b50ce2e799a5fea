//! Sub-audio ring modulator.
//!
//! The "beating" of a Reese bass comes from two detuned oscillators drifting
//! in and out of phase. This module fakes that movement by amplitude
//! modulating the signal with a slow (0.5–10 Hz) LFO.
//!
//! ## Signal Flow
//!
//! ```text
//! lfo       = shape(wrap(phase + offset))          bipolar, [-1, 1]
//! unipolar  = (lfo + 1) / 2                        [0, 1]
//! modulator = 1 − depth·(1 − unipolar)             depth 0 → 1.0
//! output    = input × modulator
//! ```
//!
//! At `depth = 0.0` the modulator is exactly 1.0 and the module is an
//! identity. At `depth = 1.0` the modulator sweeps the full 0–1 range.
//!
//! ## Drift
//!
//! Each time the phase accumulator wraps, a fresh offset is drawn uniformly
//! from ±0.05 cycles, so consecutive LFO cycles never line up exactly. This
//! stands in for the free-running drift of analog oscillators.

use core::f32::consts::TAU;
use libm::{sinf, tanhf};
use reese_core::{Effect, Xorshift32};

/// Lowest LFO rate in Hz.
pub const MIN_RATE_HZ: f32 = 0.5;
/// Highest LFO rate in Hz.
pub const MAX_RATE_HZ: f32 = 10.0;
/// Per-cycle phase offset is drawn from ±this many cycles.
pub const PHASE_DRIFT: f32 = 0.05;

/// LFO waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RingWaveShape {
    /// Pure sine.
    Sine,
    /// Sine with a 15 % third harmonic, soft-clipped, like a slightly
    /// overdriven analog VCO.
    #[default]
    ModifiedSine,
    /// Linear triangle.
    Triangle,
}

impl RingWaveShape {
    /// Evaluate the waveform at `phase` in [0, 1). Returns a value in [-1, 1].
    #[inline]
    pub fn evaluate(self, phase: f32) -> f32 {
        match self {
            RingWaveShape::Sine => sinf(TAU * phase),
            RingWaveShape::ModifiedSine => {
                let fundamental = sinf(TAU * phase);
                let third = sinf(3.0 * TAU * phase);
                tanhf((fundamental + 0.15 * third) * 1.3)
            }
            RingWaveShape::Triangle => {
                if phase < 0.5 {
                    phase * 4.0 - 1.0
                } else {
                    3.0 - phase * 4.0
                }
            }
        }
    }
}

/// Depth-controlled LFO amplitude modulator.
///
/// ## Parameters
///
/// - `frequency`: 0.5 to 10.0 Hz (default 3.0)
/// - `depth`: 0.0 to 1.0 (default 0.5)
/// - `wave_shape`: [`RingWaveShape`] (default modified sine)
///
/// # Example
///
/// ```rust
/// use reese_core::Effect;
/// use reese_effects::RingModulator;
///
/// let mut ring = RingModulator::with_seed(48000.0, 1);
/// ring.set_depth(0.0);
/// assert_eq!(ring.process(0.3), 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct RingModulator {
    sample_rate: f32,
    frequency: f32,
    depth: f32,
    wave_shape: RingWaveShape,

    /// Accumulator in [0, 1).
    phase: f32,
    /// Per-cycle offset in ±[`PHASE_DRIFT`].
    phase_offset: f32,
    rng: Xorshift32,
}

impl Default for RingModulator {
    fn default() -> Self {
        Self::with_seed(48000.0, 0)
    }
}

impl RingModulator {
    /// Create a modulator with a fixed RNG seed.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Self {
        Self {
            sample_rate,
            frequency: 3.0,
            depth: 0.5,
            wave_shape: RingWaveShape::default(),
            phase: 0.0,
            phase_offset: 0.0,
            rng: Xorshift32::new(seed),
        }
    }

    /// Replace the RNG state.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Xorshift32::new(seed);
    }

    /// Set LFO rate in Hz (clamped to 0.5–10).
    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
    }

    /// Current LFO rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set modulation depth (clamped to 0–1).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    /// Current depth.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Set the LFO waveform.
    pub fn set_wave_shape(&mut self, shape: RingWaveShape) {
        self.wave_shape = shape;
    }

    /// Current LFO waveform.
    pub fn wave_shape(&self) -> RingWaveShape {
        self.wave_shape
    }

    /// Phase accumulator, [0, 1).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Offset drawn at the last wrap.
    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    /// Bipolar LFO value at the current phase plus offset.
    #[inline]
    pub fn lfo_value(&self) -> f32 {
        let mut phase = self.phase + self.phase_offset;
        if phase >= 1.0 {
            phase -= 1.0;
        } else if phase < 0.0 {
            phase += 1.0;
        }
        self.wave_shape.evaluate(phase)
    }

    /// Gain the next sample will be multiplied by, in [1 − depth, 1].
    #[inline]
    pub fn modulator(&self) -> f32 {
        let unipolar = (self.lfo_value() + 1.0) * 0.5;
        1.0 - self.depth * (1.0 - unipolar)
    }

    #[inline]
    fn advance(&mut self) {
        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            self.phase_offset = self.rng.next_range(-PHASE_DRIFT, PHASE_DRIFT);
        }
    }
}

impl Effect for RingModulator {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = input * self.modulator();
        self.advance();
        output
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    fn reset(&mut self) {
        self.phase = 0.0;
        self.phase_offset = 0.0;
    }
}
