//! Engine configuration.
//!
//! Settings that shape the signal chain but are not exposed as automatable
//! parameters: smoothing time, curve choices, the divider's trigger
//! sensitivity, RNG seeding and the combined-path modulator topology.

use crate::noise::NoiseColor;
use crate::octave_divider::DEFAULT_SENSITIVITY;
use crate::ring_mod::RingWaveShape;
use crate::waveshaper::SaturationType;

/// Default parameter ramp time in seconds.
pub const DEFAULT_SMOOTHING_SECONDS: f32 = 0.05;

/// Which ring modulator drives the ring-mod-over-octave path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombinedModulator {
    /// One modulator per channel, invoked for both the ring-mod path and the
    /// combined path. Its LFO advances twice per sample.
    #[default]
    Shared,
    /// A second modulator per channel drives the combined path, so each path
    /// follows its own LFO trajectory at the set rate.
    Independent,
}

/// Non-automatable engine settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Parameter ramp time in seconds.
    pub smoothing_seconds: f32,
    /// LFO waveform of every ring modulator.
    pub ring_wave_shape: RingWaveShape,
    /// Saturation curve.
    pub saturation: SaturationType,
    /// Saturation character (multi-stage only).
    pub shaper_character: f32,
    /// Noise spectrum.
    pub noise_color: NoiseColor,
    /// Octave divider trigger sensitivity.
    pub octave_sensitivity: f32,
    /// Fixed RNG seed for reproducible output.
    pub seed: Option<u64>,
    /// Combined-path modulator topology.
    pub combined_modulator: CombinedModulator,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_seconds: DEFAULT_SMOOTHING_SECONDS,
            ring_wave_shape: RingWaveShape::default(),
            saturation: SaturationType::default(),
            shaper_character: 0.5,
            noise_color: NoiseColor::default(),
            octave_sensitivity: DEFAULT_SENSITIVITY,
            seed: None,
            combined_modulator: CombinedModulator::default(),
        }
    }
}

impl EngineConfig {
    /// Copy with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Copy with numeric fields forced into range.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        out.smoothing_seconds = if self.smoothing_seconds.is_finite() {
            self.smoothing_seconds.clamp(0.0, 1.0)
        } else {
            DEFAULT_SMOOTHING_SECONDS
        };
        out.shaper_character = if self.shaper_character.is_nan() {
            0.5
        } else {
            self.shaper_character.clamp(0.0, 1.0)
        };
        out.octave_sensitivity = if self.octave_sensitivity.is_nan() {
            DEFAULT_SENSITIVITY
        } else {
            self.octave_sensitivity.clamp(0.0, 1.0)
        };
        out
    }
}
