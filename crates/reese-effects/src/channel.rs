//! One audio channel's worth of Reese modules.
//!
//! ```text
//!            ┌──────────────────────────── clean ──────────────────────────┐
//!            │                                                             │
//! input ─────┼─ OctaveDivider ─┬─ SVF[0] LP ────────────── octave ─────────┤
//!            │                 └─ RingMod ── SVF[2] LP ─── combined ───────┤ Σ weights
//!            └─ RingMod ────────── SVF[1] LP ───────────── ringed ─────────┤
//!                                                                          ▼
//!                                    WaveShaper → Noise → × volume → soft limit
//! ```
//!
//! With [`CombinedModulator::Shared`] the same [`RingModulator`] serves both
//! ring paths, so its LFO advances twice per sample: once for `ringed`, once
//! for `combined`.

use reese_core::{Effect, StateVariableFilter, soft_limit};

use crate::config::{CombinedModulator, EngineConfig};
use crate::mix::MixLevels;
use crate::noise::NoiseGenerator;
use crate::octave_divider::OctaveDivider;
use crate::ring_mod::RingModulator;
use crate::waveshaper::WaveShaper;

/// Filter slot for the octave path.
pub const OCTAVE_FILTER: usize = 0;
/// Filter slot for the ring-mod path.
pub const RING_FILTER: usize = 1;
/// Filter slot for the ring-mod-over-octave path.
pub const COMBINED_FILTER: usize = 2;

// RNG stream ids within a channel.
const RING_STREAM: u64 = 1;
const COMBINED_RING_STREAM: u64 = 2;
const NOISE_STREAM: u64 = 3;

/// Derive an independent 64-bit seed for `stream` from `seed` (SplitMix64).
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Smoothed control values for one sample frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Filter cutoff in Hz.
    pub cutoff: f32,
    /// Filter resonance.
    pub resonance: f32,
    /// Ring modulator rate in Hz, before per-channel spread.
    pub ring_rate: f32,
    /// Ring modulator depth.
    pub ring_depth: f32,
    /// Sub-octave level.
    pub octave_blend: f32,
    /// Saturation pre-gain.
    pub drive: f32,
    /// Noise level.
    pub noise_amount: f32,
    /// Linear output gain.
    pub gain: f32,
    /// Path weights from the character control.
    pub levels: MixLevels,
}

/// Per-path outputs of one channel step, before mixing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathOutputs {
    /// Unprocessed input.
    pub clean: f32,
    /// Filtered octave divider output.
    pub octave: f32,
    /// Filtered ring-modulated input.
    pub ringed: f32,
    /// Filtered ring-modulated octave path.
    pub combined: f32,
}

impl PathOutputs {
    /// Weighted sum of the four paths.
    #[inline]
    pub fn mix(&self, levels: &MixLevels, octave_blend: f32) -> f32 {
        self.clean * levels.clean
            + self.octave * levels.sub_octave * octave_blend
            + self.ringed * levels.ring_mod
            + self.combined * levels.ring_mod_octave
    }
}

/// The full module set for one audio channel.
#[derive(Debug, Clone)]
pub struct Channel {
    octave: OctaveDivider,
    ring: RingModulator,
    combined_ring: Option<RingModulator>,
    filters: [StateVariableFilter; 3],
    shaper: WaveShaper,
    noise: NoiseGenerator,
}

impl Channel {
    /// Build a channel at `sample_rate`, configured from `config`, with every
    /// RNG derived from `seed`.
    pub fn new(sample_rate: f32, config: &EngineConfig, seed: u64) -> Self {
        let mut channel = Self {
            octave: OctaveDivider::new(sample_rate),
            ring: RingModulator::with_seed(sample_rate, derive_seed(seed, RING_STREAM)),
            combined_ring: None,
            filters: core::array::from_fn(|_| StateVariableFilter::new(sample_rate)),
            shaper: WaveShaper::new(),
            noise: NoiseGenerator::with_seed(derive_seed(seed, NOISE_STREAM)),
        };
        channel.configure(config, sample_rate, seed);
        channel
    }

    /// Apply the non-automatable settings.
    ///
    /// Switching to [`CombinedModulator::Independent`] creates the second
    /// modulator; this is a setup-time call, not for the audio thread.
    pub fn configure(&mut self, config: &EngineConfig, sample_rate: f32, seed: u64) {
        self.octave.set_sensitivity(config.octave_sensitivity);
        self.ring.set_wave_shape(config.ring_wave_shape);
        self.shaper.set_saturation_type(config.saturation);
        self.shaper.set_character(config.shaper_character);
        self.noise.set_color(config.noise_color);

        self.combined_ring = match config.combined_modulator {
            CombinedModulator::Shared => None,
            CombinedModulator::Independent => {
                let mut ring = self.combined_ring.take().unwrap_or_else(|| {
                    RingModulator::with_seed(sample_rate, derive_seed(seed, COMBINED_RING_STREAM))
                });
                ring.set_wave_shape(config.ring_wave_shape);
                Some(ring)
            }
        };
    }

    /// Reseed every RNG in the channel.
    pub fn reseed(&mut self, seed: u64) {
        self.ring.reseed(derive_seed(seed, RING_STREAM));
        if let Some(ring) = &mut self.combined_ring {
            ring.reseed(derive_seed(seed, COMBINED_RING_STREAM));
        }
        self.noise.reseed(derive_seed(seed, NOISE_STREAM));
    }

    /// Update every module's sample rate and recompute coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.octave.set_sample_rate(sample_rate);
        self.ring.set_sample_rate(sample_rate);
        if let Some(ring) = &mut self.combined_ring {
            ring.set_sample_rate(sample_rate);
        }
        for filter in &mut self.filters {
            filter.set_sample_rate(sample_rate);
        }
        self.shaper.set_sample_rate(sample_rate);
        self.noise.set_sample_rate(sample_rate);
    }

    /// Clear integrators, phases and edge flags. Settings are kept.
    pub fn reset(&mut self) {
        self.octave.reset();
        self.ring.reset();
        if let Some(ring) = &mut self.combined_ring {
            ring.reset();
        }
        for filter in &mut self.filters {
            filter.reset();
        }
        self.shaper.reset();
        self.noise.reset();
    }

    /// Push one frame's control values into the modules.
    ///
    /// `ring_rate` is this channel's rate after stereo spread.
    #[inline]
    pub fn apply_params(&mut self, params: &FrameParams, ring_rate: f32) {
        for filter in &mut self.filters {
            filter.set_cutoff(params.cutoff);
            filter.set_resonance(params.resonance);
        }
        self.ring.set_frequency(ring_rate);
        self.ring.set_depth(params.ring_depth);
        if let Some(ring) = &mut self.combined_ring {
            ring.set_frequency(ring_rate);
            ring.set_depth(params.ring_depth);
        }
        self.shaper.set_drive(params.drive);
        self.noise.set_amount(params.noise_amount);
    }

    /// Run the four parallel paths for one input sample.
    #[inline]
    pub fn paths(&mut self, input: f32) -> PathOutputs {
        let octave_raw = self.octave.process(input);
        let octave = self.filters[OCTAVE_FILTER].process_sample(octave_raw).low_pass;

        let ring_raw = self.ring.process(input);
        let ringed = self.filters[RING_FILTER].process_sample(ring_raw).low_pass;

        let combined_raw = match &mut self.combined_ring {
            Some(ring) => ring.process(octave),
            None => self.ring.process(octave),
        };
        let combined = self.filters[COMBINED_FILTER]
            .process_sample(combined_raw)
            .low_pass;

        PathOutputs {
            clean: input,
            octave,
            ringed,
            combined,
        }
    }

    /// Process one sample through the whole chain.
    #[inline]
    pub fn process(&mut self, input: f32, params: &FrameParams, ring_rate: f32) -> f32 {
        self.apply_params(params, ring_rate);
        let mixed = self.paths(input).mix(&params.levels, params.octave_blend);
        let shaped = self.shaper.process(mixed);
        let noisy = self.noise.apply(shaped);
        soft_limit(noisy * params.gain)
    }

    /// Filter in slot `index` ([`OCTAVE_FILTER`], [`RING_FILTER`],
    /// [`COMBINED_FILTER`]).
    pub fn filter(&self, index: usize) -> Option<&StateVariableFilter> {
        self.filters.get(index)
    }

    /// The ring modulator feeding the ring-mod path.
    pub fn ring_modulator(&self) -> &RingModulator {
        &self.ring
    }

    /// The dedicated combined-path modulator, if configured.
    pub fn combined_ring_modulator(&self) -> Option<&RingModulator> {
        self.combined_ring.as_ref()
    }

    /// The saturation stage.
    pub fn wave_shaper(&self) -> &WaveShaper {
        &self.shaper
    }

    /// The noise source.
    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }

    /// The octave divider.
    pub fn octave_divider(&self) -> &OctaveDivider {
        &self.octave
    }
}
