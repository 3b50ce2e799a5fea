//! Block-synchronous Reese processing engine.
//!
//! The engine owns two [`Channel`]s and ten [`ParameterSmoother`]s. At the
//! start of every block it turns the latest [`ParamSnapshot`] into smoother
//! targets; for every sample frame it advances all smoothers once, derives
//! the mix weights from `character`, and runs each channel through the
//! chain.
//!
//! Parameter writes never jump the audio: a new value only becomes a ramp
//! target, so a control thread may update values at any time, including
//! between reads of independent parameters.
//!
//! # Example
//!
//! ```rust
//! use reese_effects::{ProcessingEngine, ReeseParam};
//!
//! let mut engine = ProcessingEngine::with_seed(1);
//! engine.prepare(48000.0).unwrap();
//! engine.set_param(ReeseParam::Cutoff, 800.0);
//!
//! let mut left = vec![0.25f32; 256];
//! let mut right = vec![0.25f32; 256];
//! engine.process_stereo(&mut left, &mut right);
//! assert!(left.iter().all(|s| s.abs() <= 1.0));
//! ```

use reese_core::{ParameterSmoother, db_to_linear};

use crate::channel::{Channel, FrameParams, derive_seed};
use crate::config::EngineConfig;
use crate::error::{EngineError, validate_sample_rate};
use crate::mix::MixLevels;
use crate::params::{ParamSnapshot, ReeseParam, SharedParams};

/// Number of channels the engine processes.
pub const MAX_CHANNELS: usize = 2;

/// Sample rate a freshly built engine is configured for.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// Ring rate increase per channel index at full stereo width.
const STEREO_RATE_SPREAD: f32 = 0.05;

/// Seed used when no seed is configured and no entropy source is available.
#[cfg(not(feature = "std"))]
const FALLBACK_SEED: u64 = 0x5EED_0F_BA55;

#[cfg(feature = "std")]
fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(not(feature = "std"))]
fn entropy_seed() -> u64 {
    FALLBACK_SEED
}

/// Stereo Reese bass processor.
#[derive(Debug, Clone)]
pub struct ProcessingEngine {
    sample_rate: f32,
    config: EngineConfig,
    seed: u64,
    params: ParamSnapshot,
    smoothers: [ParameterSmoother; ReeseParam::COUNT],
    channels: [Channel; MAX_CHANNELS],
}

impl Default for ProcessingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingEngine {
    /// Create an engine with default configuration.
    ///
    /// With the `std` feature the RNGs are seeded from system entropy.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a fixed seed; output is fully reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(EngineConfig::default().with_seed(seed))
    }

    /// Create an engine from a configuration, ready to run at 48 kHz.
    pub fn with_config(config: EngineConfig) -> Self {
        let config = config.sanitized();
        let seed = config.seed.unwrap_or_else(entropy_seed);
        let params = ParamSnapshot::default();
        let smoothers = ReeseParam::ALL.map(|p| {
            let mut smoother = ParameterSmoother::new(params.get(p));
            smoother.reset(DEFAULT_SAMPLE_RATE, config.smoothing_seconds);
            smoother
        });
        let channels = core::array::from_fn(|i| {
            Channel::new(DEFAULT_SAMPLE_RATE, &config, derive_seed(seed, i as u64))
        });

        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            config,
            seed,
            params,
            smoothers,
            channels,
        }
    }

    /// Configure for `sample_rate`, recompute coefficients and clear all
    /// state. Smoothers jump to the current parameter values.
    ///
    /// Call only while audio is stopped.
    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), EngineError> {
        let sample_rate = validate_sample_rate(sample_rate).inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::warn!("rejected sample rate: {_e}");
        })?;

        self.sample_rate = sample_rate;
        for channel in &mut self.channels {
            channel.set_sample_rate(sample_rate);
        }
        for smoother in &mut self.smoothers {
            smoother.reset(sample_rate, self.config.smoothing_seconds);
        }
        self.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            ramp_samples = self.smoothers[0].ramp_length(),
            seed = self.seed,
            "engine prepared"
        );
        Ok(())
    }

    /// Clear integrators, phases and edge flags in every channel, and snap
    /// the smoothers to the current parameter values. Parameters and
    /// configuration are kept.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
        for param in ReeseParam::ALL {
            self.smoothers[param.index()].set_current_and_target(self.params.get(param));
        }
    }

    /// Replace the configuration. A configured seed reseeds every RNG.
    ///
    /// Call only while audio is stopped.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config.sanitized();
        if let Some(seed) = self.config.seed {
            self.seed = seed;
        }
        for (i, channel) in self.channels.iter_mut().enumerate() {
            let seed = derive_seed(self.seed, i as u64);
            channel.configure(&self.config, self.sample_rate, seed);
            if self.config.seed.is_some() {
                channel.reseed(seed);
            }
        }
        for smoother in &mut self.smoothers {
            smoother.reset(self.sample_rate, self.config.smoothing_seconds);
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed every RNG was derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set one parameter (clamped). Takes effect, ramped, from the next block.
    ///
    /// NaN is ignored.
    pub fn set_param(&mut self, param: ReeseParam, value: f32) {
        if !value.is_nan() {
            self.params.set(param, value);
        }
    }

    /// Replace every parameter (clamped). Takes effect from the next block.
    pub fn set_params(&mut self, params: &ParamSnapshot) {
        self.params = params.clamped();
    }

    /// Read the latest values from a lock-free store.
    pub fn sync_params(&mut self, shared: &SharedParams) {
        self.params = shared.snapshot();
    }

    /// Latest parameter values (targets, not smoothed values).
    pub fn params(&self) -> &ParamSnapshot {
        &self.params
    }

    /// Smoothed value of one parameter as of the last processed frame.
    pub fn smoothed(&self, param: ReeseParam) -> f32 {
        self.smoothers[param.index()].current()
    }

    /// Borrow one channel.
    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// Processing latency. The chain has none.
    pub fn latency_samples(&self) -> usize {
        0
    }

    /// Tail after input stops, in seconds. Reported as zero.
    pub fn tail_seconds(&self) -> f32 {
        0.0
    }

    /// Refresh smoother targets from the latest parameter values.
    fn begin_block(&mut self) {
        for param in ReeseParam::ALL {
            self.smoothers[param.index()].set_target(self.params.get(param));
        }
    }

    /// Advance every smoother by one frame.
    #[inline]
    fn next_frame(&mut self) -> FrameParams {
        let mut v = [0.0f32; ReeseParam::COUNT];
        for (value, smoother) in v.iter_mut().zip(self.smoothers.iter_mut()) {
            *value = smoother.next_value();
        }
        let get = |p: ReeseParam| v[p.index()];

        FrameParams {
            cutoff: get(ReeseParam::Cutoff),
            resonance: get(ReeseParam::Resonance),
            ring_rate: get(ReeseParam::RingRate),
            ring_depth: get(ReeseParam::RingDepth),
            octave_blend: get(ReeseParam::OctaveBlend),
            drive: get(ReeseParam::Drive),
            noise_amount: get(ReeseParam::NoiseAmount),
            gain: db_to_linear(get(ReeseParam::Volume)),
            levels: MixLevels::from_character(get(ReeseParam::Character)),
        }
    }

    /// Ring rate for channel `index`, spread by the stereo width.
    #[inline]
    fn channel_ring_rate(&self, frame: &FrameParams, index: usize) -> f32 {
        let width = self.smoothers[ReeseParam::StereoWidth.index()].current();
        frame.ring_rate * (1.0 + STEREO_RATE_SPREAD * width * index as f32)
    }

    #[inline]
    fn process_channel(&mut self, index: usize, input: f32, frame: &FrameParams) -> f32 {
        let rate = self.channel_ring_rate(frame, index);
        self.channels[index].process(input, frame, rate)
    }

    /// Process a mono block in place through the left channel.
    pub fn process_mono(&mut self, buffer: &mut [f32]) {
        self.begin_block();
        for sample in buffer.iter_mut() {
            let frame = self.next_frame();
            *sample = self.process_channel(0, *sample, &frame);
        }
    }

    /// Process a mono block and write it to both outputs.
    ///
    /// # Panics
    /// Debug builds panic if the buffer lengths differ.
    pub fn process_mono_to_stereo(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(input.len(), left.len(), "Input and output buffers must have same length");
        debug_assert_eq!(left.len(), right.len(), "Left and right buffers must have same length");
        self.begin_block();
        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            let frame = self.next_frame();
            let y = self.process_channel(0, x, &frame);
            *l = y;
            *r = y;
        }
    }

    /// Process a stereo block in place.
    ///
    /// # Panics
    /// Debug builds panic if the buffer lengths differ.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len(), "Left and right buffers must have same length");
        self.begin_block();
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let frame = self.next_frame();
            *l = self.process_channel(0, *l, &frame);
            *r = self.process_channel(1, *r, &frame);
        }
    }

    /// Process an interleaved `[L, R, L, R, ...]` block in place.
    ///
    /// A trailing odd sample is left untouched.
    pub fn process_interleaved_stereo(&mut self, buffer: &mut [f32]) {
        debug_assert!(buffer.len() % 2 == 0, "Interleaved buffer must hold whole frames");
        self.begin_block();
        for pair in buffer.chunks_exact_mut(2) {
            let frame = self.next_frame();
            pair[0] = self.process_channel(0, pair[0], &frame);
            pair[1] = self.process_channel(1, pair[1], &frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombinedModulator;

    fn sine(freq: f32, sr: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| libm::sinf(core::f32::consts::TAU * freq * i as f32 / sr))
            .collect()
    }

    #[test]
    fn fresh_engine_runs_at_48k() {
        let mut engine = ProcessingEngine::with_seed(1);
        assert_eq!(engine.sample_rate(), DEFAULT_SAMPLE_RATE);
        let mut buf = sine(40.0, 48000.0, 512);
        engine.process_mono(&mut buf);
        assert!(buf.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    }

    #[test]
    fn prepare_validates_sample_rate() {
        let mut engine = ProcessingEngine::with_seed(1);
        assert_eq!(engine.prepare(0.0), Err(EngineError::InvalidSampleRate(0.0)));
        assert_eq!(engine.sample_rate(), DEFAULT_SAMPLE_RATE);
        assert!(engine.prepare(44100.0).is_ok());
        assert_eq!(engine.sample_rate(), 44100.0);
    }

    #[test]
    fn smoothers_ramp_over_fifty_ms() {
        let mut engine = ProcessingEngine::with_seed(1);
        engine.prepare(48000.0).unwrap();
        engine.set_param(ReeseParam::Cutoff, 1500.0);

        let mut buf = vec![0.0; 1200];
        engine.process_mono(&mut buf);
        let halfway = engine.smoothed(ReeseParam::Cutoff);
        assert!((halfway - 1000.0).abs() < 1.0, "got {halfway}");

        engine.process_mono(&mut buf);
        assert_eq!(engine.smoothed(ReeseParam::Cutoff), 1500.0);
    }

    #[test]
    fn smoothers_advance_once_per_frame_in_stereo() {
        let mut engine = ProcessingEngine::with_seed(1);
        engine.set_param(ReeseParam::Drive, 2.0);
        let mut left = vec![0.0; 1200];
        let mut right = vec![0.0; 1200];
        engine.process_stereo(&mut left, &mut right);
        assert!((engine.smoothed(ReeseParam::Drive) - 1.5).abs() < 1e-3);
    }

    #[test]
    fn right_channel_ring_rate_is_spread() {
        let mut engine = ProcessingEngine::with_seed(1);
        engine.set_param(ReeseParam::RingRate, 4.0);
        engine.set_param(ReeseParam::StereoWidth, 1.0);
        engine.reset();
        let mut left = vec![0.0; 16];
        let mut right = vec![0.0; 16];
        engine.process_stereo(&mut left, &mut right);

        let rate = |i| engine.channel(i).map(|c| c.ring_modulator().frequency());
        assert_eq!(rate(0), Some(4.0));
        let right_rate = rate(1).unwrap_or_default();
        assert!((right_rate - 4.2).abs() < 1e-5, "got {right_rate}");
    }

    #[test]
    fn mono_to_stereo_duplicates() {
        let mut engine = ProcessingEngine::with_seed(5);
        let input = sine(55.0, 48000.0, 2048);
        let mut left = vec![0.0; input.len()];
        let mut right = vec![0.0; input.len()];
        engine.process_mono_to_stereo(&input, &mut left, &mut right);
        assert_eq!(left, right);
    }

    #[test]
    fn interleaved_matches_planar() {
        let input = sine(40.0, 48000.0, 1024);
        let mut a = ProcessingEngine::with_seed(9);
        let mut b = ProcessingEngine::with_seed(9);

        let mut left = input.clone();
        let mut right = input.clone();
        a.process_stereo(&mut left, &mut right);

        let mut interleaved: Vec<f32> = input.iter().flat_map(|&s| [s, s]).collect();
        b.process_interleaved_stereo(&mut interleaved);

        for (i, pair) in interleaved.chunks_exact(2).enumerate() {
            assert_eq!(pair[0], left[i]);
            assert_eq!(pair[1], right[i]);
        }
    }

    #[test]
    fn seeded_engines_are_reproducible() {
        let input = sine(40.0, 48000.0, 4096);
        let run = |seed| {
            let mut engine = ProcessingEngine::with_seed(seed);
            let mut buf = input.clone();
            engine.process_mono(&mut buf);
            buf
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }

    #[test]
    fn params_are_clamped_and_nan_ignored() {
        let mut engine = ProcessingEngine::with_seed(1);
        engine.set_param(ReeseParam::Cutoff, 10.0);
        assert_eq!(engine.params().cutoff, 200.0);
        engine.set_param(ReeseParam::Cutoff, f32::NAN);
        assert_eq!(engine.params().cutoff, 200.0);

        let snap = ParamSnapshot {
            volume: 40.0,
            ..ParamSnapshot::default()
        };
        engine.set_params(&snap);
        assert_eq!(engine.params().volume, 6.0);
    }

    #[test]
    fn sync_params_reads_shared_store() {
        let shared = SharedParams::default();
        shared.set(ReeseParam::Character, 0.9);
        let mut engine = ProcessingEngine::with_seed(1);
        engine.sync_params(&shared);
        assert_eq!(engine.params().character, 0.9);
    }

    #[test]
    fn set_config_switches_topology() {
        let mut engine = ProcessingEngine::with_seed(1);
        assert!(engine.channel(0).and_then(Channel::combined_ring_modulator).is_none());
        engine.set_config(EngineConfig {
            combined_modulator: CombinedModulator::Independent,
            ..EngineConfig::default()
        });
        assert!(engine.channel(1).and_then(Channel::combined_ring_modulator).is_some());
    }

    #[test]
    fn reports_no_latency() {
        let engine = ProcessingEngine::with_seed(1);
        assert_eq!(engine.latency_samples(), 0);
        assert_eq!(engine.tail_seconds(), 0.0);
    }
}
