//! Core Effect trait.
//!
//! Every per-sample module in the Reese chain implements [`Effect`], giving a
//! consistent interface for single-sample and block processing.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: One `f32` in, one `f32` out. Stereo is built from
//!   independent per-channel instances.
//!
//! - **Object-safe**: `dyn Effect` works, but the engine uses concrete types
//!   so the compiler can inline the whole chain.
//!
//! - **No allocations**: All methods are safe to call from the audio thread.

/// Core trait for single-sample audio processors.
///
/// # Example
///
/// ```rust
/// use reese_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate and recompute any rate-dependent coefficients.
    ///
    /// Callers validate the rate before it reaches this method; a
    /// non-positive rate produces undefined numeric results.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear transient state (integrators, phases, edge flags) without
    /// changing configured parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default is zero.
    fn latency_samples(&self) -> usize {
        0
    }
}
