//! Error types for engine configuration.

use thiserror::Error;

/// Lowest sample rate the engine accepts.
pub const MIN_SAMPLE_RATE: f32 = 8_000.0;
/// Highest sample rate the engine accepts.
pub const MAX_SAMPLE_RATE: f32 = 384_000.0;

/// Errors raised outside the real-time path.
///
/// Processing itself never fails; setters clamp instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    /// Sample rate is non-finite, non-positive, or outside 8 kHz–384 kHz.
    #[error("invalid sample rate {0} Hz (expected 8000..=384000)")]
    InvalidSampleRate(f32),
}

/// Check that `sample_rate` is one the engine can run at.
pub fn validate_sample_rate(sample_rate: f32) -> Result<f32, EngineError> {
    if sample_rate.is_finite() && (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        Ok(sample_rate)
    } else {
        Err(EngineError::InvalidSampleRate(sample_rate))
    }
}
