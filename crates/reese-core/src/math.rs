//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Limiting
//!
//! | Function | Threshold | Ceiling | Use Case |
//! |----------|-----------|---------|----------|
//! | [`soft_limit`] | 0.9 | < 1.0 | Final output stage |
//! | [`soft_clip_with_threshold`] | caller | threshold + 0.3 | Transparent low-level saturation |

use libm::{expf, fabsf, logf, tanhf};

/// Magnitude below which recursive filter state is flushed to exact zero.
pub const DENORMAL_FLOOR: f32 = 1e-10;

/// Threshold of the final output limiter.
const LIMIT_THRESHOLD: f32 = 0.9;

/// Headroom the limiter allows above its threshold.
const LIMIT_HEADROOM: f32 = 0.1;

/// Convert decibels to linear gain (`10^(dB/20)`).
///
/// # Example
/// ```rust
/// use reese_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-40.0) - 0.01).abs() < 1e-5);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below 1e-10 are treated as 1e-10 (-200 dB).
///
/// # Example
/// ```rust
/// use reese_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Flush near-zero values to exact zero.
///
/// Values whose magnitude is below [`DENORMAL_FLOOR`] are replaced with zero
/// so recursive state decaying toward silence never reaches the subnormal
/// range, where most CPUs slow down dramatically.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if fabsf(x) < DENORMAL_FLOOR { 0.0 } else { x }
}

/// Final output soft limiter.
///
/// Identity for `|x| < 0.9`. Above the threshold the excess is compressed by
/// `tanh(5·excess)·0.1`, so the output is continuous and approaches but
/// never reaches ±1.0.
///
/// # Example
/// ```rust
/// use reese_core::soft_limit;
///
/// assert_eq!(soft_limit(0.5), 0.5);
/// assert!(soft_limit(100.0) <= 1.0);
/// ```
#[inline]
pub fn soft_limit(x: f32) -> f32 {
    let magnitude = fabsf(x);
    if magnitude < LIMIT_THRESHOLD {
        return x;
    }
    let excess = magnitude - LIMIT_THRESHOLD;
    let limited = LIMIT_THRESHOLD + tanhf(excess * 5.0) * LIMIT_HEADROOM;
    if x > 0.0 { limited } else { -limited }
}

/// Threshold-gated soft clip.
///
/// Signal with `|x| < threshold` passes untouched. Above it the excess is
/// saturated with `tanh(2·excess)·0.3`, giving a ceiling of `threshold + 0.3`.
#[inline]
pub fn soft_clip_with_threshold(x: f32, threshold: f32) -> f32 {
    let magnitude = fabsf(x);
    if magnitude < threshold {
        return x;
    }
    let excess = magnitude - threshold;
    let clipped = threshold + tanhf(excess * 2.0) * 0.3;
    if x > 0.0 { clipped } else { -clipped }
}
