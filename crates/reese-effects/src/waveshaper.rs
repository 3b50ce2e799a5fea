//! Saturation stage with several analog-inspired curve families.
//!
//! The shaper is stateless: each output sample depends only on the current
//! input and the configured drive, character and curve.
//!
//! ```text
//! output = curve(input × drive) × 0.7
//! ```
//!
//! The fixed 0.7 output compensation offsets the level increase saturation
//! adds.
//!
//! | Curve | Symmetry | Character |
//! |-------|----------|-----------|
//! | [`SaturationType::SoftClip`] | odd | `tanh(1.5x)` |
//! | [`SaturationType::DiodeClip`] | odd | silicon diode pair, 0.7 V ceiling |
//! | [`SaturationType::Asymmetric`] | none | tube-like, even harmonics |
//! | [`SaturationType::MultiStage`] | odd up to character 0.3 | cascaded |
//!
//! For transparent low-level passthrough with saturation only above a
//! threshold, see [`reese_core::soft_clip_with_threshold`].

use libm::{fabsf, tanhf};
use reese_core::Effect;

/// Output compensation applied after every curve.
pub const OUTPUT_COMPENSATION: f32 = 0.7;

// Diode model: forward voltage, ideality factor, thermal voltage.
const DIODE_VF: f32 = 0.7;
const DIODE_ETA: f32 = 1.5;
const DIODE_VT: f32 = 0.026;

/// Character above which multi-stage adds its asymmetric pass.
const ASYMMETRIC_STAGE_THRESHOLD: f32 = 0.3;

/// Saturation curve family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SaturationType {
    /// Symmetric `tanh(1.5x)`.
    SoftClip,
    /// Back-to-back silicon diodes.
    DiodeClip,
    /// Different gains on each half-wave.
    Asymmetric,
    /// Pre-saturation, character-scaled saturation, optional asymmetric pass.
    #[default]
    MultiStage,
}

/// Symmetric tanh soft clip.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x * 1.5)
}

/// Scaled-tanh approximation of a Shockley diode pair.
///
/// Both half-waves saturate at ±0.7 (the silicon forward voltage).
#[inline]
pub fn diode_clip(x: f32) -> f32 {
    let conducted = DIODE_VF * tanhf(fabsf(x) / (DIODE_ETA * DIODE_VT));
    if x > 0.0 { conducted } else { -conducted }
}

/// Tube-style asymmetric saturation.
///
/// Positive half: `tanh(1.8x)`. Negative half: `0.9·tanh(1.2x)`.
#[inline]
pub fn asymmetric(x: f32) -> f32 {
    if x > 0.0 {
        tanhf(x * 1.8)
    } else {
        tanhf(x * 1.2) * 0.9
    }
}

/// Three-stage saturation scaled by `character` (0–1).
#[inline]
pub fn multi_stage(x: f32, character: f32) -> f32 {
    let mut y = tanhf(x * 1.5) / 1.5;

    let amount = 1.0 + character * 2.0;
    y = tanhf(y * amount) / amount;

    if character > ASYMMETRIC_STAGE_THRESHOLD {
        y = asymmetric(y * 1.2) / 1.2;
    }
    y
}

/// Stateless multi-curve saturator.
///
/// ## Parameters
///
/// - `drive`: pre-gain, 0.0 to 2.0 (default 1.0)
/// - `character`: 0.0 (smooth) to 1.0 (aggressive), multi-stage only (default 0.5)
/// - `saturation_type`: [`SaturationType`] (default multi-stage)
///
/// # Example
///
/// ```rust
/// use reese_core::Effect;
/// use reese_effects::{SaturationType, WaveShaper};
///
/// let mut shaper = WaveShaper::new();
/// shaper.set_saturation_type(SaturationType::SoftClip);
/// shaper.set_drive(2.0);
///
/// let out = shaper.process(10.0);
/// assert!(out <= 0.7);
/// ```
#[derive(Debug, Clone)]
pub struct WaveShaper {
    drive: f32,
    character: f32,
    saturation_type: SaturationType,
}

impl Default for WaveShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveShaper {
    /// Create a shaper with default settings.
    pub fn new() -> Self {
        Self {
            drive: 1.0,
            character: 0.5,
            saturation_type: SaturationType::default(),
        }
    }

    /// Set pre-gain (clamped to 0–2).
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive.clamp(0.0, 2.0);
    }

    /// Current pre-gain.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Set character (clamped to 0–1).
    pub fn set_character(&mut self, character: f32) {
        self.character = character.clamp(0.0, 1.0);
    }

    /// Current character.
    pub fn character(&self) -> f32 {
        self.character
    }

    /// Select the curve family.
    pub fn set_saturation_type(&mut self, saturation_type: SaturationType) {
        self.saturation_type = saturation_type;
    }

    /// Current curve family.
    pub fn saturation_type(&self) -> SaturationType {
        self.saturation_type
    }

    /// Apply the selected curve without drive or output compensation.
    #[inline]
    pub fn curve(&self, x: f32) -> f32 {
        match self.saturation_type {
            SaturationType::SoftClip => soft_clip(x),
            SaturationType::DiodeClip => diode_clip(x),
            SaturationType::Asymmetric => asymmetric(x),
            SaturationType::MultiStage => multi_stage(x, self.character),
        }
    }
}

impl Effect for WaveShaper {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.curve(input * self.drive) * OUTPUT_COMPENSATION
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {}
}
