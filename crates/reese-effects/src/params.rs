//! Parameter table for the Reese processor.
//!
//! [`ReeseParam`] names the ten user-facing controls and carries their
//! metadata: stable string id, display name, unit, range, default and
//! normalisation curve. [`ParamSnapshot`] is a plain value set the engine
//! reads once per block. [`SharedParams`] lets a control thread publish new
//! values without locks.
//!
//! # Normalisation Formulas
//!
//! - **Linear**: `normalized = (value - min) / (max - min)`
//! - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
//!
//! Cutoff and ring rate are logarithmic so equal control travel gives equal
//! musical intervals.

use core::sync::atomic::{AtomicU32, Ordering};
use libm::{logf, powf};

/// Scaling curve between plain and normalised values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Requires `min > 0`.
    Logarithmic,
}

/// Display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Dimensionless 0–1 amount shown as a percentage.
    Percent,
    /// Dimensionless multiplier.
    Ratio,
}

impl ParamUnit {
    /// Unit suffix for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Percent => "%",
            ParamUnit::Ratio => "x",
        }
    }
}

/// The ten Reese controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReeseParam {
    /// Filter cutoff, 200–2000 Hz.
    Cutoff,
    /// Filter resonance, 0–0.95.
    Resonance,
    /// Ring modulator LFO rate, 0.5–10 Hz.
    RingRate,
    /// Ring modulator depth, 0–1.
    RingDepth,
    /// Sub-octave level, 0–1.
    OctaveBlend,
    /// Character macro, 0–1.
    Character,
    /// Saturation pre-gain, 0–2.
    Drive,
    /// Output level, −60–6 dB.
    Volume,
    /// Right-channel ring rate spread, 0–1.
    StereoWidth,
    /// Noise level, 0–1.
    NoiseAmount,
}

impl ReeseParam {
    /// Number of parameters.
    pub const COUNT: usize = 10;

    /// Every parameter, in index order.
    pub const ALL: [ReeseParam; Self::COUNT] = [
        ReeseParam::Cutoff,
        ReeseParam::Resonance,
        ReeseParam::RingRate,
        ReeseParam::RingDepth,
        ReeseParam::OctaveBlend,
        ReeseParam::Character,
        ReeseParam::Drive,
        ReeseParam::Volume,
        ReeseParam::StereoWidth,
        ReeseParam::NoiseAmount,
    ];

    /// Position in [`ReeseParam::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in presets and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            ReeseParam::Cutoff => "cutoff",
            ReeseParam::Resonance => "resonance",
            ReeseParam::RingRate => "ring_rate",
            ReeseParam::RingDepth => "ring_depth",
            ReeseParam::OctaveBlend => "octave_blend",
            ReeseParam::Character => "character",
            ReeseParam::Drive => "drive",
            ReeseParam::Volume => "volume",
            ReeseParam::StereoWidth => "stereo_width",
            ReeseParam::NoiseAmount => "noise_amount",
        }
    }

    /// Look up a parameter by its [`id`](Self::id).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ReeseParam::Cutoff => "Filter Cutoff",
            ReeseParam::Resonance => "Resonance",
            ReeseParam::RingRate => "Ring Mod Rate",
            ReeseParam::RingDepth => "Ring Mod Depth",
            ReeseParam::OctaveBlend => "Octave Blend",
            ReeseParam::Character => "Character",
            ReeseParam::Drive => "Drive",
            ReeseParam::Volume => "Volume",
            ReeseParam::StereoWidth => "Stereo Width",
            ReeseParam::NoiseAmount => "Noise Amount",
        }
    }

    /// Display unit.
    pub const fn unit(self) -> ParamUnit {
        match self {
            ReeseParam::Cutoff | ReeseParam::RingRate => ParamUnit::Hertz,
            ReeseParam::Volume => ParamUnit::Decibels,
            ReeseParam::Drive => ParamUnit::Ratio,
            _ => ParamUnit::Percent,
        }
    }

    /// Inclusive `(min, max)` range.
    pub const fn range(self) -> (f32, f32) {
        match self {
            ReeseParam::Cutoff => (200.0, 2000.0),
            ReeseParam::Resonance => (0.0, 0.95),
            ReeseParam::RingRate => (0.5, 10.0),
            ReeseParam::Drive => (0.0, 2.0),
            ReeseParam::Volume => (-60.0, 6.0),
            _ => (0.0, 1.0),
        }
    }

    /// Minimum value.
    pub const fn min(self) -> f32 {
        self.range().0
    }

    /// Maximum value.
    pub const fn max(self) -> f32 {
        self.range().1
    }

    /// Default value.
    pub const fn default_value(self) -> f32 {
        match self {
            ReeseParam::Cutoff => 500.0,
            ReeseParam::Resonance => 0.6,
            ReeseParam::RingRate => 3.0,
            ReeseParam::RingDepth => 0.5,
            ReeseParam::OctaveBlend => 0.4,
            ReeseParam::Character => 0.5,
            ReeseParam::Drive => 1.0,
            ReeseParam::Volume => 0.0,
            ReeseParam::StereoWidth => 0.5,
            ReeseParam::NoiseAmount => 0.2,
        }
    }

    /// Normalisation curve.
    pub const fn scale(self) -> ParamScale {
        match self {
            ReeseParam::Cutoff | ReeseParam::RingRate => ParamScale::Logarithmic,
            _ => ParamScale::Linear,
        }
    }

    /// Clamp `value` into range.
    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        value.clamp(self.min(), self.max())
    }

    /// Whether `value` lies within range (NaN never does).
    pub fn contains(self, value: f32) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Plain value to normalised 0–1.
    pub fn normalize(self, value: f32) -> f32 {
        let (min, max) = self.range();
        let value = self.clamp(value);
        match self.scale() {
            ParamScale::Linear => (value - min) / (max - min),
            ParamScale::Logarithmic => logf(value / min) / logf(max / min),
        }
    }

    /// Normalised 0–1 to plain value.
    pub fn denormalize(self, normalized: f32) -> f32 {
        let (min, max) = self.range();
        let n = normalized.clamp(0.0, 1.0);
        let value = match self.scale() {
            ParamScale::Linear => min + n * (max - min),
            ParamScale::Logarithmic => min * powf(max / min, n),
        };
        self.clamp(value)
    }
}

impl core::fmt::Display for ReeseParam {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// Plain values for all ten parameters.
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParamSnapshot {
    /// Filter cutoff in Hz.
    pub cutoff: f32,
    /// Filter resonance.
    pub resonance: f32,
    /// Ring modulator rate in Hz.
    pub ring_rate: f32,
    /// Ring modulator depth.
    pub ring_depth: f32,
    /// Sub-octave level.
    pub octave_blend: f32,
    /// Character macro.
    pub character: f32,
    /// Saturation pre-gain.
    pub drive: f32,
    /// Output level in dB.
    pub volume: f32,
    /// Right-channel ring rate spread.
    pub stereo_width: f32,
    /// Noise level.
    pub noise_amount: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            cutoff: ReeseParam::Cutoff.default_value(),
            resonance: ReeseParam::Resonance.default_value(),
            ring_rate: ReeseParam::RingRate.default_value(),
            ring_depth: ReeseParam::RingDepth.default_value(),
            octave_blend: ReeseParam::OctaveBlend.default_value(),
            character: ReeseParam::Character.default_value(),
            drive: ReeseParam::Drive.default_value(),
            volume: ReeseParam::Volume.default_value(),
            stereo_width: ReeseParam::StereoWidth.default_value(),
            noise_amount: ReeseParam::NoiseAmount.default_value(),
        }
    }
}

impl ParamSnapshot {
    /// Value of one parameter.
    pub fn get(&self, param: ReeseParam) -> f32 {
        match param {
            ReeseParam::Cutoff => self.cutoff,
            ReeseParam::Resonance => self.resonance,
            ReeseParam::RingRate => self.ring_rate,
            ReeseParam::RingDepth => self.ring_depth,
            ReeseParam::OctaveBlend => self.octave_blend,
            ReeseParam::Character => self.character,
            ReeseParam::Drive => self.drive,
            ReeseParam::Volume => self.volume,
            ReeseParam::StereoWidth => self.stereo_width,
            ReeseParam::NoiseAmount => self.noise_amount,
        }
    }

    /// Set one parameter, clamped into its range.
    pub fn set(&mut self, param: ReeseParam, value: f32) {
        let value = param.clamp(value);
        let slot = match param {
            ReeseParam::Cutoff => &mut self.cutoff,
            ReeseParam::Resonance => &mut self.resonance,
            ReeseParam::RingRate => &mut self.ring_rate,
            ReeseParam::RingDepth => &mut self.ring_depth,
            ReeseParam::OctaveBlend => &mut self.octave_blend,
            ReeseParam::Character => &mut self.character,
            ReeseParam::Drive => &mut self.drive,
            ReeseParam::Volume => &mut self.volume,
            ReeseParam::StereoWidth => &mut self.stereo_width,
            ReeseParam::NoiseAmount => &mut self.noise_amount,
        };
        *slot = value;
    }

    /// Copy with every field forced into range.
    ///
    /// A NaN field is replaced with that parameter's default.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for param in ReeseParam::ALL {
            let value = self.get(param);
            let value = if value.is_nan() {
                param.default_value()
            } else {
                value
            };
            out.set(param, value);
        }
        out
    }

    /// Iterate `(param, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ReeseParam, f32)> + '_ {
        ReeseParam::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Lock-free parameter store shared between a control thread and the
/// audio thread.
///
/// Each value is an `f32` stored as bits in an `AtomicU32`. Writes clamp to
/// range. Independent parameters may be observed torn across a block
/// boundary; the engine's smoothers absorb that.
///
/// # Example
///
/// ```rust
/// use reese_effects::{ReeseParam, SharedParams};
///
/// let shared = SharedParams::default();
/// shared.set(ReeseParam::Cutoff, 900.0);
/// assert_eq!(shared.snapshot().cutoff, 900.0);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; ReeseParam::COUNT],
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }
}

impl SharedParams {
    /// Store seeded from a snapshot.
    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let snapshot = snapshot.clamped();
        Self {
            values: ReeseParam::ALL.map(|p| AtomicU32::new(snapshot.get(p).to_bits())),
        }
    }

    /// Publish a new value (clamped). NaN is ignored.
    pub fn set(&self, param: ReeseParam, value: f32) {
        if value.is_nan() {
            return;
        }
        self.values[param.index()].store(param.clamp(value).to_bits(), Ordering::Relaxed);
    }

    /// Latest published value.
    pub fn get(&self, param: ReeseParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Relaxed))
    }

    /// Read every value once.
    pub fn snapshot(&self) -> ParamSnapshot {
        let mut snapshot = ParamSnapshot::default();
        for param in ReeseParam::ALL {
            snapshot.set(param, self.get(param));
        }
        snapshot
    }

    /// Publish every value from a snapshot.
    pub fn store(&self, snapshot: &ParamSnapshot) {
        for (param, value) in snapshot.iter() {
            self.set(param, value);
        }
    }
}
