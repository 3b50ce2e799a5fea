//! Additive noise source.
//!
//! A faint bed of noise under the bass adds the "air" an analog signal path
//! always carries. The level is mapped from `amount` on a dB scale so the
//! control stays subtle across its whole travel:
//!
//! ```text
//! gain = 10^((−60 + 20·amount) / 20)      amount 0 → −60 dB, 1 → −40 dB
//! ```
//!
//! ## Pink Noise
//!
//! Pink noise uses Paul Kellett's refined filter bank: seven one-pole
//! sections fed from the same white draw, summed and normalised. Accurate to
//! within ±0.05 dB of a −3 dB/octave slope above ~10 Hz at 44.1 kHz.
//!
//! Reference: P. Kellett, "Filter to make pink noise from white",
//! musicdsp.org (2000).

use reese_core::{Effect, Xorshift32, db_to_linear};

/// Level at `amount = 0`.
const MIN_NOISE_DB: f32 = -60.0;
/// dB added between `amount = 0` and `amount = 1`.
const NOISE_DB_SPAN: f32 = 20.0;
/// Output normalisation for the pink bank.
const PINK_NORMALISE: f32 = 0.11;

/// Noise spectrum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoiseColor {
    /// Flat spectrum, uniform draw in [-1, 1).
    White,
    /// −3 dB/octave spectrum.
    #[default]
    Pink,
}

/// White/pink noise generator that mixes into a clean signal.
///
/// # Example
///
/// ```rust
/// use reese_effects::{NoiseColor, NoiseGenerator};
///
/// let mut noise = NoiseGenerator::with_seed(7);
/// noise.set_color(NoiseColor::White);
/// noise.set_amount(1.0);
///
/// let out = noise.apply(0.5);
/// assert!((out - 0.5).abs() < 0.011);
/// ```
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    amount: f32,
    gain: f32,
    color: NoiseColor,
    rng: Xorshift32,
    // Kellett b0..b6
    pink: [f32; 7],
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl NoiseGenerator {
    /// Create a generator with a fixed RNG seed.
    ///
    /// Defaults: amount 0.2, pink.
    pub fn with_seed(seed: u64) -> Self {
        let mut noise = Self {
            amount: 0.0,
            gain: 0.0,
            color: NoiseColor::default(),
            rng: Xorshift32::new(seed),
            pink: [0.0; 7],
        };
        noise.set_amount(0.2);
        noise
    }

    /// Replace the RNG state. The pink bank is left untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Xorshift32::new(seed);
    }

    /// Set noise amount (clamped to 0–1).
    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(0.0, 1.0);
        self.gain = db_to_linear(MIN_NOISE_DB + self.amount * NOISE_DB_SPAN);
    }

    /// Current noise amount.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Linear gain applied to the raw noise.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Set noise colour.
    pub fn set_color(&mut self, color: NoiseColor) {
        self.color = color;
    }

    /// Current noise colour.
    pub fn color(&self) -> NoiseColor {
        self.color
    }

    /// Draw one unscaled noise sample of the current colour.
    ///
    /// The pink bank advances on every draw regardless of colour so
    /// switching colours mid-stream never starts from a cold filter.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let white = self.rng.next_bipolar();
        let pink = self.shape_pink(white);
        match self.color {
            NoiseColor::White => white,
            NoiseColor::Pink => pink,
        }
    }

    /// Add scaled noise to `clean`.
    #[inline]
    pub fn apply(&mut self, clean: f32) -> f32 {
        clean + self.next_sample() * self.gain
    }

    #[inline]
    fn shape_pink(&mut self, white: f32) -> f32 {
        let b = &mut self.pink;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
        b[6] = white * 0.115926;
        pink * PINK_NORMALISE
    }
}

impl Effect for NoiseGenerator {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.apply(input)
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {
        self.pink = [0.0; 7];
    }
}
