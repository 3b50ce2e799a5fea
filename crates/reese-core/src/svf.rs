//! State Variable Filter implementation.
//!
//! A 2-pole (12 dB/oct) resonant filter producing lowpass, bandpass, and
//! highpass outputs simultaneously from one pair of integrators.
//!
//! # Topology
//!
//! Implements the Topology-Preserving Transform (TPT) SVF after Zavalishin,
//! "The Art of VA Filter Design" (2012). Both integrators use trapezoidal
//! discretization and the zero-delay feedback loop is solved in closed form:
//!
//! ```text
//! hp  = (x − (k + g)·s1 − s2) / (1 + g·k + g²)
//! bp  = g·hp + s1        s1 ← g·hp + bp
//! lp  = g·bp + s2        s2 ← g·bp + lp
//! ```
//!
//! with `g = tan(π·fc/fs)` (bilinear pre-warp) and `k = 1/Q`.
//!
//! # Resonance Mapping
//!
//! Resonance in [0, 0.95] maps linearly to `Q = 0.5 + 19.5·resonance`, i.e.
//! Q from 0.5 (heavily damped) to ~19 (ringing, but short of
//! self-oscillation).
//!
//! # Input Drive
//!
//! The input is scaled by `drive` and soft-saturated with
//! `tanh(1.5·x)/1.5` before entering the loop, mimicking op-amp input
//! stages. The division keeps small-signal gain at unity.
//!
//! # Lazy Coefficients
//!
//! `tan()` is expensive, so setters only mark the filter
//! [`CoefficientState::Dirty`] when a value actually moves by more than a
//! small epsilon. The next processed sample recomputes `g`/`k` once and
//! returns to [`CoefficientState::Clean`].

use core::f32::consts::PI;
use libm::{fabsf, tanf, tanhf};

use crate::Effect;
use crate::flush_denormal;

/// Lowest settable cutoff in Hz.
pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest settable cutoff in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;
/// Highest settable resonance.
pub const MAX_RESONANCE: f32 = 0.95;
/// Highest settable input drive.
pub const MAX_DRIVE: f32 = 2.0;

/// Cutoff changes smaller than this (Hz) do not dirty the coefficients.
const CUTOFF_EPSILON: f32 = 0.01;
/// Resonance changes smaller than this do not dirty the coefficients.
const RESONANCE_EPSILON: f32 = 0.001;
/// Effective cutoff never exceeds this fraction of the sample rate.
const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Whether the cached `g`/`k` coefficients match the current parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoefficientState {
    /// Coefficients are up to date.
    Clean,
    /// A parameter changed; coefficients are recomputed before the next sample.
    #[default]
    Dirty,
}

/// Output selection used by the [`Effect`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SvfOutput {
    /// Low-pass output.
    #[default]
    Lowpass,
    /// Band-pass output.
    Bandpass,
    /// High-pass output.
    Highpass,
}

/// All three outputs of one filter step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvfOutputs {
    /// Low-pass output.
    pub low_pass: f32,
    /// Band-pass output.
    pub band_pass: f32,
    /// High-pass output.
    pub high_pass: f32,
}

/// Resonant 2-pole state variable filter.
///
/// ## Parameters
///
/// - `cutoff`: 20.0 to 20000.0 Hz (default 500.0); the effective value is
///   further limited to `0.49 × sample_rate`
/// - `resonance`: 0.0 to 0.95 (default 0.5)
/// - `drive`: input gain before saturation, 0.0 to 2.0 (default 1.0)
///
/// # Example
///
/// ```rust
/// use reese_core::{Effect, StateVariableFilter};
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_cutoff(600.0);
/// svf.set_resonance(0.7);
///
/// let out = svf.process_sample(0.5);
/// assert!(out.low_pass.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    // Integrator state
    ic1eq: f32,
    ic2eq: f32,

    // Coefficients
    g: f32,
    k: f32,
    coefficients: CoefficientState,

    // Parameters
    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
    drive: f32,
    output: SvfOutput,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Create a new SVF at the given sample rate with coefficients computed.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            coefficients: CoefficientState::Dirty,
            sample_rate,
            cutoff: 500.0,
            resonance: 0.5,
            drive: 1.0,
            output: SvfOutput::Lowpass,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz (clamped to 20–20000).
    pub fn set_cutoff(&mut self, hz: f32) {
        let hz = hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        if fabsf(self.cutoff - hz) > CUTOFF_EPSILON {
            self.cutoff = hz;
            self.coefficients = CoefficientState::Dirty;
        }
    }

    /// Current cutoff in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (clamped to 0–0.95).
    pub fn set_resonance(&mut self, resonance: f32) {
        let resonance = resonance.clamp(0.0, MAX_RESONANCE);
        if fabsf(self.resonance - resonance) > RESONANCE_EPSILON {
            self.resonance = resonance;
            self.coefficients = CoefficientState::Dirty;
        }
    }

    /// Current resonance.
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Set input drive (clamped to 0–2). Does not affect coefficients.
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive.clamp(0.0, MAX_DRIVE);
    }

    /// Current input drive.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Select which output [`Effect::process`] returns.
    pub fn set_output(&mut self, output: SvfOutput) {
        self.output = output;
    }

    /// Output returned by [`Effect::process`].
    pub fn output(&self) -> SvfOutput {
        self.output
    }

    /// Whether cached coefficients are current.
    pub fn coefficient_state(&self) -> CoefficientState {
        self.coefficients
    }

    /// Frequency coefficient `g`.
    pub fn g(&self) -> f32 {
        self.g
    }

    /// Damping coefficient `k`.
    pub fn k(&self) -> f32 {
        self.k
    }

    /// Recompute `g` and `k` from cutoff, resonance and sample rate.
    ///
    /// Transitions the filter to [`CoefficientState::Clean`].
    fn update_coefficients(&mut self) {
        let cutoff = self.cutoff.min(self.sample_rate * MAX_CUTOFF_RATIO);
        self.g = tanf(PI * cutoff / self.sample_rate);
        let q = 0.5 + self.resonance * 19.5;
        self.k = 1.0 / q;
        self.coefficients = CoefficientState::Clean;
    }

    /// Process one sample and return all three outputs.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> SvfOutputs {
        if self.coefficients == CoefficientState::Dirty {
            self.update_coefficients();
        }

        let x = tanhf(input * self.drive * 1.5) / 1.5;
        let g = self.g;
        let k = self.k;

        let hp = (x - (k + g) * self.ic1eq - self.ic2eq) / (1.0 + g * k + g * g);

        let bp = g * hp + self.ic1eq;
        self.ic1eq = flush_denormal(g * hp + bp);

        let lp = g * bp + self.ic2eq;
        self.ic2eq = flush_denormal(g * bp + lp);

        SvfOutputs {
            low_pass: lp,
            band_pass: bp,
            high_pass: hp,
        }
    }
}

impl Effect for StateVariableFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let out = self.process_sample(input);
        match self.output {
            SvfOutput::Lowpass => out.low_pass,
            SvfOutput::Bandpass => out.band_pass,
            SvfOutput::Highpass => out.high_pass,
        }
    }

    fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }
}
