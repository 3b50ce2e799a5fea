//! Reese Core - DSP primitives for the Reese bass processor
//!
//! This crate provides the small, stateful building blocks that the Reese
//! signal chain is assembled from. Everything here is designed for real-time
//! audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for single-sample processors
//!
//! ## Parameter Smoothing
//!
//! - [`ParameterSmoother`] - Linear ramp with a fixed, bounded length
//!
//! ## Filters
//!
//! - [`StateVariableFilter`] - TPT SVF with simultaneous LP/BP/HP outputs and
//!   lazily recomputed coefficients
//! - [`OnePole`] - 6 dB/oct lowpass for smoothing and tone shaping
//!
//! ## Randomness
//!
//! - [`Xorshift32`] - Seedable PRNG owned per module instance
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - Limiting: [`soft_limit`], [`soft_clip_with_threshold`]
//! - Denormal protection: [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! reese-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod effect;
pub mod math;
pub mod one_pole;
pub mod rng;
pub mod smoother;
pub mod svf;

pub use effect::Effect;
pub use math::{
    DENORMAL_FLOOR, db_to_linear, flush_denormal, linear_to_db, soft_clip_with_threshold,
    soft_limit,
};
pub use one_pole::OnePole;
pub use rng::Xorshift32;
pub use smoother::ParameterSmoother;
pub use svf::{CoefficientState, StateVariableFilter, SvfOutput, SvfOutputs};
