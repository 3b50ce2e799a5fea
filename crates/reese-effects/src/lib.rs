//! Reese Effects - the Reese bass signal chain
//!
//! This crate assembles the reese-core primitives into the full processor:
//!
//! - [`NoiseGenerator`] - White/pink noise mixed under the signal
//! - [`OctaveDivider`] - Comparator + flip-flop sub-octave generator
//! - [`RingModulator`] - Sub-audio LFO amplitude modulator with per-cycle drift
//! - [`WaveShaper`] - Soft, diode, asymmetric and multi-stage saturation
//! - [`MixLevels`] - Path weights from the character macro
//! - [`Channel`] - One channel's module set and signal graph
//! - [`ProcessingEngine`] - Two channels, ten smoothed parameters, block API
//!
//! Parameter metadata lives in [`ReeseParam`]; [`ParamSnapshot`] carries
//! values and [`SharedParams`] publishes them lock-free from a control
//! thread.
//!
//! ## Example
//!
//! ```rust
//! use reese_effects::{ProcessingEngine, ParamSnapshot};
//!
//! let mut engine = ProcessingEngine::with_seed(42);
//! engine.prepare(44100.0).unwrap();
//! engine.set_params(&ParamSnapshot {
//!     cutoff: 600.0,
//!     resonance: 0.7,
//!     character: 0.6,
//!     ..ParamSnapshot::default()
//! });
//!
//! let mut block = [0.0f32; 128];
//! engine.process_mono(&mut block);
//! ```
//!
//! ## Features
//!
//! - `std` (default): seeds [`ProcessingEngine::new`] from system entropy
//! - `serde`: `Serialize`/`Deserialize` for [`EngineConfig`], [`ParamSnapshot`]
//!   and the mode enums
//! - `tracing`: logs `prepare` at debug level

#![cfg_attr(not(feature = "std"), no_std)]

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod mix;
pub mod noise;
pub mod octave_divider;
pub mod params;
pub mod ring_mod;
pub mod waveshaper;

pub use channel::{Channel, FrameParams, PathOutputs};
pub use config::{CombinedModulator, EngineConfig};
pub use engine::ProcessingEngine;
pub use error::EngineError;
pub use mix::{MixLevels, calculate_mix_levels};
pub use noise::{NoiseColor, NoiseGenerator};
pub use octave_divider::OctaveDivider;
pub use params::{ParamScale, ParamSnapshot, ParamUnit, ReeseParam, SharedParams};
pub use ring_mod::{RingModulator, RingWaveShape};
pub use waveshaper::{SaturationType, WaveShaper};
