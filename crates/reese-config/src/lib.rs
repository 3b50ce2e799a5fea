//! Preset management for the Reese bass processor.
//!
//! # Features
//!
//! - **Presets**: Load and save named parameter sets as TOML
//! - **Factory Presets**: Eight built-in starting points
//! - **Validation**: Check parameter ids and ranges before they reach an engine
//! - **Paths**: Platform-specific user preset directory
//!
//! # Example
//!
//! ```rust,no_run
//! use reese_config::{Preset, find_preset, user_presets_dir};
//! use reese_effects::ProcessingEngine;
//!
//! let mut engine = ProcessingEngine::new();
//! find_preset("Sub Terror").unwrap().apply(&mut engine);
//!
//! let snapshot = Preset::from_snapshot("My Sub", engine.params());
//! snapshot.save(user_presets_dir().join("my_sub.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths and preset lookup.
pub mod paths;

/// Parameter and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, find_preset_file, list_user_presets,
    preset_file_name, preset_name_from_path, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{parse_param_assignment, validate_param, validate_snapshot};
