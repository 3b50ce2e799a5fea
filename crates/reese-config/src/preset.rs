//! Preset file format and operations.

use reese_effects::{EngineConfig, ParamSnapshot, ProcessingEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::{validate_params_table, validate_snapshot};

/// Named set of parameter values, with optional engine settings.
///
/// # TOML Format
///
/// ```toml
/// name = "Classic DnB Reese"
/// description = "Medium tension, organic movement"
/// genre = "DnB"
///
/// [params]
/// cutoff = 600.0
/// resonance = 0.7
/// ring_rate = 3.5
///
/// [engine]
/// ring_wave_shape = "triangle"
/// ```
///
/// Parameters missing from `[params]` take their defaults. `[engine]` may
/// be omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Style tag ("DnB", "Dubstep", "User", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub params: ParamSnapshot,

    /// Engine settings to apply alongside the parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
}

impl Preset {
    /// Create a preset with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            genre: None,
            params: ParamSnapshot::default(),
            engine: None,
        }
    }

    /// Capture an engine's current parameter values as a user preset.
    pub fn from_snapshot(name: impl Into<String>, params: &ParamSnapshot) -> Self {
        Self {
            params: params.clamped(),
            genre: Some("User".to_string()),
            ..Self::new(name)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the genre tag.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Attach engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Parse and validate a preset from a TOML string.
    ///
    /// Unknown parameter ids and out-of-range values are errors.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(toml_str)?;
        if let Some(params) = table.get("params").and_then(toml::Value::as_table) {
            validate_params_table(params)?;
        }
        Ok(toml::Value::Table(table).try_into::<Self>()?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every parameter value against its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_snapshot(&self.params)
    }

    /// Load the preset into an engine: engine settings first (if any), then
    /// the parameter values.
    pub fn apply(&self, engine: &mut ProcessingEngine) {
        if let Some(config) = self.engine {
            engine.set_config(config);
        }
        engine.set_params(&self.params);
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
