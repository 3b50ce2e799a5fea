//! Error types for preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Preset name that cannot be used as a file name
    #[error("invalid preset name '{0}': must be non-empty with no path separators or '..'")]
    InvalidPresetName(String),

        /// Parameter id not in the parameter table
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Parameter value that is not a number, or a malformed `id=value`
    #[error("invalid value for parameter '{param}': {reason}")]
    InvalidValue {
        /// Parameter id, or the raw text when no id could be read.
        param: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// Parameter value outside its range, or NaN
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    ParameterOutOfRange {
        /// Parameter id.
        param: String,
        /// Offending value.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_display_and_source() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn write_file_display_and_source() {
        let err = ConfigError::write_file("/out/x.toml", mock_io_err());
        assert!(err.to_string().contains("failed to write file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn create_dir_factory_produces_correct_variant() {
        let err = ConfigError::create_dir("/dir/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::CreateDir { ref path, .. } if path == std::path::Path::new("/dir/path"))
        );
    }

    #[test]
    fn preset_not_found_display() {
        let err = ConfigError::PresetNotFound("wobble".to_string());
        assert_eq!(err.to_string(), "preset not found: wobble");
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_parameter_display() {
        let err = ConfigError::UnknownParameter("detune".to_string());
        assert_eq!(err.to_string(), "unknown parameter: detune");
    }

    #[test]
    fn invalid_value_display() {
        let err = ConfigError::InvalidValue {
            param: "cutoff".to_string(),
            reason: "expected a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for parameter 'cutoff': expected a number"
        );
    }

    #[test]
    fn out_of_range_display() {
        let err = ConfigError::ParameterOutOfRange {
            param: "drive".to_string(),
            value: 3.0,
            min: 0.0,
            max: 2.0,
        };
        assert_eq!(err.to_string(), "parameter 'drive' value 3 out of range [0, 2]");
    }
}
