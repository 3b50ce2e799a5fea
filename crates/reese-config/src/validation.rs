//! Parameter and preset validation.
//!
//! Presets on disk and `id=value` overrides on the command line are checked
//! against the [`ReeseParam`] table before they reach an engine. The engine
//! itself clamps silently; this layer reports what was wrong.
//!
//! # Example
//!
//! ```rust
//! use reese_config::validation::{parse_param_assignment, validate_param};
//! use reese_effects::ReeseParam;
//!
//! let (param, value) = parse_param_assignment("cutoff=800").unwrap();
//! assert_eq!(param, ReeseParam::Cutoff);
//! assert_eq!(value, 800.0);
//!
//! assert!(validate_param("drive", 3.0).is_err());
//! ```

use reese_effects::{ParamSnapshot, ReeseParam};

use crate::error::ConfigError;

/// Check that `id` names a parameter and `value` lies within its range.
pub fn validate_param(id: &str, value: f32) -> Result<ReeseParam, ConfigError> {
    let param =
        ReeseParam::from_id(id).ok_or_else(|| ConfigError::UnknownParameter(id.to_string()))?;
    if param.contains(value) {
        Ok(param)
    } else {
        Err(ConfigError::ParameterOutOfRange {
            param: id.to_string(),
            value,
            min: param.min(),
            max: param.max(),
        })
    }
}

/// Check every value of a snapshot. Reports the first failure.
pub fn validate_snapshot(snapshot: &ParamSnapshot) -> Result<(), ConfigError> {
    for (param, value) in snapshot.iter() {
        validate_param(param.id(), value)?;
    }
    Ok(())
}

/// Check a raw `[params]` table: known ids, numeric values, in range.
pub fn validate_params_table(table: &toml::Table) -> Result<(), ConfigError> {
    for (key, value) in table {
        let number = match value {
            toml::Value::Float(f) => *f as f32,
            toml::Value::Integer(i) => *i as f32,
            other => {
                return Err(ConfigError::InvalidValue {
                    param: key.clone(),
                    reason: format!("expected a number, found {}", other.type_str()),
                });
            }
        };
        validate_param(key, number)?;
    }
    Ok(())
}

/// Parse and validate an `id=value` override.
pub fn parse_param_assignment(text: &str) -> Result<(ReeseParam, f32), ConfigError> {
    let (id, raw) = text.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
        param: text.to_string(),
        reason: "expected id=value".to_string(),
    })?;
    let id = id.trim();
    let value: f32 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        param: id.to_string(),
        reason: format!("'{}' is not a number", raw.trim()),
    })?;
    let param = validate_param(id, value)?;
    Ok((param, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_values() {
        assert_eq!(validate_param("cutoff", 200.0).unwrap(), ReeseParam::Cutoff);
        assert_eq!(validate_param("cutoff", 2000.0).unwrap(), ReeseParam::Cutoff);
        assert_eq!(validate_param("volume", -60.0).unwrap(), ReeseParam::Volume);
    }

    #[test]
    fn rejects_unknown_id() {
        let err = validate_param("detune", 0.5).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter(ref id) if id == "detune"));
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        let err = validate_param("resonance", 0.99).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ParameterOutOfRange { max, .. } if (max - 0.95).abs() < 1e-6
        ));
        assert!(validate_param("drive", f32::NAN).is_err());
    }

    #[test]
    fn default_snapshot_is_valid() {
        validate_snapshot(&ParamSnapshot::default()).unwrap();
    }

    #[test]
    fn snapshot_with_bad_field_fails() {
        let snapshot = ParamSnapshot {
            ring_rate: 20.0,
            ..ParamSnapshot::default()
        };
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(ConfigError::ParameterOutOfRange { ref param, .. }) if param == "ring_rate"
        ));
    }

    #[test]
    fn table_accepts_integers_and_floats() {
        let table: toml::Table = toml::from_str("cutoff = 600\nresonance = 0.7").unwrap();
        validate_params_table(&table).unwrap();
    }

    #[test]
    fn table_rejects_strings_and_unknown_keys() {
        let table: toml::Table = toml::from_str("cutoff = \"600\"").unwrap();
        assert!(matches!(
            validate_params_table(&table),
            Err(ConfigError::InvalidValue { .. })
        ));

        let table: toml::Table = toml::from_str("ringRate = 3.0").unwrap();
        assert!(matches!(
            validate_params_table(&table),
            Err(ConfigError::UnknownParameter(_))
        ));
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_param_assignment("ring_depth=0.75").unwrap(),
            (ReeseParam::RingDepth, 0.75)
        );
        assert_eq!(
            parse_param_assignment(" volume = -6 ").unwrap(),
            (ReeseParam::Volume, -6.0)
        );
    }

    #[test]
    fn malformed_assignments_fail() {
        assert!(matches!(
            parse_param_assignment("cutoff"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_param_assignment("cutoff=loud"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_param_assignment("cutoff=5000"),
            Err(ConfigError::ParameterOutOfRange { .. })
        ));
    }
}
