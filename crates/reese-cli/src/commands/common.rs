//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use reese_config::{ConfigError, Preset, find_preset, parse_param_assignment};
use reese_effects::{ParamSnapshot, ReeseParam};

/// Parse an `id=value` override for clap's `value_parser`.
pub fn parse_param(s: &str) -> Result<(ReeseParam, f32), String> {
    parse_param_assignment(s).map_err(|e| e.to_string())
}

/// Load a preset by factory name, user preset name, or path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    find_preset(name).map_err(|e| match e {
        ConfigError::PresetNotFound(_) => anyhow::anyhow!(
            "Preset '{}' not found. Use 'reese presets list' to see available presets.",
            name
        ),
        other => anyhow::Error::new(other),
    })
    .with_context(|| format!("loading preset '{name}'"))
}

/// Start from `base` and apply each override in order.
pub fn apply_overrides(base: ParamSnapshot, overrides: &[(ReeseParam, f32)]) -> ParamSnapshot {
    let mut params = base;
    for &(param, value) in overrides {
        params.set(param, value);
    }
    params
}
