//! Platform-specific preset locations and preset lookup.
//!
//! - **User presets**: `~/.config/reese/presets/` (Linux),
//!   `~/Library/Application Support/reese/presets/` (macOS),
//!   `%APPDATA%\reese\presets\` (Windows)

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset::Preset;

/// Application name used for directory paths.
const APP_NAME: &str = "reese";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./reese/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// File name for a preset name: lowercased, spaces to underscores, `.toml`
/// appended.
///
/// Names that are empty or contain `/`, `\` or `..` are rejected so the
/// result always stays inside the directory it is joined to.
pub fn preset_file_name(name: &str) -> Result<String, ConfigError> {
    let stem = name.trim().trim_end_matches(".toml").to_lowercase().replace(' ', "_");
    if stem.is_empty() || stem.contains(['/', '\\']) || stem.contains("..") {
        return Err(ConfigError::InvalidPresetName(name.to_string()));
    }
    Ok(format!("{stem}.toml"))
}

/// Locate a preset file.
///
/// `name` may be a path to an existing file, or a preset name looked up in
/// the user presets directory (with or without `.toml`).
pub fn find_preset_file(name: &str) -> Option<PathBuf> {
    find_preset_file_in(name, &user_presets_dir())
}

fn find_preset_file_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let user_path = dir.join(preset_file_name(name).ok()?);
    user_path.is_file().then_some(user_path)
}

/// Resolve a preset by name: factory presets first, then files.
///
/// # Example
///
/// ```rust
/// use reese_config::find_preset;
///
/// let preset = find_preset("Classic DnB Reese").unwrap();
/// assert_eq!(preset.params.cutoff, 600.0);
/// ```
pub fn find_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    let path =
        find_preset_file(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))?;
    Preset::load(path)
}

/// List preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use reese_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/my_wobble.toml"));
/// assert_eq!(name, Some("my_wobble".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
