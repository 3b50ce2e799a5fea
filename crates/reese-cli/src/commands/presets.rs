//! Preset management commands.
//!
//! Provides commands to list, show, save and delete presets.

use crate::commands::common::{apply_overrides, load_preset, parse_param};
use crate::commands::params::format_value;
use clap::{Args, Subcommand};
use reese_config::{
    Preset, ensure_user_presets_dir, factory_presets, is_factory_preset, list_user_presets,
    preset_file_name, preset_name_from_path, user_presets_dir,
};
use reese_effects::{ParamSnapshot, ReeseParam};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from (defaults otherwise)
        #[arg(short, long)]
        preset: Option<String>,

        /// Parameter override (e.g., "ring_rate=4.5")
        #[arg(long, value_parser = parse_param, number_of_values = 1)]
        param: Vec<(ReeseParam, f32)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            preset,
            param,
            description,
            force,
        } => {
            let base = preset
                .as_deref()
                .map(load_preset)
                .transpose()?
                .map(|p| p.params)
                .unwrap_or_default();
            let params = apply_overrides(base, &param);
            let dir = ensure_user_presets_dir()?;
            let path = save_preset_in(&dir, &name, &params, description.as_deref(), force)?;
            println!("Saved preset '{}' to {}", name, path.display());
            Ok(())
        }
        PresetsCommand::Delete { name, force } => {
            let path = delete_preset_in(&user_presets_dir(), &name, force)?;
            println!("Deleted preset '{}' ({}).", name, path.display());
            Ok(())
        }
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let genre = preset.genre.as_deref().unwrap_or("");
            println!("  {:20} [{}]", preset.name, genre);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: reese presets save <name> --param cutoff=800\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:20} - {desc}");
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping preset");
                        println!("  {name:20} - (error loading)");
                    }
                }
            }
            println!();
        }
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
    }
    if let Some(genre) = &preset.genre {
        println!("Genre:       {genre}");
    }
    println!();

    println!("Parameters:");
    for (param, value) in preset.params.iter() {
        println!("  {:16} {}", param.name(), format_value(param, value));
    }

    if let Some(engine) = &preset.engine {
        println!();
        println!("Engine:");
        println!("  smoothing        {:.3} s", engine.smoothing_seconds);
        println!("  ring wave        {:?}", engine.ring_wave_shape);
        println!("  saturation       {:?}", engine.saturation);
        println!("  character        {:.2}", engine.shaper_character);
        println!("  noise color      {:?}", engine.noise_color);
        println!("  octave sens.     {:.2}", engine.octave_sensitivity);
        println!("  combined mod     {:?}", engine.combined_modulator);
        if let Some(seed) = engine.seed {
            println!("  seed             {seed}");
        }
    }

    Ok(())
}

/// Write `params` as a user preset in `dir`, returning the file path.
fn save_preset_in(
    dir: &Path,
    name: &str,
    params: &ParamSnapshot,
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<PathBuf> {
    if is_factory_preset(name) {
        anyhow::bail!("'{name}' is a factory preset name. Choose a different name.");
    }

    let path = dir.join(preset_file_name(name)?);
    if path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let mut preset = Preset::from_snapshot(name, params);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    preset.save(&path)?;
    Ok(path)
}

/// Remove a user preset from `dir`, returning the removed path.
fn delete_preset_in(dir: &Path, name: &str, force: bool) -> anyhow::Result<PathBuf> {
    if is_factory_preset(name) {
        anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
    }

    let path = dir.join(preset_file_name(name)?);
    if !path.exists() {
        anyhow::bail!("User preset '{name}' not found.");
    }
    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn custom_params() -> ParamSnapshot {
        apply_overrides(
            ParamSnapshot::default(),
            &[(ReeseParam::Cutoff, 850.0), (ReeseParam::RingDepth, 0.7)],
        )
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path =
            save_preset_in(dir.path(), "Night Drive", &custom_params(), Some("dark"), false)
                .unwrap();
        assert!(path.ends_with("night_drive.toml"));

        let preset = Preset::load(&path).unwrap();
        assert_eq!(preset.name, "Night Drive");
        assert_eq!(preset.description.as_deref(), Some("dark"));
        assert_eq!(preset.genre.as_deref(), Some("User"));
        assert_eq!(preset.params, custom_params());
    }

    #[test]
    fn save_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let params = custom_params();
        save_preset_in(dir.path(), "mine", &params, None, false).unwrap();
        assert!(save_preset_in(dir.path(), "mine", &params, None, false).is_err());
        assert!(save_preset_in(dir.path(), "mine", &params, None, true).is_ok());
    }

    #[test]
    fn factory_names_are_reserved() {
        let dir = TempDir::new().unwrap();
        let params = ParamSnapshot::default();
        assert!(save_preset_in(dir.path(), "Sub Terror", &params, None, true).is_err());
        assert!(delete_preset_in(dir.path(), "sub_terror", true).is_err());
    }

    #[test]
    fn names_cannot_leave_presets_dir() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("presets");
        std::fs::create_dir(&dir).unwrap();
        let outside = root.path().join("x.toml");
        std::fs::write(&outside, "name = \"x\"").unwrap();

        assert!(delete_preset_in(&dir, "../x", true).is_err());
        assert!(outside.exists());
        assert!(save_preset_in(&dir, "../y", &ParamSnapshot::default(), None, true).is_err());
        assert!(!root.path().join("y.toml").exists());
    }

    #[test]
    fn delete_requires_force() {
        let dir = TempDir::new().unwrap();
        let path =
            save_preset_in(dir.path(), "gone", &ParamSnapshot::default(), None, false).unwrap();

        assert!(delete_preset_in(dir.path(), "gone", false).is_err());
        assert!(path.exists());
        delete_preset_in(dir.path(), "gone", true).unwrap();
        assert!(!path.exists());
        assert!(delete_preset_in(dir.path(), "gone", true).is_err());
    }
}
