//! Factory presets bundled with the library.
//!
//! Eight starting points covering the styles the processor was voiced for.
//! They set the eight tone parameters; stereo width and noise amount keep
//! their defaults.

use crate::Preset;

/// Factory preset identifiers, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "classic_dnb_reese",
    "sub_terror",
    "industrial_grind",
    "dubstep_wobble",
    "smooth_operator",
    "neurofunk_madness",
    "minimal_deep",
    "distorted_beast",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("classic_dnb_reese", CLASSIC_DNB_REESE),
    ("sub_terror", SUB_TERROR),
    ("industrial_grind", INDUSTRIAL_GRIND),
    ("dubstep_wobble", DUBSTEP_WOBBLE),
    ("smooth_operator", SMOOTH_OPERATOR),
    ("neurofunk_madness", NEUROFUNK_MADNESS),
    ("minimal_deep", MINIMAL_DEEP),
    ("distorted_beast", DISTORTED_BEAST),
];

const CLASSIC_DNB_REESE: &str = r#"
name = "Classic DnB Reese"
description = "The quintessential drum & bass Reese sound. Medium tension, organic movement, perfect for rolling basslines."
genre = "DnB"

[params]
cutoff = 600.0
resonance = 0.70
ring_rate = 3.5
ring_depth = 0.50
octave_blend = 0.40
character = 0.60
drive = 1.20
volume = 0.0
"#;

const SUB_TERROR: &str = r#"
name = "Sub Terror"
description = "Deep, ominous sub-bass emphasis. Slow modulation creates breathing effect. Ideal for half-time and liquid DnB."
genre = "DnB/Halftime"

[params]
cutoff = 300.0
resonance = 0.80
ring_rate = 1.5
ring_depth = 0.30
octave_blend = 0.70
character = 0.40
drive = 1.00
volume = 0.0
"#;

const INDUSTRIAL_GRIND: &str = r#"
name = "Industrial Grind"
description = "Aggressive, harsh, grinding Reese. Fast modulation and heavy saturation. Perfect for dark techno and industrial."
genre = "Industrial/Techno"

[params]
cutoff = 800.0
resonance = 0.85
ring_rate = 7.0
ring_depth = 0.75
octave_blend = 0.35
character = 0.80
drive = 1.80
volume = 0.0
"#;

const DUBSTEP_WOBBLE: &str = r#"
name = "Dubstep Wobble"
description = "High cutoff with extreme resonance creates wobble-like movement. Brutal and in-your-face."
genre = "Dubstep"

[params]
cutoff = 1200.0
resonance = 0.90
ring_rate = 4.0
ring_depth = 0.85
octave_blend = 0.20
character = 0.70
drive = 1.50
volume = 0.0
"#;

const SMOOTH_OPERATOR: &str = r#"
name = "Smooth Operator"
description = "Subtle Reese effect, adds slight detuning and warmth without overwhelming the clean bass. Great for funk and house."
genre = "House/Funk"

[params]
cutoff = 700.0
resonance = 0.40
ring_rate = 2.0
ring_depth = 0.25
octave_blend = 0.30
character = 0.35
drive = 0.80
volume = 0.0
"#;

const NEUROFUNK_MADNESS: &str = r#"
name = "Neurofunk Madness"
description = "Chaotic, complex Reese with fast modulation. Creates unpredictable harmonic content. Pure neurofunk energy."
genre = "Neurofunk"

[params]
cutoff = 500.0
resonance = 0.75
ring_rate = 8.5
ring_depth = 0.90
octave_blend = 0.50
character = 0.90
drive = 1.60
volume = -2.0
"#;

const MINIMAL_DEEP: &str = r#"
name = "Minimal Deep"
description = "Very subtle effect, mostly sub-octave reinforcement. Adds weight without obvious modulation. Minimal techno friendly."
genre = "Minimal/Techno"

[params]
cutoff = 400.0
resonance = 0.30
ring_rate = 1.0
ring_depth = 0.20
octave_blend = 0.60
character = 0.30
drive = 0.90
volume = 0.0
"#;

const DISTORTED_BEAST: &str = r#"
name = "Distorted Beast"
description = "Maximum saturation creates gritty, distorted character. Aggressive and punchy. Crossbreed/darkstep specialist."
genre = "Crossbreed/Darkstep"

[params]
cutoff = 900.0
resonance = 0.65
ring_rate = 5.0
ring_depth = 0.60
octave_blend = 0.45
character = 0.75
drive = 2.00
volume = -3.0
"#;

/// Get all factory presets.
///
/// Presets that fail to parse are skipped (a test guards against this).
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitively.
///
/// `"sub_terror"`, `"Sub Terror"` and `"sub terror"` all match.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let key = name.trim().to_lowercase().replace([' ', '-'], "_");
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| *id == key)
        .and_then(|(_, toml)| Preset::from_toml(toml).ok())
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reese_effects::ReeseParam;

    #[test]
    fn all_factory_presets_parse() {
        for (id, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{id}' failed to parse: {e}"));
            preset.validate().unwrap();
            assert!(preset.description.is_some(), "{id} has no description");
            assert!(preset.genre.is_some(), "{id} has no genre");
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn names_match_table() {
        let ids: Vec<&str> = FACTORY_PRESETS_TOML.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, FACTORY_PRESET_NAMES);
    }

    #[test]
    fn lookup_by_id_and_display_name() {
        let by_id = get_factory_preset("dubstep_wobble").unwrap();
        let by_name = get_factory_preset("Dubstep Wobble").unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id.params.cutoff, 1200.0);
        assert_eq!(by_id.params.resonance, 0.9);

        assert!(is_factory_preset("sub-terror"));
        assert!(!is_factory_preset("wobble"));
    }

    #[test]
    fn classic_values() {
        let p = get_factory_preset("classic_dnb_reese").unwrap().params;
        assert_eq!(p.cutoff, 600.0);
        assert_eq!(p.ring_rate, 3.5);
        assert_eq!(p.octave_blend, 0.4);
        assert_eq!(p.drive, 1.2);
        assert_eq!(p.stereo_width, ReeseParam::StereoWidth.default_value());
        assert_eq!(p.noise_amount, ReeseParam::NoiseAmount.default_value());
    }

    #[test]
    fn level_trims() {
        assert_eq!(get_factory_preset("neurofunk_madness").unwrap().params.volume, -2.0);
        assert_eq!(get_factory_preset("distorted_beast").unwrap().params.volume, -3.0);
        assert!(factory_presets().iter().all(|p| p.engine.is_none()));
    }
}
