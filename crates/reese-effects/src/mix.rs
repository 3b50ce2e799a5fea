//! Character macro: path weights derived from one control.
//!
//! | Path | Weight | character 0 | character 1 |
//! |------|--------|-------------|-------------|
//! | clean | `0.5 − 0.3c` | 0.5 | 0.2 |
//! | sub-octave | `0.2 + 0.4c` | 0.2 | 0.6 |
//! | ring-mod | `0.6c` | 0.0 | 0.6 |
//! | ring-mod over octave | `0.4c²` | 0.0 | 0.4 |
//!
//! The combined path is quadratic so it only comes in near the top of the
//! control's travel.

/// Per-path mix weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixLevels {
    /// Unprocessed input.
    pub clean: f32,
    /// Filtered octave divider output (further scaled by octave blend).
    pub sub_octave: f32,
    /// Filtered ring-modulated input.
    pub ring_mod: f32,
    /// Filtered ring-modulated octave path.
    pub ring_mod_octave: f32,
}

impl MixLevels {
    /// Compute weights for `character`, clamped to 0–1.
    #[inline]
    pub fn from_character(character: f32) -> Self {
        let c = character.clamp(0.0, 1.0);
        Self {
            clean: 0.5 - 0.3 * c,
            sub_octave: 0.2 + 0.4 * c,
            ring_mod: 0.6 * c,
            ring_mod_octave: 0.4 * c * c,
        }
    }
}

impl Default for MixLevels {
    fn default() -> Self {
        Self::from_character(0.5)
    }
}

/// Free-function form of [`MixLevels::from_character`].
#[inline]
pub fn calculate_mix_levels(character: f32) -> MixLevels {
    MixLevels::from_character(character)
}
