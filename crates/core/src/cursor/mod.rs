//! Enablement rules and trail-particle parameters for the custom cursor.

use crate::config::CursorConfig;

/// Selector matched against hover targets to decide the cursor's `hover`
/// state. Covers links, form controls and the page's designated clickable,
/// avatar and email elements.
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, .clickable, .image.avatar, email, input, textarea, select";

/// Selector for textual content that shrinks the cursor to a reading dot
/// while hovered.
pub const TEXT_HOVER_SELECTOR: &str = "h1, h2, h3, p, a:not(.social-icons a)";

/// Selector for elements that retime the cursor's transition so it eases
/// toward them.
pub const MAGNETIC_SELECTOR: &str = ".social-icons a";

/// Device facts sampled once at controller init.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorEnv {
    pub viewport_width: f64,
    pub has_touch: bool,
}

/// Whether cursor effects run at all. Touch-class devices and narrow
/// viewports keep the native pointer.
pub fn cursor_enabled(env: CursorEnv, config: &CursorConfig) -> bool {
    !env.has_touch && env.viewport_width >= config.min_viewport_width
}

/// Whether a pointer-move event spawns a trailing particle, given one
/// uniform sample in `[0, 1)`.
pub fn should_spawn_trail(sample: f64, config: &CursorConfig) -> bool {
    sample > 1.0 - config.trail_probability
}

/// Parameters for one trailing particle.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailParticle {
    pub x: f64,
    pub y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub color: String,
}

impl TrailParticle {
    /// Builds a particle at the pointer position from three uniform samples
    /// in `[0, 1)`: palette pick, horizontal offset, vertical offset.
    pub fn from_samples(x: f64, y: f64, samples: [f64; 3], config: &CursorConfig) -> Self {
        let palette = &config.palette;
        let index = ((samples[0] * palette.len() as f64) as usize).min(palette.len() - 1);
        Self {
            x,
            y,
            offset_x: (samples[1] - 0.5) * config.trail_offset_px,
            offset_y: (samples[2] - 0.5) * config.trail_offset_px,
            color: palette[index].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(width: f64, touch: bool) -> CursorEnv {
        CursorEnv {
            viewport_width: width,
            has_touch: touch,
        }
    }

    #[test]
    fn narrow_viewports_are_disabled() {
        let config = CursorConfig::default();
        assert!(!cursor_enabled(env(767.0, false), &config));
        assert!(cursor_enabled(env(768.0, false), &config));
    }

    #[test]
    fn touch_devices_are_disabled_regardless_of_width() {
        let config = CursorConfig::default();
        assert!(!cursor_enabled(env(1_920.0, true), &config));
    }

    #[test]
    fn trail_spawn_matches_probability_band() {
        let config = CursorConfig::default();
        assert!(!should_spawn_trail(0.5, &config));
        assert!(!should_spawn_trail(0.95, &config));
        assert!(should_spawn_trail(0.951, &config));
        assert!(should_spawn_trail(0.999, &config));
    }

    #[test]
    fn particle_color_comes_from_the_palette() {
        let config = CursorConfig::default();
        for sample in [0.0, 0.4, 0.7, 0.999] {
            let particle =
                TrailParticle::from_samples(10.0, 20.0, [sample, 0.5, 0.5], &config);
            assert!(config.palette.contains(&particle.color));
        }
    }

    #[test]
    fn particle_offset_stays_within_range() {
        let config = CursorConfig::default();
        let low = TrailParticle::from_samples(0.0, 0.0, [0.0, 0.0, 0.0], &config);
        let high = TrailParticle::from_samples(0.0, 0.0, [0.0, 0.999, 0.999], &config);
        assert_eq!(low.offset_x, -10.0);
        assert!(high.offset_x < 10.0);
        assert!(low.offset_y <= high.offset_y);
    }
}
