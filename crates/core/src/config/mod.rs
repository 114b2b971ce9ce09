use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration for the decoration layer.
///
/// Every tunable constant lives here so the wasm controllers never embed
/// magic numbers. A page may override individual fields by embedding a JSON
/// fragment and feeding it through [`FxConfig::from_json`]; anything left
/// out keeps its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub scroll: ScrollConfig,
    pub cursor: CursorConfig,
    pub page: PageConfig,
}

impl FxConfig {
    /// Parses a (possibly partial) JSON override of the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for the scroll-driven synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll offset in px beyond which the navbar gains its `scrolled`
    /// class.
    pub navbar_threshold: f64,
    /// Multiplier applied to the scroll offset for the injected background
    /// layer.
    pub parallax_speed: f64,
    /// Fixed-navbar allowance subtracted when scrolling to a section.
    pub nav_offset: f64,
    /// Duration of the one-shot counter animation in milliseconds.
    pub counter_duration_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 50.0,
            parallax_speed: 0.3,
            nav_offset: 100.0,
            counter_duration_ms: 2_000.0,
        }
    }
}

/// Configuration for the custom cursor and its transient effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Viewports narrower than this never get cursor effects.
    pub min_viewport_width: f64,
    /// Fraction of pointer-move events that spawn a trailing particle.
    pub trail_probability: f64,
    /// Lifetime of a trailing particle in milliseconds.
    pub trail_ttl_ms: u32,
    /// Lifetime of a click ripple in milliseconds.
    pub ripple_ttl_ms: u32,
    /// Total random offset range for trailing particles, in px per axis.
    pub trail_offset_px: f64,
    /// Colours trailing particles are drawn from.
    pub palette: Vec<String>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            trail_probability: 0.05,
            trail_ttl_ms: 1_000,
            ripple_ttl_ms: 600,
            trail_offset_px: 20.0,
            palette: vec![
                "#002D72".to_string(),
                "#39c".to_string(),
                "#0099cc".to_string(),
            ],
        }
    }
}

/// Configuration for the one-time page animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Per-index delay for staggered publication rows, in seconds.
    pub stagger_step_s: f64,
    /// Delay before the original bio paragraph fades back in, in
    /// milliseconds.
    pub typewriter_restore_ms: u32,
    /// Interval between ambient background particle spawns, in milliseconds.
    pub ambient_interval_ms: u32,
    /// Lifetime of an ambient particle in milliseconds.
    pub ambient_ttl_ms: u32,
    /// How long the copy tooltip stays fully visible, in milliseconds.
    pub tooltip_visible_ms: u32,
    /// Fade-out duration appended to the tooltip lifetime, in milliseconds.
    pub tooltip_fade_ms: u32,
    /// Debounce applied to resize handling, in milliseconds.
    pub resize_debounce_ms: u32,
    /// Viewports at or below this width get the shortened animations.
    pub narrow_width: f64,
    /// Value of `--animation-duration` on narrow viewports, in seconds.
    pub narrow_duration_s: f64,
    /// Value of `--animation-duration` on wide viewports, in seconds.
    pub wide_duration_s: f64,
    /// Multiplier applied to the scroll offset for the page header.
    pub header_parallax_speed: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            stagger_step_s: 0.1,
            typewriter_restore_ms: 4_000,
            ambient_interval_ms: 3_000,
            ambient_ttl_ms: 15_000,
            tooltip_visible_ms: 2_000,
            tooltip_fade_ms: 300,
            resize_debounce_ms: 250,
            narrow_width: 960.0,
            narrow_duration_s: 0.3,
            wide_duration_s: 0.6,
            header_parallax_speed: 0.5,
        }
    }
}
