//! Core library for the homepage decoration layer.
//!
//! Everything that can be computed without touching a browser lives here:
//! scroll-state maths, easing curves, particle parameters, cursor enablement
//! rules and the tunable configuration for all of it. Each module owns a
//! distinct subsystem and is driven by the wasm crate, which only reads
//! browser state and applies the results to the DOM.

pub mod config;
pub mod cursor;
pub mod error;
pub mod motion;
pub mod page;
pub mod particles;
pub mod scroll;

pub use config::{CursorConfig, FxConfig, PageConfig, ScrollConfig};
pub use cursor::{cursor_enabled, should_spawn_trail, CursorEnv, TrailParticle};
pub use error::{FxError, Result};
pub use motion::{ease_out_quart, CounterAnimation};
pub use page::{animation_duration_for_width, stagger_delay, tooltip_message, CopyOutcome};
pub use particles::AmbientParticle;
pub use scroll::{
    active_section, nav_target, navbar_scrolled, parallax_offset, progress_percent,
    reveal_triggered, NavKey, ScrollMetrics, ScrollTarget, SectionExtent,
};
