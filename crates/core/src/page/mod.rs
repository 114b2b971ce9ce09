//! Shared parameters for the one-time page animations.

use crate::config::PageConfig;

/// Marker that qualifies the bio paragraph for the typewriter takeover.
pub const GREETING_MARKER: &str = "Hi,";

/// Delay in seconds applied to the `index`-th staggered row.
pub fn stagger_delay(index: usize, config: &PageConfig) -> f64 {
    index as f64 * config.stagger_step_s
}

/// Whether a paragraph's text qualifies it for the typewriter effect.
pub fn wants_typewriter(text: &str) -> bool {
    text.contains(GREETING_MARKER)
}

/// Outcome of an email copy attempt, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The asynchronous clipboard API accepted the write.
    Copied,
    /// The hidden-textarea copy command succeeded.
    FallbackCopied,
    /// Both paths failed; the tooltip shows instructions instead.
    Unavailable,
}

/// Tooltip text for a copy outcome.
pub fn tooltip_message(outcome: CopyOutcome) -> &'static str {
    match outcome {
        CopyOutcome::Copied | CopyOutcome::FallbackCopied => "Email copied! \u{1F4E7}",
        CopyOutcome::Unavailable => "Click to copy email",
    }
}

/// Value for the `--animation-duration` custom property at a given viewport
/// width, in seconds. Narrow viewports get the shortened motion.
pub fn animation_duration_for_width(width: f64, config: &PageConfig) -> f64 {
    if width <= config.narrow_width {
        config.narrow_duration_s
    } else {
        config.wide_duration_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_grows_linearly() {
        let config = PageConfig::default();
        assert_eq!(stagger_delay(0, &config), 0.0);
        assert_eq!(stagger_delay(4, &config), 0.4);
    }

    #[test]
    fn typewriter_requires_the_greeting() {
        assert!(wants_typewriter("Hi, I'm a researcher."));
        assert!(!wants_typewriter("Welcome to my homepage."));
    }

    #[test]
    fn copy_outcomes_map_to_messages() {
        assert_eq!(tooltip_message(CopyOutcome::Copied), "Email copied! \u{1F4E7}");
        assert_eq!(
            tooltip_message(CopyOutcome::FallbackCopied),
            "Email copied! \u{1F4E7}"
        );
        assert_eq!(
            tooltip_message(CopyOutcome::Unavailable),
            "Click to copy email"
        );
    }

    #[test]
    fn narrow_viewports_shorten_animations() {
        let config = PageConfig::default();
        assert_eq!(animation_duration_for_width(960.0, &config), 0.3);
        assert_eq!(animation_duration_for_width(961.0, &config), 0.6);
        assert_eq!(animation_duration_for_width(320.0, &config), 0.3);
    }
}
