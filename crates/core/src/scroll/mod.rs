//! Pure scroll-state maths for the synchronizer.
//!
//! The wasm controller samples the browser once per handled frame and feeds
//! the resulting [`ScrollMetrics`] through these functions; nothing here is
//! cached between frames.

/// Snapshot of the page geometry for one handled frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Vertical midpoint of the viewport in document coordinates.
    pub fn viewport_midpoint(&self) -> f64 {
        self.scroll_top + self.viewport_height / 2.0
    }

    /// Largest reachable scroll offset. Zero for pages that do not scroll.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }
}

/// Vertical extent of one observed section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionExtent {
    pub top: f64,
    pub height: f64,
}

impl SectionExtent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Scroll progress as a percentage, clamped to `[0, 100]`.
pub fn progress_percent(metrics: ScrollMetrics) -> f64 {
    let max = metrics.max_scroll();
    if max <= 0.0 {
        return 0.0;
    }
    (metrics.scroll_top / max * 100.0).clamp(0.0, 100.0)
}

/// Whether the navbar should carry its `scrolled` class.
pub fn navbar_scrolled(metrics: ScrollMetrics, threshold: f64) -> bool {
    metrics.scroll_top > threshold
}

/// Index of the section whose `[top, bottom)` extent contains the viewport
/// midpoint. At most one section wins; the first match is taken.
pub fn active_section(metrics: ScrollMetrics, sections: &[SectionExtent]) -> Option<usize> {
    let midpoint = metrics.viewport_midpoint();
    sections
        .iter()
        .position(|section| midpoint >= section.top && midpoint < section.bottom())
}

/// Offset for a parallax layer moving at `speed` times the scroll rate.
pub fn parallax_offset(metrics: ScrollMetrics, speed: f64) -> f64 {
    metrics.scroll_top * speed
}

/// Whether an element's reveal trigger point has passed its top edge. The
/// trigger fires once a quarter of the element pokes above the fold.
pub fn reveal_triggered(metrics: ScrollMetrics, extent: SectionExtent) -> bool {
    metrics.scroll_top + metrics.viewport_height - extent.height / 4.0 > extent.top
}

/// Keyboard keys the synchronizer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Home,
    End,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

/// Where a navigation key wants the viewport to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Section(usize),
    Top,
    Bottom,
}

/// Resolves a navigation key against the current indicator state.
///
/// Arrow keys step through the section list and no-op at the edges or when
/// no section is active. Home and End always resolve.
pub fn nav_target(
    key: NavKey,
    active: Option<usize>,
    section_count: usize,
) -> Option<ScrollTarget> {
    match key {
        NavKey::Home => Some(ScrollTarget::Top),
        NavKey::End => Some(ScrollTarget::Bottom),
        NavKey::Up => {
            let current = active?;
            (current > 0).then(|| ScrollTarget::Section(current - 1))
        }
        NavKey::Down => {
            let current = active?;
            (current + 1 < section_count).then(|| ScrollTarget::Section(current + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics::new(scroll_top, 2_000.0, 800.0)
    }

    #[test]
    fn progress_at_rest_is_zero() {
        assert_eq!(progress_percent(metrics(0.0)), 0.0);
    }

    #[test]
    fn progress_halfway_is_fifty() {
        assert_eq!(progress_percent(metrics(600.0)), 50.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(metrics(5_000.0)), 100.0);
        assert_eq!(progress_percent(metrics(-10.0)), 0.0);
    }

    #[test]
    fn unscrollable_page_reports_zero_progress() {
        let short = ScrollMetrics::new(0.0, 600.0, 800.0);
        assert_eq!(progress_percent(short), 0.0);
    }

    #[test]
    fn navbar_threshold_is_exclusive() {
        assert!(!navbar_scrolled(metrics(50.0), 50.0));
        assert!(navbar_scrolled(metrics(51.0), 50.0));
    }

    #[test]
    fn at_most_one_section_is_active() {
        let sections = [
            SectionExtent::new(0.0, 500.0),
            SectionExtent::new(500.0, 500.0),
            SectionExtent::new(1_000.0, 500.0),
        ];
        // Midpoint 400 falls in the first section only.
        assert_eq!(active_section(metrics(0.0), &sections), Some(0));
        // Midpoint exactly on a boundary belongs to the lower section.
        assert_eq!(active_section(metrics(100.0), &sections), Some(1));
        // Midpoint past every section matches nothing.
        assert_eq!(active_section(metrics(1_200.0), &sections), None);
    }

    #[test]
    fn active_section_with_no_sections_is_none() {
        assert_eq!(active_section(metrics(0.0), &[]), None);
    }

    #[test]
    fn parallax_scales_linearly() {
        assert_eq!(parallax_offset(metrics(200.0), 0.3), 60.0);
        assert_eq!(parallax_offset(metrics(0.0), 0.5), 0.0);
    }

    #[test]
    fn reveal_fires_when_quarter_visible() {
        let extent = SectionExtent::new(1_000.0, 400.0);
        // Fold at 800, trigger point 800 - 100 = 700: not yet.
        assert!(!reveal_triggered(metrics(0.0), extent));
        // Fold at 1_101, trigger point 1_001: passed the top edge.
        assert!(reveal_triggered(metrics(301.0), extent));
    }

    #[test]
    fn arrows_step_and_stop_at_edges() {
        assert_eq!(
            nav_target(NavKey::Down, Some(0), 3),
            Some(ScrollTarget::Section(1))
        );
        assert_eq!(
            nav_target(NavKey::Up, Some(2), 3),
            Some(ScrollTarget::Section(1))
        );
        assert_eq!(nav_target(NavKey::Up, Some(0), 3), None);
        assert_eq!(nav_target(NavKey::Down, Some(2), 3), None);
        assert_eq!(nav_target(NavKey::Down, None, 3), None);
    }

    #[test]
    fn home_and_end_ignore_indicator_state() {
        assert_eq!(nav_target(NavKey::Home, None, 0), Some(ScrollTarget::Top));
        assert_eq!(
            nav_target(NavKey::End, Some(1), 3),
            Some(ScrollTarget::Bottom)
        );
    }

    #[test]
    fn unknown_keys_do_not_map() {
        assert_eq!(NavKey::from_key("PageDown"), None);
        assert_eq!(NavKey::from_key("ArrowUp"), Some(NavKey::Up));
    }
}
