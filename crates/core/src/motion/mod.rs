//! Easing curves and the one-shot counter animation.

/// Quartic ease-out on `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One-shot animation of a numeric display from zero to a target value.
///
/// The animation is sampled once per frame with the elapsed wall-clock time;
/// the displayed value rises monotonically along the ease-out-quartic curve
/// and lands exactly on the target once the duration has elapsed. The
/// once-only guarantee is enforced by the driving observer, which
/// unobserves its element after the first trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: f64) -> Self {
        Self {
            target: target.max(0.0),
            duration_ms: duration_ms.max(1.0),
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Displayed value after `elapsed_ms` of animation.
    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        (self.target * ease_out_quart(progress)).floor() as i64
    }

    /// Whether the animation has run to completion.
    pub fn finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn easing_front_loads_progress() {
        // Ease-out: more than half the distance is covered by t = 0.5.
        assert!(ease_out_quart(0.5) > 0.5);
        assert!(ease_out_quart(0.25) > 0.25);
    }

    #[test]
    fn counter_starts_at_zero_and_lands_on_target() {
        let anim = CounterAnimation::new(1_234.0, 2_000.0);
        assert_eq!(anim.value_at(0.0), 0);
        assert_eq!(anim.value_at(2_000.0), 1_234);
        assert_eq!(anim.value_at(10_000.0), 1_234);
        assert!(anim.finished(2_000.0));
        assert!(!anim.finished(1_999.0));
    }

    #[test]
    fn counter_is_monotonic() {
        let anim = CounterAnimation::new(500.0, 2_000.0);
        let mut last = -1i64;
        for step in 0..=200 {
            let value = anim.value_at(step as f64 * 10.0);
            assert!(value >= last, "regressed at step {step}");
            last = value;
        }
        assert_eq!(last, 500);
    }

    #[test]
    fn zero_target_stays_at_zero() {
        let anim = CounterAnimation::new(0.0, 2_000.0);
        assert_eq!(anim.value_at(1_000.0), 0);
        assert_eq!(anim.value_at(2_000.0), 0);
    }
}
