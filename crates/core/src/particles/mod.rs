//! Parameters for the ambient background particle field.

use crate::config::PageConfig;

/// Parameters for one ambient particle drifting up from the bottom edge.
///
/// Particles are spawned on a fixed interval and removed by an owned timer
/// once their lifetime elapses; nothing about them persists beyond that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientParticle {
    /// Horizontal start position as a percentage of the viewport width.
    pub left_percent: f64,
    /// Randomised animation delay in seconds.
    pub delay_s: f64,
}

impl AmbientParticle {
    /// Builds a particle from two uniform samples in `[0, 1)`. The delay is
    /// spread across the particle's full lifetime so spawns desynchronise.
    pub fn from_samples(samples: [f64; 2], config: &PageConfig) -> Self {
        Self {
            left_percent: samples[0] * 100.0,
            delay_s: samples[1] * config.ambient_ttl_ms as f64 / 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_spans_the_viewport() {
        let config = PageConfig::default();
        let left = AmbientParticle::from_samples([0.0, 0.0], &config);
        let right = AmbientParticle::from_samples([0.999, 0.0], &config);
        assert_eq!(left.left_percent, 0.0);
        assert!(right.left_percent < 100.0);
        assert!(right.left_percent > 99.0);
    }

    #[test]
    fn delay_never_exceeds_the_lifetime() {
        let config = PageConfig::default();
        let particle = AmbientParticle::from_samples([0.5, 0.999], &config);
        assert!(particle.delay_s < config.ambient_ttl_ms as f64 / 1_000.0);
    }
}
