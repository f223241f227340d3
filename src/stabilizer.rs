//! Stabilization stage.
//!
//! Runs the sub-stages in a fixed order: stability lock, percent filter,
//! deadband, smoothing. The first sub-stage that suppresses the update returns
//! the current estimate unchanged.

use crate::config::Config;
use crate::stability::LockState;

/// Stabilized distance estimate in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Estimate {
    /// No valid sample seen yet
    #[default]
    Uninitialized,

    Tracking(f32),
}

impl Estimate {
    pub fn mm(&self) -> Option<f32> {
        match self {
            Estimate::Uninitialized => None,
            Estimate::Tracking(mm) => Some(*mm),
        }
    }
}

/// State for the stabilization stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StabilizerState {
    pub estimate: Estimate,
    pub lock: LockState,
}

impl StabilizerState {
    pub const fn new() -> Self {
        Self {
            estimate: Estimate::Uninitialized,
            lock: LockState {
                last_movement_ms: 0,
                frozen: false,
            },
        }
    }

    /// Feed a validated millimeter value and return the new estimate
    pub fn stabilize(&mut self, input_mm: u32, now_ms: u32, config: &Config) -> f32 {
        let input = input_mm as f32;

        let estimate = match self.estimate {
            Estimate::Uninitialized => {
                // First valid sample seeds the estimate without smoothing
                log_debug!("estimate seeded at {}mm", input_mm);
                self.estimate = Estimate::Tracking(input);
                self.lock.seed(now_ms);
                return input;
            }
            Estimate::Tracking(estimate) => estimate,
        };

        let delta = (input - estimate).abs();

        if config.stability.check(delta, now_ms, &mut self.lock) {
            return estimate;
        }

        if config.percent.suppresses(input_mm, estimate, config.max_mm) {
            return estimate;
        }

        if config.deadband.suppresses(delta) {
            return estimate;
        }

        let next = config
            .smoothing
            .apply(estimate, input, config.max_mm, config.delta_norm);
        log_trace!("estimate {}mm -> {}mm (input {}mm)", estimate, next, input_mm);

        self.estimate = Estimate::Tracking(next);
        next
    }

    pub fn is_frozen(&self) -> bool {
        self.lock.frozen
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AdaptiveEma, Smoothing};
    use crate::stability::StabilityLock;
    use crate::suppression::{PercentFilter, PercentStart};

    #[test]
    fn first_sample_seeds_estimate() {
        let config = Config::default().with_ema(0.1, 0.2);
        let mut state = StabilizerState::new();

        assert_eq!(state.stabilize(500, 40, &config), 500.0);
        assert_eq!(state.estimate, Estimate::Tracking(500.0));
        assert_eq!(state.lock.last_movement_ms, 40);
    }

    #[test]
    fn passthrough_follows_input() {
        let config = Config::default();
        let mut state = StabilizerState::new();

        state.stabilize(500, 0, &config);
        assert_eq!(state.stabilize(620, 10, &config), 620.0);
        assert_eq!(state.estimate.mm(), Some(620.0));
    }

    #[test]
    fn deadband_holds_estimate() {
        let config = Config::default().with_deadband(5);
        let mut state = StabilizerState::new();

        state.stabilize(300, 0, &config);
        assert_eq!(state.stabilize(305, 10, &config), 300.0);
        assert_eq!(state.stabilize(296, 20, &config), 300.0);
        assert_eq!(state.stabilize(306, 30, &config), 306.0);
    }

    #[test]
    fn frozen_lock_holds_until_movement() {
        let config = Config::default().with_stability(10, 100);
        let mut state = StabilizerState::new();

        state.stabilize(800, 0, &config);
        state.stabilize(805, 50, &config);
        // Quiet for longer than the hold time
        assert_eq!(state.stabilize(808, 200, &config), 805.0);
        assert!(state.is_frozen());
        assert_eq!(state.stabilize(801, 300, &config), 805.0);

        // Movement beyond the threshold unlocks
        assert_eq!(state.stabilize(900, 400, &config), 900.0);
        assert!(!state.is_frozen());
    }

    #[test]
    fn ema_moves_partially() {
        let mut config = Config::default();
        config.smoothing = Smoothing::AdaptiveEma(AdaptiveEma::new(0.25, 0.25));
        let mut state = StabilizerState::new();

        state.stabilize(100, 0, &config);
        let out = state.stabilize(200, 10, &config);
        assert!((out - 125.0).abs() < 1e-3, "Expected ~125, got {}", out);
    }

    #[test]
    fn percent_filter_and_deadband_both_hold() {
        let mut config = Config::default().with_deadband(100);
        config.percent = PercentFilter::Relative {
            fraction: 0.01,
            start: PercentStart::Mm(500),
        };
        let mut state = StabilizerState::new();

        state.stabilize(1000, 0, &config);
        // 0.5% change is held by the percent filter
        assert_eq!(state.stabilize(1005, 10, &config), 1000.0);
        // 5% change passes the percent filter but not the 100mm deadband
        assert_eq!(state.stabilize(1050, 20, &config), 1000.0);
        assert_eq!(state.stabilize(1200, 30, &config), 1200.0);
    }

    #[test]
    fn reset_unseeds_and_unfreezes() {
        let config = Config::default().with_stability(10, 100);
        let mut state = StabilizerState::new();

        state.stabilize(800, 0, &config);
        state.stabilize(800, 200, &config);
        assert!(state.is_frozen());

        state.reset();
        assert_eq!(state, StabilizerState::new());

        // Next sample seeds again instead of being held
        assert_eq!(state.stabilize(300, 300, &config), 300.0);
        assert_eq!(state.lock.last_movement_ms, 300);
    }

    #[test]
    fn lock_stays_idle_when_disabled() {
        let config = Config::default();
        let mut state = StabilizerState::new();

        state.stabilize(100, 0, &config);
        state.stabilize(100, 100_000, &config);
        assert!(!state.is_frozen());
        assert!(!config.stability.is_enabled());
        assert_eq!(config.stability, StabilityLock::Off);
    }
}
