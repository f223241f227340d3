use num_traits::ToPrimitive;

use crate::config::{Config, ConfigError};
use crate::publish::Reading;
use crate::state::State;
use crate::validation::Validated;

pub struct RangeFilter {
    config: Config,
    state: State,
}

impl RangeFilter {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        log_debug!(
            "range filter created: {}..{}mm, publish every {}ms",
            config.min_mm,
            config.max_mm,
            config.publish_interval_ms
        );
        Ok(Self {
            config,
            state: State::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Swap in a new configuration, keeping the session state.
    ///
    /// On error the previous configuration stays active.
    pub fn reconfigure(&mut self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;

        // A freeze from a disabled lock must not resurface when it is re-enabled
        if !config.stability.is_enabled() {
            self.state.stabilizer.lock.frozen = false;
        }

        log_debug!("range filter reconfigured");
        self.config = config;
        Ok(())
    }

    /// Forget all session state, as if freshly created
    pub fn reset(&mut self) {
        log_debug!("range filter reset");
        self.state.median.reset();
        self.state.stabilizer.reset();
        self.state.publisher.reset();
    }

    /// Process one raw sample taken at `now_ms`.
    ///
    /// Samples of zero or below mean the sensor had no reading this cycle.
    /// Samples beyond the `i32` range saturate: too large reads as out of
    /// range, too small (or NaN) as no reading.
    pub fn update<S>(&mut self, raw_mm: S, now_ms: u32) -> Reading
    where
        S: ToPrimitive,
    {
        let raw = saturate_mm(&raw_mm);

        if raw <= 0 {
            return self
                .state
                .publisher
                .on_invalid(now_ms, self.config.nan_threshold);
        }
        self.state.publisher.on_valid();

        // Despike before any threshold sees the value
        let despiked = self.state.median.apply(raw);

        let mm = match Validated::classify(despiked, &self.config) {
            Validated::Near => return Reading::Distance(0.0),
            Validated::OutOfRange => return Reading::Unknown,
            Validated::InRange(mm) => mm,
        };

        let stable_mm = self.state.stabilizer.stabilize(mm, now_ms, &self.config);

        self.state
            .publisher
            .offer(stable_mm, now_ms, self.config.publish_interval_ms)
    }

    /// Like [`update`](Self::update), in meters: NaN for unknown, exactly 0.0
    /// below the valid range.
    pub fn process<S>(&mut self, raw_mm: S, now_ms: u32) -> f32
    where
        S: ToPrimitive,
    {
        self.update(raw_mm, now_ms).meters()
    }

    /// Current stabilized estimate in millimeters, if seeded
    pub fn estimate_mm(&self) -> Option<f32> {
        self.state.stabilizer.estimate.mm()
    }

    pub fn is_frozen(&self) -> bool {
        self.state.stabilizer.is_frozen()
    }

    pub fn invalid_streak(&self) -> u32 {
        self.state.publisher.invalid_streak
    }

    pub fn last_published(&self) -> Reading {
        self.state.publisher.last_published
    }
}

fn saturate_mm<S: ToPrimitive>(raw_mm: &S) -> i32 {
    raw_mm.to_i32().unwrap_or_else(|| match raw_mm.to_f64() {
        Some(mm) if mm > 0.0 => i32::MAX,
        _ => 0,
    })
}
