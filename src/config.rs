use crate::filters::{AdaptiveEma, DeltaNorm, Smoothing};
use crate::stability::StabilityLock;
use crate::suppression::{Deadband, PercentFilter, PercentStart};

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidRange,
    InvalidAlpha(&'static str),
    InvalidDeltaNorm,
    InvalidPercentThreshold,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidRange => write!(f, "min_mm must not exceed max_mm"),
            ConfigError::InvalidAlpha(reason) => write!(f, "{}", reason),
            ConfigError::InvalidDeltaNorm => write!(f, "delta normalization must be > 0 mm"),
            ConfigError::InvalidPercentThreshold => {
                write!(f, "percent filter fraction must be finite and >= 0.0")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Subtracted from the despiked reading
    pub offset_mm: i32,
    /// Readings below are reported as exactly zero
    pub min_mm: u32,
    /// Readings above are reported as unknown
    pub max_mm: u32,
    pub publish_interval_ms: u32,
    /// Consecutive invalid samples tolerated before the output turns unknown
    pub nan_threshold: u32,

    pub smoothing: Smoothing,
    pub deadband: Deadband,
    pub delta_norm: DeltaNorm,
    pub stability: StabilityLock,
    pub percent: PercentFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offset_mm: 10,
            min_mm: 15,
            max_mm: 2000,
            publish_interval_ms: 200,
            nan_threshold: 2,
            smoothing: Smoothing::Passthrough,
            deadband: Deadband::Off,
            delta_norm: DeltaNorm::Off,
            stability: StabilityLock::Off,
            percent: PercentFilter::Off,
        }
    }
}

impl Config {
    /// Adaptive EMA and a small deadband, nothing else
    pub fn simple() -> Self {
        Self {
            smoothing: Smoothing::AdaptiveEma(AdaptiveEma::default()),
            deadband: Deadband::Threshold {
                mm: Deadband::DEFAULT_MM,
            },
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, mm: i32) -> Self {
        self.offset_mm = mm;
        self
    }

    pub fn with_range(mut self, min_mm: u32, max_mm: u32) -> Self {
        self.min_mm = min_mm;
        self.max_mm = max_mm;
        self
    }

    pub fn with_publish_interval(mut self, ms: u32) -> Self {
        self.publish_interval_ms = ms;
        self
    }

    pub fn with_nan_threshold(mut self, count: u32) -> Self {
        self.nan_threshold = count;
        self
    }

    pub fn with_ema(mut self, alpha_min: f32, alpha_max: f32) -> Self {
        self.smoothing = Smoothing::AdaptiveEma(AdaptiveEma::new(alpha_min, alpha_max));
        self
    }

    pub fn with_deadband(mut self, mm: u32) -> Self {
        self.deadband = Deadband::Threshold { mm };
        self
    }

    pub fn with_delta_norm(mut self, norm_mm: u32) -> Self {
        self.delta_norm = DeltaNorm::Scale { norm_mm };
        self
    }

    pub fn with_stability(mut self, threshold_mm: u32, hold_ms: u32) -> Self {
        self.stability = StabilityLock::Hold {
            threshold_mm,
            hold_ms,
        };
        self
    }

    /// `start_mm <= 0` applies the filter above half the maximum range
    pub fn with_percent_filter(mut self, fraction: f32, start_mm: i32) -> Self {
        self.percent = PercentFilter::Relative {
            fraction,
            start: PercentStart::from_mm(start_mm),
        };
        self
    }

    pub fn without_ema(mut self) -> Self {
        self.smoothing = Smoothing::Passthrough;
        self
    }

    pub fn without_deadband(mut self) -> Self {
        self.deadband = Deadband::Off;
        self
    }

    pub fn without_delta_norm(mut self) -> Self {
        self.delta_norm = DeltaNorm::Off;
        self
    }

    pub fn without_stability(mut self) -> Self {
        self.stability = StabilityLock::Off;
        self
    }

    pub fn without_percent_filter(mut self) -> Self {
        self.percent = PercentFilter::Off;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Equal bounds are allowed: only a single distance is then valid
        if self.min_mm > self.max_mm {
            return Err(ConfigError::InvalidRange);
        }

        self.smoothing.validate().map_err(ConfigError::InvalidAlpha)?;

        // Division by norm_mm happens in the EMA curve
        self.delta_norm
            .validate()
            .map_err(|_| ConfigError::InvalidDeltaNorm)?;

        self.percent
            .validate()
            .map_err(|_| ConfigError::InvalidPercentThreshold)?;

        Ok(())
    }
}
