//! Change suppression stages.
//!
//! Both stages decide whether an input is close enough to the current estimate
//! to be ignored. They never modify the estimate themselves.

/// Absolute deadband around the current estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deadband {
    /// Every change passes
    Off,

    /// Ignore changes of at most `mm` millimeters
    Threshold { mm: u32 },
}

impl Deadband {
    pub const DEFAULT_MM: u32 = 2;

    /// True when a change of `delta_mm` should be ignored
    pub fn suppresses(&self, delta_mm: f32) -> bool {
        match self {
            Deadband::Off => false,
            // Exactly at threshold is still suppressed
            Deadband::Threshold { mm } => delta_mm <= *mm as f32,
        }
    }
}

/// Distance above which the percent filter applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentStart {
    /// Half of the configured maximum valid distance
    HalfRange,

    /// Fixed start distance in millimeters
    Mm(u32),
}

impl PercentStart {
    /// Map a raw start setting, where zero or negative selects `HalfRange`
    pub const fn from_mm(start_mm: i32) -> Self {
        if start_mm > 0 {
            PercentStart::Mm(start_mm as u32)
        } else {
            PercentStart::HalfRange
        }
    }

    pub const fn resolve(&self, max_mm: u32) -> u32 {
        match self {
            PercentStart::HalfRange => max_mm / 2,
            PercentStart::Mm(mm) => *mm,
        }
    }
}

/// Relative deadband for long range readings.
///
/// At long range an absolute deadband is either too tight or too loose, so
/// changes are compared against the estimate instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentFilter {
    Off,

    /// Ignore relative changes below `fraction` once the input exceeds `start`
    Relative { fraction: f32, start: PercentStart },
}

impl PercentFilter {
    pub const DEFAULT_FRACTION: f32 = 0.05;

    pub fn suppresses(&self, input_mm: u32, estimate_mm: f32, max_mm: u32) -> bool {
        match self {
            PercentFilter::Off => false,
            PercentFilter::Relative { fraction, start } => {
                // No relative change is defined against a zero estimate
                if input_mm <= start.resolve(max_mm) || estimate_mm <= 0.0 {
                    return false;
                }

                let input = input_mm as f32;
                let change = (input - estimate_mm).abs() / estimate_mm;
                change < *fraction
            }
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            PercentFilter::Off => Ok(()),
            PercentFilter::Relative { fraction, .. } => {
                if !fraction.is_finite() || *fraction < 0.0 {
                    return Err("Percent filter fraction must be finite and >= 0.0");
                }
                Ok(())
            }
        }
    }
}
