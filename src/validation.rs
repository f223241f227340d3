//! Offset correction and range validation.

use crate::config::Config;

/// Outcome of validating a despiked sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validated {
    /// Below the minimum valid distance, reported as exactly zero
    Near,

    /// Above the maximum valid distance, reported as unknown
    OutOfRange,

    /// Offset-corrected distance in millimeters, within the valid range
    InRange(u32),
}

impl Validated {
    /// Subtract the offset (clamping at zero) and check the valid range
    pub fn classify(despiked_mm: i32, config: &Config) -> Self {
        let adjusted = despiked_mm.saturating_sub(config.offset_mm).max(0) as u32;

        if adjusted < config.min_mm {
            Validated::Near
        } else if adjusted > config.max_mm {
            Validated::OutOfRange
        } else {
            Validated::InRange(adjusted)
        }
    }
}
