//! Externally visible output.
//!
//! The publisher rate-limits value changes and collapses the output to
//! `Reading::Unknown` after a streak of invalid raw samples.

/// Distance as seen by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    /// No trustworthy distance: nothing published yet, sensor lost or out of range
    #[default]
    Unknown,

    /// Distance in meters, exactly 0.0 for readings below the valid range
    Distance(f32),
}

impl Reading {
    /// Meters, with NaN standing in for `Unknown`
    pub fn meters(&self) -> f32 {
        match self {
            Reading::Unknown => f32::NAN,
            Reading::Distance(m) => *m,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Reading::Unknown)
    }

    pub fn from_mm(mm: f32) -> Self {
        Reading::Distance(mm / 1000.0)
    }
}

/// Publish throttle and invalid-streak bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Publisher {
    pub invalid_streak: u32,
    pub last_published: Reading,
    pub last_publish_ms: Option<u32>,
}

impl Publisher {
    pub const fn new() -> Self {
        Self {
            invalid_streak: 0,
            last_published: Reading::Unknown,
            last_publish_ms: None,
        }
    }

    /// Register a raw sample that carried no reading.
    ///
    /// Repeats the last published value until the streak reaches
    /// `nan_threshold`, then publishes `Unknown`.
    pub fn on_invalid(&mut self, now_ms: u32, nan_threshold: u32) -> Reading {
        self.invalid_streak = self.invalid_streak.saturating_add(1);

        if self.invalid_streak >= nan_threshold {
            if !self.last_published.is_unknown() {
                log_debug!("sensor lost after {} invalid samples", self.invalid_streak);
            }
            self.last_published = Reading::Unknown;
            self.last_publish_ms = Some(now_ms);
            return Reading::Unknown;
        }

        self.last_published
    }

    /// Register a raw sample that carried a reading
    pub fn on_valid(&mut self) {
        self.invalid_streak = 0;
    }

    /// Offer a freshly stabilized millimeter value for publishing.
    ///
    /// Publishes when `interval_ms` has elapsed since the last publish (or
    /// nothing was published yet), otherwise repeats the last published value.
    pub fn offer(&mut self, estimate_mm: f32, now_ms: u32, interval_ms: u32) -> Reading {
        let due = match self.last_publish_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= interval_ms,
        };

        if due {
            self.last_published = Reading::from_mm(estimate_mm);
            self.last_publish_ms = Some(now_ms);
        }

        self.last_published
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
