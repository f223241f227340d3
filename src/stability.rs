//! Stability lock.
//!
//! Freezes the estimate once the input has stayed within a threshold of it for
//! longer than a hold time. A movement beyond the threshold releases the lock.

/// Stability lock configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilityLock {
    /// Never freeze
    Off,

    /// Freeze after `hold_ms` without a change larger than `threshold_mm`
    Hold { threshold_mm: u32, hold_ms: u32 },
}

/// Bookkeeping for the stability lock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LockState {
    pub last_movement_ms: u32,
    pub frozen: bool,
}

impl LockState {
    /// Start tracking from `now_ms`, unfrozen
    pub fn seed(&mut self, now_ms: u32) {
        self.last_movement_ms = now_ms;
        self.frozen = false;
    }
}

impl StabilityLock {
    pub const DEFAULT_THRESHOLD_MM: u32 = 10;
    pub const DEFAULT_HOLD_MS: u32 = 2000;

    pub fn is_enabled(&self) -> bool {
        !matches!(self, StabilityLock::Off)
    }

    /// Update the lock with the change seen this call.
    ///
    /// Returns true while the estimate must be held.
    pub fn check(&self, delta_mm: f32, now_ms: u32, state: &mut LockState) -> bool {
        match self {
            StabilityLock::Off => false,
            StabilityLock::Hold {
                threshold_mm,
                hold_ms,
            } => {
                if delta_mm > *threshold_mm as f32 {
                    if state.frozen {
                        log_debug!("stability lock released, delta {}mm", delta_mm);
                    }
                    state.frozen = false;
                    state.last_movement_ms = now_ms;
                } else if !state.frozen && now_ms.wrapping_sub(state.last_movement_ms) > *hold_ms {
                    log_debug!("stability lock engaged after {}ms", hold_ms);
                    state.frozen = true;
                }

                state.frozen
            }
        }
    }
}
