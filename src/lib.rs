#![no_std]

// Optional logging, compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

mod config;
mod state;
mod engine;
pub mod filters;
pub mod publish;
pub mod stability;
pub mod stabilizer;
pub mod suppression;
pub mod validation;

pub use config::{Config, ConfigError};
pub use state::State;
pub use engine::RangeFilter;
pub use filters::{AdaptiveEma, DeltaNorm, MedianDespiker, Smoothing};
pub use publish::{Publisher, Reading};
pub use stability::{LockState, StabilityLock};
pub use stabilizer::{Estimate, StabilizerState};
pub use suppression::{Deadband, PercentFilter, PercentStart};
pub use validation::Validated;
