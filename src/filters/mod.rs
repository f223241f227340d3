/// Smoothing implementations
///
/// Despiking works on raw integer millimeters, smoothing on the validated
/// floating estimate.
mod ema;
mod median;

pub use ema::AdaptiveEma;
pub use median::MedianDespiker;

/// Final smoothing stage configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Estimate follows the input directly
    Passthrough,

    /// Exponential moving average with distance- and change-dependent alpha
    /// Requires: 0.0 < alpha_min <= alpha_max <= 1.0
    AdaptiveEma(AdaptiveEma),
}

impl Smoothing {
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            Smoothing::Passthrough => Ok(()),
            Smoothing::AdaptiveEma(ema) => ema.validate(),
        }
    }

    /// Produce the next estimate from the current one
    pub fn apply(&self, estimate: f32, input_mm: f32, max_mm: u32, delta_norm: DeltaNorm) -> f32 {
        match self {
            Smoothing::Passthrough => input_mm,
            Smoothing::AdaptiveEma(ema) => ema.apply(estimate, input_mm, max_mm, delta_norm),
        }
    }
}

/// Scaling of the change magnitude fed into the adaptive EMA curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaNorm {
    /// Change magnitude does not affect responsiveness
    Off,

    /// Change is divided by `norm_mm` and capped at 2.0
    /// Requires: norm_mm > 0
    Scale { norm_mm: u32 },
}

impl DeltaNorm {
    pub const DEFAULT_NORM_MM: u32 = 60;
    const MAX_FACTOR: f32 = 2.0;

    pub fn factor(&self, delta_mm: f32) -> f32 {
        match self {
            DeltaNorm::Off => 1.0,
            DeltaNorm::Scale { norm_mm } => {
                let factor = delta_mm / *norm_mm as f32;
                if factor > Self::MAX_FACTOR {
                    Self::MAX_FACTOR
                } else {
                    factor
                }
            }
        }
    }

    pub const fn validate(&self) -> Result<(), &'static str> {
        match self {
            DeltaNorm::Off => Ok(()),
            DeltaNorm::Scale { norm_mm } => {
                if *norm_mm == 0 {
                    return Err("DeltaNorm norm_mm must be > 0");
                }
                Ok(())
            }
        }
    }
}
