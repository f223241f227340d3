use super::DeltaNorm;

/// Adaptive exponential moving average
///
/// The smoothing weight moves between `alpha_min` and `alpha_max` depending on
/// the absolute distance and the size of the change: near readings and large
/// jumps respond quickly, far readings and small wobbles are smoothed hard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveEma {
    pub alpha_min: f32,
    pub alpha_max: f32,
}

impl AdaptiveEma {
    pub const DEFAULT_ALPHA_MIN: f32 = 0.02;
    pub const DEFAULT_ALPHA_MAX: f32 = 0.6;

    // Empirical shape of the response curve
    const DELTA_GAIN: f32 = 1.5;
    const RANGE_GAIN: f32 = 3.5;
    const INPUT_BIAS_MM: f32 = 10.0;
    const RANGE_BIAS_MM: f32 = 110.0;

    pub const fn new(alpha_min: f32, alpha_max: f32) -> Self {
        Self {
            alpha_min,
            alpha_max,
        }
    }

    /// Requires: 0.0 < alpha_min <= alpha_max <= 1.0
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.alpha_min > 0.0 && self.alpha_min <= 1.0) {
            return Err("EMA alpha_min must be in range (0.0, 1.0]");
        }
        if !(self.alpha_max > 0.0 && self.alpha_max <= 1.0) {
            return Err("EMA alpha_max must be in range (0.0, 1.0]");
        }
        if self.alpha_min > self.alpha_max {
            return Err("EMA alpha_min must not exceed alpha_max");
        }
        Ok(())
    }

    /// Normalized distance in roughly 0.0..1.0, rising with range
    pub fn log_factor(input_mm: f32, max_mm: u32) -> f32 {
        libm::log10f(input_mm + Self::INPUT_BIAS_MM)
            / libm::log10f(max_mm as f32 + Self::RANGE_BIAS_MM)
    }

    /// Smoothing weight for this step, always within [alpha_min, alpha_max]
    pub fn alpha(&self, input_mm: f32, delta_mm: f32, max_mm: u32, delta_norm: DeltaNorm) -> f32 {
        let log_factor = Self::log_factor(input_mm, max_mm);
        let delta_factor = delta_norm.factor(delta_mm);

        let exponent = delta_factor * Self::DELTA_GAIN - log_factor * Self::RANGE_GAIN;
        let curve = 1.0 / (1.0 + libm::expf(-exponent));

        let alpha = self.alpha_min + (self.alpha_max - self.alpha_min) * curve;
        // Rounding can push a saturated curve one ulp past the bounds
        alpha.max(self.alpha_min).min(self.alpha_max)
    }

    /// Move `estimate` toward `input` by the adaptive weight
    pub fn apply(
        &self,
        estimate: f32,
        input_mm: f32,
        max_mm: u32,
        delta_norm: DeltaNorm,
    ) -> f32 {
        let diff = input_mm - estimate;
        let alpha = self.alpha(input_mm, diff.abs(), max_mm, delta_norm);
        estimate + alpha * diff
    }
}

impl Default for AdaptiveEma {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA_MIN, Self::DEFAULT_ALPHA_MAX)
    }
}
