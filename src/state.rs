use crate::filters::MedianDespiker;
use crate::publish::Publisher;
use crate::stabilizer::StabilizerState;

#[derive(Debug, Clone)]
pub struct State {
    /// Median-of-three despiking buffer
    pub median: MedianDespiker,

    /// Estimate and stability lock bookkeeping
    pub stabilizer: StabilizerState,

    /// Published value, publish time and invalid streak
    pub publisher: Publisher,
}

impl State {
    pub const fn new() -> Self {
        Self {
            median: MedianDespiker::new(),
            stabilizer: StabilizerState::new(),
            publisher: Publisher::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
