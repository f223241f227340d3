use heapless::Vec;

const WINDOW: usize = 3;

/// Median-of-three despiker state
///
/// Keeps the three most recent raw samples in a circular buffer. Until three
/// samples have been pushed, the most recent sample is passed through as-is.
#[derive(Debug, Clone)]
pub struct MedianDespiker {
    buffer: Vec<i32, WINDOW>,
    index: usize,
    pushed: u32,
}

impl MedianDespiker {
    /// Create new despiker with an empty buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            index: 0,
            pushed: 0,
        }
    }

    /// Record a raw sample, overwriting the oldest once the buffer is full
    pub fn push(&mut self, sample: i32) {
        if self.buffer.len() < WINDOW {
            // Cannot fail, length checked above
            let _ = self.buffer.push(sample);
        } else {
            self.buffer[self.index] = sample;
        }
        self.index = (self.index + 1) % WINDOW;
        self.pushed = self.pushed.saturating_add(1);
    }

    /// True once three samples have been pushed since creation or reset
    pub fn is_warm(&self) -> bool {
        self.pushed as usize >= WINDOW
    }

    /// Median of the last three samples, or the latest sample during warm-up.
    ///
    /// Returns `None` before the first push.
    pub fn current(&self) -> Option<i32> {
        if !self.is_warm() {
            return self.buffer.last().copied();
        }

        let mut sorted = [self.buffer[0], self.buffer[1], self.buffer[2]];
        sorted.sort_unstable();
        Some(sorted[1])
    }

    /// Push a sample and return the despiked value in one step
    pub fn apply(&mut self, sample: i32) -> i32 {
        self.push(sample);
        self.current().unwrap_or(sample)
    }

    /// Reset to the empty warm-up state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.index = 0;
        self.pushed = 0;
    }
}

impl Default for MedianDespiker {
    fn default() -> Self {
        Self::new()
    }
}
