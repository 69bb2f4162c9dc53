/// Monotonic ID source. IDs are never handed out twice.
#[derive(Debug, Default)]
pub struct IdCounter {
    counter: u64,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the post-increment value, so the first ID is 1.
    pub fn increment(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// Steps the counter back by one, stopping at zero.
    pub fn decrease(&mut self) -> u64 {
        self.counter = self.counter.saturating_sub(1);
        self.counter
    }

    pub fn current(&self) -> u64 {
        self.counter
    }
}
