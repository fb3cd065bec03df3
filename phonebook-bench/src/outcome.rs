use std::time::Duration;

/// Result of one timed step (a search, a sort, or building the hash index).
///
/// A fresh value is produced by every step. Sorts and index builds leave `matched` at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    pub matched: usize,
    pub elapsed: Duration,
    /// Only the bubble sort ever sets this.
    pub deadline_exceeded: bool,
    pub message: String,
}

impl StepResult {
    pub fn new(matched: usize, elapsed: Duration) -> Self {
        Self {
            matched,
            elapsed,
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}
