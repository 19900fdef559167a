//! Retry policy for transient accept failures.

use std::time::Duration;

/// Delay before the first retry.
const BASE_DELAY: Duration = Duration::from_millis(10);

/// Consecutive transient failures tolerated before giving up.
const RETRY_BUDGET: u32 = 5;

/// Exponential backoff with a hard retry budget.
///
/// Each consecutive transient failure doubles the delay, starting at
/// 10 ms. A success resets both the counter and the delay to baseline.
/// Once the budget (5 failures) is spent, the next failure returns
/// `None` and the listener treats it as fatal.
#[derive(Debug)]
pub struct Backoff {
    tries: u32,
    delay: Duration,
}

impl Backoff {
    /// Creates a backoff at baseline.
    pub fn new() -> Self {
        Self {
            tries: 0,
            delay: BASE_DELAY,
        }
    }

    /// Records a transient failure.
    ///
    /// Returns the delay to sleep before retrying, or `None` when the
    /// retry budget is exhausted.
    pub fn failure(&mut self) -> Option<Duration> {
        if self.tries >= RETRY_BUDGET {
            return None;
        }
        self.tries += 1;
        let delay = self.delay;
        self.delay *= 2;
        Some(delay)
    }

    /// Resets to baseline after a success.
    pub fn reset(&mut self) {
        self.tries = 0;
        self.delay = BASE_DELAY;
    }

    /// Number of consecutive failures recorded so far.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// The configured retry budget.
    pub fn budget() -> u32 {
        RETRY_BUDGET
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_double_from_10ms() {
        let mut b = Backoff::new();
        let delays: Vec<_> = (0..5).map(|_| b.failure().unwrap()).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(40),
                Duration::from_millis(80),
                Duration::from_millis(160),
            ]
        );
    }

    #[test]
    fn test_sixth_consecutive_failure_is_fatal() {
        let mut b = Backoff::new();
        for _ in 0..5 {
            assert!(b.failure().is_some());
        }
        assert_eq!(b.failure(), None);
    }

    #[test]
    fn test_success_resets_to_baseline() {
        let mut b = Backoff::new();
        b.failure();
        b.failure();
        b.reset();
        assert_eq!(b.tries(), 0);
        assert_eq!(b.failure(), Some(Duration::from_millis(10)));
    }
}
