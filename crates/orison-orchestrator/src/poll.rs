//! Polling policy for remote synthesis

use std::time::Duration;

/// Fixed polling policy: a hard attempt ceiling at a constant cadence.
///
/// Synthesis jobs finish in seconds to low tens of seconds, so this is
/// intentionally not adaptive backoff. At 40 attempts of 3 seconds the loop
/// gives up after roughly two minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of state checks before declaring a timeout.
    pub max_attempts: u32,
    /// Delay between consecutive checks.
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            interval: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_forty_checks_every_three_seconds() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_attempts, 40);
        assert_eq!(policy.interval, Duration::from_secs(3));
    }
}
