//! Vote retry tuning.

use std::time::Duration;

use dinr_engine::RetryConfig;
use serde::{Deserialize, Serialize};

const fn default_max_vote_attempts() -> u32 {
    8
}

const fn default_retry_base_delay_ms() -> u64 {
    2
}

const fn default_retry_max_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VotingConfig {
    /// Attempts at a conflicted vote before giving up, including the first.
    #[serde(default = "default_max_vote_attempts")]
    pub max_vote_attempts: u32,

    /// Backoff before the first retry, in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Backoff ceiling, in milliseconds.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            max_vote_attempts: default_max_vote_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl VotingConfig {
    /// The engine retry policy described by this section.
    #[must_use]
    pub const fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_vote_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        assert_eq!(VotingConfig::default().retry_config(), RetryConfig::default());
    }
}
