//! Retry configuration for idempotent requests.

use std::time::Duration;

use reqwest::{Method, StatusCode};

/// Retry configuration for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = disabled)
    pub max_retries: u32,
    /// Base delay before first retry (ms)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (ms)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 100,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the given max retries.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Set the base delay in milliseconds.
    pub fn with_base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Set the maximum delay in milliseconds.
    pub fn with_max_delay_ms(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Whether retries are enabled at all.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Calculate delay for a given attempt with exponential backoff and jitter.
    pub(crate) fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp_delay = self.base_delay_ms.saturating_mul(1 << attempt.min(10));
        let capped_delay = exp_delay.min(self.max_delay_ms);
        // Jitter: 75-100% of calculated delay
        let jitter_range = capped_delay / 4;
        let jitter = rand::random::<u64>() % (jitter_range + 1);
        Duration::from_millis(capped_delay - jitter_range + jitter)
    }

    /// Whether another attempt is allowed for `method` after `attempt` retries.
    pub(crate) fn allows(&self, method: &Method, attempt: u32) -> bool {
        attempt < self.max_retries && method.is_idempotent()
    }
}

/// Statuses worth retrying: server errors and rate limiting.
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Transport failures worth retrying.
pub(crate) fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_config_default_is_disabled() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 0);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_retry_config_builder() {
        let config = RetryConfig::new(3)
            .with_base_delay_ms(200)
            .with_max_delay_ms(5000);

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 5000);
        assert!(config.is_enabled());
    }

    #[test]
    fn test_retry_delay_calculation() {
        let config = RetryConfig {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 1000,
        };

        // ~100ms (75-100ms with jitter)
        let delay0 = config.delay_for_attempt(0);
        assert!(delay0.as_millis() >= 75 && delay0.as_millis() <= 100);

        // ~200ms (150-200ms with jitter)
        let delay1 = config.delay_for_attempt(1);
        assert!(delay1.as_millis() >= 150 && delay1.as_millis() <= 200);

        let delay3 = config.delay_for_attempt(3);
        assert!(delay3.as_millis() >= 600 && delay3.as_millis() <= 800);

        // Capped at max_delay
        let delay10 = config.delay_for_attempt(10);
        assert!(delay10.as_millis() >= 750 && delay10.as_millis() <= 1000);
    }

    #[test]
    fn test_only_idempotent_methods_retry() {
        let config = RetryConfig::new(2);
        assert!(config.allows(&Method::GET, 0));
        assert!(config.allows(&Method::PUT, 1));
        assert!(config.allows(&Method::DELETE, 0));
        assert!(!config.allows(&Method::GET, 2));
        assert!(!config.allows(&Method::POST, 0));
        assert!(!config.allows(&Method::PATCH, 0));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }
}
