//! Retry policies for CMS queries.

use std::time::Duration;

use crate::FetchError;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                let delay = base.saturating_mul(multiplier);
                std::cmp::min(delay, *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    /// `min(1s * 2^attempt, 30s)`.
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(1000),
            max: Duration::from_secs(30),
        }
    }
}

/// Conditions that trigger a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// Retry on specific HTTP status code.
    StatusCode(u16),
    /// Retry on any 5xx status.
    ServerError,
    /// Retry on timeout.
    Timeout,
    /// Retry when the request never reached the server.
    ConnectionError,
    /// Retry on any failure.
    AnyError,
}

impl RetryCondition {
    /// Check if an error matches this condition.
    pub fn matches(&self, error: &FetchError) -> bool {
        match (self, error) {
            (Self::AnyError, _) => true,
            (Self::StatusCode(code), FetchError::HttpError { status, .. }) => status == code,
            (Self::ServerError, FetchError::HttpError { status, .. }) => {
                (500..600).contains(status)
            }
            (Self::Timeout, FetchError::Timeout) => true,
            (Self::ConnectionError, FetchError::RequestError(_)) => true,
            _ => false,
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
    /// Conditions that trigger retry.
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Retry on any failure with the default exponential backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
            retry_on: vec![RetryCondition::AnyError],
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
            retry_on: Vec::new(),
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Set retry conditions.
    pub fn with_conditions(mut self, conditions: Vec<RetryCondition>) -> Self {
        self.retry_on = conditions;
        self
    }

    /// Whether a failed attempt (0-indexed) should be retried.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_retries && self.retry_on.iter().any(|c| c.matches(error))
    }

    /// Run `op` until it succeeds or the policy gives up, sleeping between
    /// attempts. Returns the last error.
    pub fn run<T>(
        &self,
        mut op: impl FnMut(u32) -> Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        let mut attempt = 0;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(&e, attempt) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying");
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    /// Two retries on any failure.
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_doubles_and_caps() {
        let backoff = BackoffStrategy::default();
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(backoff.delay_for_attempt(4), Duration::from_secs(16));
        assert_eq!(backoff.delay_for_attempt(5), Duration::from_secs(30));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_secs(30));
    }

    #[test]
    fn test_conditions() {
        let server = FetchError::HttpError {
            status: 502,
            message: String::new(),
        };
        let missing = FetchError::HttpError {
            status: 404,
            message: String::new(),
        };
        assert!(RetryCondition::ServerError.matches(&server));
        assert!(!RetryCondition::ServerError.matches(&missing));
        assert!(RetryCondition::StatusCode(404).matches(&missing));
        assert!(RetryCondition::Timeout.matches(&FetchError::Timeout));
        assert!(RetryCondition::ConnectionError.matches(&FetchError::RequestError("x".into())));
        assert!(RetryCondition::AnyError.matches(&FetchError::NoData));
    }

    #[test]
    fn test_run_retries_until_success() {
        let policy = RetryPolicy::default().with_backoff(BackoffStrategy::None);
        let mut calls = 0;
        let result = policy.run(|_| {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Timeout)
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn test_run_gives_up_after_max_retries() {
        let policy = RetryPolicy::new(2).with_backoff(BackoffStrategy::None);
        let mut attempts = Vec::new();
        let result: Result<(), _> = policy.run(|attempt| {
            attempts.push(attempt);
            Err(FetchError::NoData)
        });
        assert_eq!(result, Err(FetchError::NoData));
        assert_eq!(attempts, vec![0, 1, 2]);
    }

    #[test]
    fn test_run_stops_on_unmatched_error() {
        let policy = RetryPolicy::new(5)
            .with_backoff(BackoffStrategy::None)
            .with_conditions(vec![RetryCondition::ServerError]);
        let mut calls = 0;
        let _: Result<(), _> = policy.run(|_| {
            calls += 1;
            Err(FetchError::GraphqlError("bad query".into()))
        });
        assert_eq!(calls, 1);
        assert!(RetryPolicy::none().max_retries == 0);
    }
}
