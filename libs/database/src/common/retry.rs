use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff configuration for startup-time connection attempts.
///
/// Request-path operations are never retried; this exists so a service
/// starting alongside its database does not crash-loop on the first refused
/// connection.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,

    /// Upper bound on the delay between retries, in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier applied after each failed attempt
    pub backoff_multiplier: f64,

    /// Randomize delays to avoid thundering-herd reconnects
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay for the given retry (0-based), with backoff and optional jitter
    fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.backoff_multiplier.powi(attempt as i32);
        let mut delay_ms = ((self.initial_delay_ms as f64) * backoff) as u64;
        delay_ms = delay_ms.min(self.max_delay_ms);

        if self.use_jitter {
            delay_ms = apply_jitter(delay_ms);
        }

        Duration::from_millis(delay_ms)
    }
}

/// Scale a delay by a pseudo-random factor between 50% and 100%
fn apply_jitter(delay_ms: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let hash = RandomState::new().hash_one(std::time::SystemTime::now());
    let factor = (hash % 50) as f64 / 100.0 + 0.5;

    (delay_ms as f64 * factor) as u64
}

/// Run an async operation, retrying failures with exponential backoff.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("Operation succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt == config.max_retries {
                    warn!(
                        "Operation failed after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    last_error = Some(e);
                    break;
                }

                let delay = config.delay_for(attempt);
                debug!(
                    "Operation failed (attempt {}/{}): {}. Retrying in {:?}...",
                    attempt + 1,
                    config.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(last_error.expect("retry loop exited without an error"))
}

/// Retry with the default configuration (3 retries, 100ms initial delay).
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
