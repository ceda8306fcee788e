use std::time::Duration;

use cm_config::RetryConfig;

/// Backoff schedule for the waits inside a reconciliation pass.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Delays to sleep between attempts.
    ///
    /// Yields `max_attempts - 1` entries. The base delay grows by
    /// `backoff_multiplier` per step and is clamped to `max_delay`;
    /// jitter scales each emitted delay by a random factor in
    /// `[0.5, 1.5)` without feeding back into the growth.
    pub fn delays(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut delay = self.initial_delay;

        for _ in 1..self.max_attempts {
            delays.push(self.apply_jitter(delay));
            delay = Duration::from_secs_f64(
                (delay.as_secs_f64() * self.backoff_multiplier).min(self.max_delay.as_secs_f64()),
            );
        }

        delays
    }

    fn apply_jitter(&self, delay: Duration) -> Duration {
        if self.jitter {
            let jitter_factor = 0.5 + rand::random::<f64>(); // 0.5 to 1.5
            Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
        } else {
            delay
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}
