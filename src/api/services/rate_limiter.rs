use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/* Awaited before every request to the historical price service */
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn wait(&self);
}

/* Public endpoints allow a few requests per second, one per second keeps us far from the limit */
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        FixedDelay { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        return Self::new(Self::DEFAULT_DELAY);
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[tokio::test]
    async fn test_fixed_delay_sleeps() {
        let limiter = FixedDelay::new(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
