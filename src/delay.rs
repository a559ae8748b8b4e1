use crate::constants::{MAX_DELAY_MS, MIN_DELAY_MS};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Pause taken before every upload.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn pause(&self);
}

/// Sleeps a uniformly random number of milliseconds in `min_ms..=max_ms`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self {
            min_ms: MIN_DELAY_MS,
            max_ms: MAX_DELAY_MS,
        }
    }
}

impl RandomDelay {
    pub fn next_duration(&self) -> Duration {
        let (low, high) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }
}

#[async_trait]
impl Delay for RandomDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.next_duration()).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn pause(&self) {}
}
