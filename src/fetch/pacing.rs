//! Randomized request pacing
//!
//! A delay is taken before every job-board fetch so requests do not arrive
//! at a fixed interval. The policy is a trait object so tests can swap in
//! [`NoPacing`].

use crate::config::{DelayRange, PacingConfig};
use std::time::Duration;

/// Delay categories, from shortest to longest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayCategory {
    /// 1-2s by default; between demo rotation requests
    Short,
    /// 2-4s by default; before a search fetch
    Normal,
    /// 4-7s by default
    Long,
}

/// Decides how long to wait before a request
pub trait PacingPolicy: Send + Sync {
    fn delay_for(&self, category: DelayCategory) -> Duration;
}

/// Uniformly samples from the configured range of each category
#[derive(Debug, Clone)]
pub struct RandomPacing {
    config: PacingConfig,
}

impl RandomPacing {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    fn range(&self, category: DelayCategory) -> &DelayRange {
        match category {
            DelayCategory::Short => &self.config.short,
            DelayCategory::Normal => &self.config.normal,
            DelayCategory::Long => &self.config.long,
        }
    }
}

impl PacingPolicy for RandomPacing {
    fn delay_for(&self, category: DelayCategory) -> Duration {
        self.range(category).sample()
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn delay_for(&self, _category: DelayCategory) -> Duration {
        Duration::ZERO
    }
}

/// Sleeps for the duration chosen by `policy` and returns it
pub async fn pause(policy: &dyn PacingPolicy, category: DelayCategory) -> Duration {
    let delay = policy.delay_for(category);
    if !delay.is_zero() {
        tracing::debug!(?category, delay_ms = delay.as_millis() as u64, "Pacing delay");
        tokio::time::sleep(delay).await;
    }
    delay
}
