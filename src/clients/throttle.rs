//! Client-side rate-limit governor.
//!
//! Shopify reports REST bucket usage in the `X-Shopify-Shop-Api-Call-Limit`
//! header. Once usage reaches the configured threshold, the governor delays
//! the next call by a random duration so the bucket can drain before the
//! hard limit is hit. The delay is preventive; failed calls are not retried
//! here.

use std::time::Duration;

use rand::Rng;

use crate::clients::http_response::ApiCallLimit;
use crate::config::ThrottleConfig;

/// Tracks bucket usage for one client and decides whether to delay.
#[derive(Clone, Debug)]
pub struct RateLimitGovernor {
    config: ThrottleConfig,
    throttled: bool,
    last_call_limit: Option<ApiCallLimit>,
}

impl RateLimitGovernor {
    /// Creates a governor in the unthrottled state.
    #[must_use]
    pub const fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            throttled: false,
            last_call_limit: None,
        }
    }

    /// Records the call-limit header of a response.
    ///
    /// A missing header leaves the state unchanged; a malformed one is
    /// logged and ignored.
    pub fn observe_header(&mut self, header_value: Option<&str>) {
        let Some(value) = header_value else {
            return;
        };
        match ApiCallLimit::parse(value) {
            Some(limit) => self.observe(limit),
            None => tracing::debug!(value, "Ignoring malformed API call limit header"),
        }
    }

    /// Records a parsed call limit.
    pub fn observe(&mut self, limit: ApiCallLimit) {
        self.throttled = limit.ratio() >= self.config.threshold();
        self.last_call_limit = Some(limit);
    }

    /// Returns `true` if the next call will be delayed.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.throttled
    }

    /// Returns the most recently observed call limit.
    #[must_use]
    pub const fn last_call_limit(&self) -> Option<ApiCallLimit> {
        self.last_call_limit
    }

    /// Returns `true` if GraphQL calls are governed too.
    #[must_use]
    pub const fn applies_to_graphql(&self) -> bool {
        self.config.applies_to_graphql()
    }

    /// Picks the delay for the next call, uniformly within the configured
    /// range, or `None` when not throttled.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        if !self.throttled {
            return None;
        }
        let (min, max) = self.config.delay_range();
        Some(rand::thread_rng().gen_range(min..=max))
    }

    /// Sleeps for [`next_delay`](Self::next_delay), if any.
    pub async fn wait(&self) {
        if let Some(delay) = self.next_delay() {
            tracing::warn!(
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                last_call_limit = ?self.last_call_limit,
                "API call limit nearly reached, delaying request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for RateLimitGovernor {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}
