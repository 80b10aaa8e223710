//! Poller configuration and the value produced by a successful poll.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Public CheerLights feed: the latest color as a plain text name.
pub const DEFAULT_ENDPOINT: &str = "http://api.thingspeak.com/channels/1417/field/1/last.txt";

/// Default interval between scheduled polls (milliseconds).
pub const DEFAULT_PERIOD_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll period must be greater than zero")]
    ZeroPeriod,

    #[error("endpoint must not be empty")]
    EmptyEndpoint,
}

// ---------------------------------------------------------------------------
// PollerConfig
// ---------------------------------------------------------------------------

/// Where to poll and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    endpoint: String,
    period: Duration,
    /// When set, `stop()` also aborts fetches that are already in flight.
    pub abort_in_flight: bool,
}

impl PollerConfig {
    /// Build a validated configuration.
    pub fn new(endpoint: impl Into<String>, period: Duration) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(Self {
            endpoint,
            period,
            abort_in_flight: false,
        })
    }

    /// Convenience constructor taking the period in milliseconds.
    pub fn with_period_ms(endpoint: impl Into<String>, period_ms: u64) -> Result<Self, ConfigError> {
        Self::new(endpoint, Duration::from_millis(period_ms))
    }

    #[must_use]
    pub fn with_abort_in_flight(mut self, abort: bool) -> Self {
        self.abort_in_flight = abort;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Result<(), ConfigError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        self.endpoint = endpoint;
        Ok(())
    }

    pub fn set_period(&mut self, period: Duration) -> Result<(), ConfigError> {
        if period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }
        self.period = period;
        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
            abort_in_flight: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ColorUpdate
// ---------------------------------------------------------------------------

/// One successfully polled color, as applied to the document.
///
/// The color is passed through verbatim; no format validation happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorUpdate {
    pub color: String,
    pub fetched_at: DateTime<Utc>,
}

impl ColorUpdate {
    pub fn new(color: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            color: color.into(),
            fetched_at,
        }
    }

    /// Text written into update sinks.
    pub fn update_text(&self) -> String {
        crate::dom::format_update_text(&self.color, self.fetched_at)
    }
}
