//! Timeout configuration for catalog requests.

use std::time::Duration;

/// Timeout configuration for a fetch client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total time for one request, body included.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from whole seconds, as stored in config files.
    pub fn from_secs(connect_secs: u64, total_secs: u64) -> Self {
        Self::new(
            Duration::from_secs(connect_secs),
            Duration::from_secs(total_secs),
        )
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            total: Duration::from_secs(10),
        }
    }
}
