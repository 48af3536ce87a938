// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

// Protocol configuration with validation.

use crate::error::{Error, Result};

/// Size of the firmware message queue; messages never exceed it
pub const MAX_MESSAGE_SIZE: usize = 640;

/// Maximum stored filter length (bytes)
pub const MAX_FILTER_LEN: usize = 63;

/// Maximum stored device ID length (bytes)
pub const MAX_DEVICE_ID_LEN: usize = 24;

/// Configuration for the cloud publisher and its rate limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// User events allowed per burst window (default: 4).
    pub event_burst: usize,
    /// Burst window in milliseconds (default: 1000).
    pub event_burst_window_ms: u32,
    /// System events allowed per minute window (default: 255).
    pub system_events_per_minute: u8,
    /// Event name prefix reserved for system events (default: "spark/").
    pub system_event_prefix: &'static str,
    /// Longest filter stored in the subscription table (default: 63).
    pub max_filter_len: usize,
    /// Longest device ID stored in the subscription table (default: 24).
    pub max_device_id_len: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            event_burst: 4,
            event_burst_window_ms: 1000,
            system_events_per_minute: 255,
            system_event_prefix: "spark/",
            max_filter_len: MAX_FILTER_LEN,
            max_device_id_len: MAX_DEVICE_ID_LEN,
        }
    }
}

impl ProtocolConfig {
    /// Validate configuration. Returns Ok(()) if valid.
    pub fn validate(&self) -> Result<()> {
        if self.event_burst == 0 {
            return Err(Error::InvalidConfig("event_burst must be > 0"));
        }
        // The limiter keeps burst + 1 timestamps in a fixed ring
        if self.event_burst >= crate::session::MAX_EVENT_BURST {
            return Err(Error::InvalidConfig("event_burst exceeds limiter capacity"));
        }
        if self.event_burst_window_ms == 0 {
            return Err(Error::InvalidConfig("event_burst_window_ms must be > 0"));
        }
        if self.system_events_per_minute == 0 {
            return Err(Error::InvalidConfig("system_events_per_minute must be > 0"));
        }
        if self.system_event_prefix.is_empty() {
            return Err(Error::InvalidConfig("system_event_prefix must not be empty"));
        }
        if self.max_filter_len == 0 || self.max_filter_len > MAX_FILTER_LEN {
            return Err(Error::InvalidConfig("max_filter_len must be in 1..=63"));
        }
        if self.max_device_id_len == 0 || self.max_device_id_len > MAX_DEVICE_ID_LEN {
            return Err(Error::InvalidConfig("max_device_id_len must be in 1..=24"));
        }
        Ok(())
    }
}
