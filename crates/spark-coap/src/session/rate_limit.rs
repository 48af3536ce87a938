// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Event publish rate limiting
//!
//! Two independent rules, selected by the event name:
//!
//! - System events (reserved prefix) are capped per minute window, where a
//!   window is `now_ms >> 16` (about 65 seconds).
//! - User events allow a burst of N events per window of W milliseconds.
//!   The limiter keeps the last N + 1 attempt timestamps; rejected attempts
//!   count too, so a device that keeps publishing stays throttled.
//!
//! Time is supplied by the caller as a wrapping millisecond tick.

use crate::config::ProtocolConfig;

/// Largest ring of user event timestamps
pub const MAX_EVENT_BURST: usize = 16;

/// Shift turning a millisecond tick into a minute window
const MINUTE_SHIFT: u32 = 16;

/// Event publish rate limiter
#[derive(Debug, Clone)]
pub struct EventRateLimiter {
    system_prefix: &'static str,
    system_limit: u8,
    last_minute: u16,
    events_this_minute: u8,

    window_ms: u32,
    ticks: [u32; MAX_EVENT_BURST],
    /// Ring length, burst + 1
    slots: usize,
    next: usize,

    rate_limited: u32,
}

impl EventRateLimiter {
    /// Create a limiter from a validated configuration
    pub fn new(config: &ProtocolConfig) -> Self {
        let slots = (config.event_burst + 1).min(MAX_EVENT_BURST);
        let window_ms = config.event_burst_window_ms;
        Self {
            system_prefix: config.system_event_prefix,
            system_limit: config.system_events_per_minute,
            last_minute: 0,
            events_this_minute: 0,
            window_ms,
            // Seeded one window in the past so the first burst passes
            ticks: [0u32.wrapping_sub(window_ms); MAX_EVENT_BURST],
            slots,
            next: 0,
            rate_limited: 0,
        }
    }

    /// True if `name` falls under the system event rule
    pub fn is_system_event(&self, name: &str) -> bool {
        name.starts_with(self.system_prefix)
    }

    /// Try to admit one event at `now_ms`
    ///
    /// Returns true if the event may be sent, false if rate limited
    pub fn try_acquire(&mut self, name: &str, now_ms: u32) -> bool {
        let allowed = if self.is_system_event(name) {
            self.acquire_system(now_ms)
        } else {
            self.acquire_user(now_ms)
        };
        if !allowed {
            self.rate_limited = self.rate_limited.wrapping_add(1);
        }
        allowed
    }

    fn acquire_system(&mut self, now_ms: u32) -> bool {
        let minute = (now_ms >> MINUTE_SHIFT) as u16;
        if minute == self.last_minute {
            if self.events_this_minute >= self.system_limit {
                return false;
            }
        } else {
            self.last_minute = minute;
            self.events_this_minute = 0;
        }
        self.events_this_minute += 1;
        true
    }

    fn acquire_user(&mut self, now_ms: u32) -> bool {
        self.ticks[self.next] = now_ms;
        self.next = (self.next + 1) % self.slots;
        now_ms.wrapping_sub(self.ticks[self.next]) >= self.window_ms
    }

    /// Number of events rejected so far
    pub fn rate_limited_count(&self) -> u32 {
        self.rate_limited
    }
}

impl Default for EventRateLimiter {
    fn default() -> Self {
        Self::new(&ProtocolConfig::default())
    }
}
