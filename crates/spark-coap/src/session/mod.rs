// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Session helpers around the message builders
//!
//! Message ID allocation, event rate limiting, the subscription table that
//! is replayed after a reconnect, and a publisher tying them to a transport.

pub mod publisher;
pub mod rate_limit;
pub mod sequence;
pub mod subscriptions;

pub use publisher::{CloudPublisher, NullTransport, Transport};
pub use rate_limit::{EventRateLimiter, MAX_EVENT_BURST};
pub use sequence::MessageIdSequence;
pub use subscriptions::{SubscriptionEntry, SubscriptionTable};
