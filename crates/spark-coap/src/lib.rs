// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Spark CoAP - Device-to-Cloud Message Codec
//!
//! A `no_std` encoder for the compact CoAP messages an IoT device sends to
//! its cloud: event publications, subscription requests and the small
//! control messages around them.
//!
//! ## Design Constraints
//!
//! - **No heap allocations** (caller buffers, const generic tables)
//! - **No partial output on rejection** (argument errors are raised before
//!   the buffer is touched)
//! - **`no_std` compatible**
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------+
//! |  CloudPublisher / SubscriptionTable     |
//! +-----------------------------------------+
//!           v
//! +-----------------------------------------+
//! |  Messages (event, subscription, ...)    |
//! +-----------------------------------------+
//!           v
//! +-----------------------------------------+
//! |  CoAP (header, options, writer)         |
//! +-----------------------------------------+
//!           v
//! +-----------------------------------------+
//! |  Transport (framing, encryption)        |
//! +-----------------------------------------+
//! ```
//!
//! ## Example
//!
//! ```
//! use spark_coap::{event, EventType};
//!
//! let mut buf = [0u8; 64];
//! let len = event(&mut buf, 0xF649, "x", None, 60, EventType::Public).unwrap();
//! assert_eq!(&buf[..len], &[0x50, 0x02, 0xF6, 0x49, 0xB1, b'e', 0x01, b'x']);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` -- implement `std::error::Error` (for host tools)

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// CoAP subset (header, options, bounded writer, generic encoder)
pub mod coap;

/// Cloud protocol message builders
pub mod message;

/// Message IDs, rate limiting, subscriptions and publishing
pub mod session;

/// Protocol configuration
pub mod config;

/// Error types for the codec
pub mod error;

// Re-exports for convenience
pub use crate::coap::{CoapCode, CoapEncoder, CoapOption, CoapType, MessageHeader};
pub use crate::config::{ProtocolConfig, MAX_MESSAGE_SIZE};
pub use crate::error::{Error, Result};
pub use crate::message::{
    event, subscription, subscription_for_device, subscription_with_scope, Event, EventType,
    ScopeKind, Subscription, SubscriptionScope, DEFAULT_TTL, MAX_TTL,
};
pub use crate::session::{
    CloudPublisher, EventRateLimiter, MessageIdSequence, SubscriptionTable, Transport,
};

/// Version of Spark CoAP
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
