// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the cloud message codec

use core::fmt;

/// Result type for codec operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for the cloud message codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Output buffer cannot hold the encoded message
    BufferTooSmall,

    /// Firehose subscription requested without an event filter
    FirehoseWithoutFilter,

    /// Option number delta exceeds the extended 2-byte range
    OptionDeltaTooLarge,

    /// Option value exceeds the extended 2-byte length range
    OptionTooLong,

    /// Options were added in descending number order
    OptionOutOfOrder,

    /// Token longer than 8 bytes
    TokenTooLong,

    /// Message fields encoded in an invalid order
    InvalidState,

    /// Invalid argument (e.g. empty chunk list)
    InvalidParameter,

    /// Event dropped by the publish rate limiter
    RateLimited,

    /// Protocol is busy (firmware update in progress)
    Busy,

    /// Subscription table has no free slot
    TableFull,

    /// Transport failed to send the message
    TransportError,

    /// Configuration failed validation
    InvalidConfig(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall => write!(f, "Buffer too small"),
            Error::FirehoseWithoutFilter => {
                write!(f, "Firehose subscription requires an event filter")
            }
            Error::OptionDeltaTooLarge => write!(f, "Option number delta too large"),
            Error::OptionTooLong => write!(f, "Option value too long"),
            Error::OptionOutOfOrder => write!(f, "Options must be added in ascending order"),
            Error::TokenTooLong => write!(f, "Token longer than 8 bytes"),
            Error::InvalidState => write!(f, "Message fields encoded out of order"),
            Error::InvalidParameter => write!(f, "Invalid parameter"),
            Error::RateLimited => write!(f, "Event rate limit exceeded"),
            Error::Busy => write!(f, "Protocol busy"),
            Error::TableFull => write!(f, "Subscription table full"),
            Error::TransportError => write!(f, "Transport error"),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
