// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Publish-event message builder
//!
//! ```text
//! Header   NON (CON with ack) | POST | message id
//! Uri-Path "e" (public) / "E" (private)          delta 11
//! Uri-Path <event name>                           delta 0
//! Max-Age  3-byte TTL, only if TTL != 60          delta 3
//! 0xFF <data>                                     only if data present
//! ```

use super::write_payload;
use crate::coap::{CoapCode, CoapOption, CoapType, MessageHeader, MessageWriter, OptionSequence};
use crate::error::Result;

/// TTL the cloud assumes when no Max-Age option is sent (seconds)
pub const DEFAULT_TTL: u32 = 60;

/// Largest TTL representable in the fixed 3-byte Max-Age value
pub const MAX_TTL: u32 = 0x00FF_FFFF;

/// Event visibility, selects the endpoint path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    /// Visible to everyone (`e`)
    #[default]
    Public,
    /// Visible to the device owner only (`E`)
    Private,
}

impl EventType {
    /// Endpoint path segment byte
    pub const fn endpoint(self) -> u8 {
        match self {
            EventType::Public => b'e',
            EventType::Private => b'E',
        }
    }
}

/// Event publish request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    /// Event name, sent as a single path segment
    pub name: &'a str,
    /// Optional payload
    pub data: Option<&'a [u8]>,
    /// Time to live in seconds
    pub ttl: u32,
    /// Public or private
    pub event_type: EventType,
    /// Send as confirmable so the cloud acknowledges it
    pub with_ack: bool,
}

impl<'a> Event<'a> {
    /// Public event without data and with the default TTL
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            data: None,
            ttl: DEFAULT_TTL,
            event_type: EventType::Public,
            with_ack: false,
        }
    }

    /// Attach a payload
    pub const fn data(mut self, data: &'a [u8]) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the TTL in seconds
    pub const fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the visibility
    pub const fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Request an acknowledgement from the cloud
    pub const fn with_ack(mut self, with_ack: bool) -> Self {
        self.with_ack = with_ack;
        self
    }

    /// Message type on the wire
    pub const fn message_type(&self) -> CoapType {
        if self.with_ack {
            CoapType::Confirmable
        } else {
            CoapType::NonConfirmable
        }
    }

    /// Encode into `buf`
    ///
    /// # Returns
    ///
    /// Number of bytes written
    pub fn encode(&self, buf: &mut [u8], message_id: u16) -> Result<usize> {
        let mut writer = MessageWriter::new(buf);
        MessageHeader::new(self.message_type(), CoapCode::POST, message_id).write(&mut writer)?;

        let mut options = OptionSequence::new();
        options.write_uri_path(&mut writer, &[self.event_type.endpoint()])?;
        options.write_uri_path(&mut writer, self.name.as_bytes())?;

        if self.ttl != DEFAULT_TTL {
            // Fixed 3 bytes, not the minimal CoAP uint length
            let ttl = self.ttl.min(MAX_TTL).to_be_bytes();
            options.write(&mut writer, CoapOption::MAX_AGE, &ttl[1..])?;
        }

        if let Some(data) = self.data {
            write_payload(&mut writer, data)?;
        }

        let len = writer.position();
        log::trace!(
            "event '{}' id={:#06x} type={:?} ttl={} len={}",
            self.name,
            message_id,
            self.event_type,
            self.ttl,
            len
        );
        Ok(len)
    }
}

/// Encode a publish-event message
///
/// Convenience wrapper around [`Event::encode`] for a non-acknowledged event.
pub fn event(
    buf: &mut [u8],
    message_id: u16,
    name: &str,
    data: Option<&[u8]>,
    ttl: u32,
    event_type: EventType,
) -> Result<usize> {
    Event {
        name,
        data,
        ttl,
        event_type,
        with_ack: false,
    }
    .encode(buf, message_id)
}
