// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Create-subscription message builder
//!
//! ```text
//! Header    CON | GET | message id
//! Uri-Path  "e"                                   delta 11
//! Uri-Path  <filter>                              delta 0, only if non-empty
//! then one of:
//!   0xFF <device id>                              device-filtered
//!   Uri-Query "u"                                 my devices, delta 4
//!   (nothing)                                     firehose, filter required
//! ```

use super::event::EventType;
use super::write_payload;
use crate::coap::{CoapCode, CoapOption, CoapType, MessageHeader, MessageWriter, OptionSequence};
use crate::error::{Error, Result};

/// Uri-Query value selecting the caller's own devices
const MY_DEVICES_QUERY: u8 = b'u';

/// Audience of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionScope<'a> {
    /// Events from one specific device
    Device(&'a str),
    /// Events from devices owned by the same account
    MyDevices,
    /// All public events matching the filter
    Firehose,
}

/// Scope without a device, as stored alongside a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScopeKind {
    /// Devices owned by the same account
    MyDevices,
    /// All public events
    #[default]
    Firehose,
}

impl From<ScopeKind> for SubscriptionScope<'_> {
    fn from(kind: ScopeKind) -> Self {
        match kind {
            ScopeKind::MyDevices => SubscriptionScope::MyDevices,
            ScopeKind::Firehose => SubscriptionScope::Firehose,
        }
    }
}

/// Subscription request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription<'a> {
    /// Event name prefix; `None` and `Some("")` are equivalent
    pub filter: Option<&'a str>,
    /// Audience
    pub scope: SubscriptionScope<'a>,
    /// Endpoint segment; the cloud only receives `Public` from this crate
    pub endpoint: EventType,
}

impl<'a> Subscription<'a> {
    /// Subscription on the public endpoint
    pub const fn new(filter: Option<&'a str>, scope: SubscriptionScope<'a>) -> Self {
        Self {
            filter,
            scope,
            endpoint: EventType::Public,
        }
    }

    /// Override the endpoint segment
    pub const fn endpoint(mut self, endpoint: EventType) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn filter_bytes(&self) -> Option<&'a [u8]> {
        self.filter.map(str::as_bytes).filter(|f| !f.is_empty())
    }

    /// Encode into `buf`
    ///
    /// # Errors
    ///
    /// * `FirehoseWithoutFilter` if a firehose subscription has no filter;
    ///   checked before anything is written
    /// * `BufferTooSmall` if the message does not fit
    pub fn encode(&self, buf: &mut [u8], message_id: u16) -> Result<usize> {
        let filter = self.filter_bytes();
        if filter.is_none() && self.scope == SubscriptionScope::Firehose {
            log::warn!("rejecting firehose subscription without filter");
            return Err(Error::FirehoseWithoutFilter);
        }

        let mut writer = MessageWriter::new(buf);
        MessageHeader::new(CoapType::Confirmable, CoapCode::GET, message_id).write(&mut writer)?;

        let mut options = OptionSequence::new();
        options.write_uri_path(&mut writer, &[self.endpoint.endpoint()])?;
        if let Some(filter) = filter {
            options.write_uri_path(&mut writer, filter)?;
        }

        match self.scope {
            SubscriptionScope::Device(device_id) => {
                write_payload(&mut writer, device_id.as_bytes())?;
            }
            SubscriptionScope::MyDevices => {
                options.write(&mut writer, CoapOption::URI_QUERY, &[MY_DEVICES_QUERY])?;
            }
            SubscriptionScope::Firehose => {}
        }

        let len = writer.position();
        log::trace!(
            "subscription filter={:?} scope={:?} id={:#06x} len={}",
            self.filter,
            self.scope,
            message_id,
            len
        );
        Ok(len)
    }
}

/// Encode a subscription message for any scope
pub fn subscription(
    buf: &mut [u8],
    message_id: u16,
    filter: Option<&str>,
    scope: SubscriptionScope<'_>,
) -> Result<usize> {
    Subscription::new(filter, scope).encode(buf, message_id)
}

/// Encode a subscription to the events of one device
pub fn subscription_for_device(
    buf: &mut [u8],
    message_id: u16,
    filter: Option<&str>,
    device_id: &str,
) -> Result<usize> {
    subscription(buf, message_id, filter, SubscriptionScope::Device(device_id))
}

/// Encode a subscription for the caller's devices or the firehose
pub fn subscription_with_scope(
    buf: &mut [u8],
    message_id: u16,
    filter: Option<&str>,
    scope: ScopeKind,
) -> Result<usize> {
    subscription(buf, message_id, filter, scope.into())
}
