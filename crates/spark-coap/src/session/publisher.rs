// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cloud publisher
//!
//! Builds messages into an internal buffer and hands them to a
//! [`Transport`]. Framing and encryption belong to the transport.

use super::rate_limit::EventRateLimiter;
use super::sequence::MessageIdSequence;
use super::subscriptions::SubscriptionTable;
use crate::config::{ProtocolConfig, MAX_MESSAGE_SIZE};
use crate::error::{Error, Result};
use crate::message::{ping, Event, Subscription, SubscriptionScope};

/// Datagram sink for encoded messages
pub trait Transport {
    /// Send one complete message
    ///
    /// # Returns
    ///
    /// Number of bytes accepted
    fn send(&mut self, data: &[u8]) -> Result<usize>;

    /// Largest message the transport accepts
    fn mtu(&self) -> usize {
        MAX_MESSAGE_SIZE
    }
}

/// Null transport (for testing)
///
/// Accepts and discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        Ok(data.len())
    }
}

/// Publishes events and subscriptions over a transport
pub struct CloudPublisher<T: Transport> {
    transport: T,
    limiter: EventRateLimiter,
    ids: MessageIdSequence,
    buf: [u8; MAX_MESSAGE_SIZE],
    updating: bool,
}

impl<T: Transport> CloudPublisher<T> {
    /// Create a publisher
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails validation
    pub fn new(transport: T, config: &ProtocolConfig, ids: MessageIdSequence) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            limiter: EventRateLimiter::new(config),
            ids,
            buf: [0u8; MAX_MESSAGE_SIZE],
            updating: false,
        })
    }

    /// Mark a firmware update as in progress
    pub fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
    }

    /// True while a firmware update is in progress
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Events rejected by the rate limiter so far
    pub fn rate_limited_count(&self) -> u32 {
        self.limiter.rate_limited_count()
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the publisher, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Publish an event at time `now_ms`
    ///
    /// # Returns
    ///
    /// Message ID used
    ///
    /// # Errors
    ///
    /// * `Busy` while a firmware update is in progress
    /// * `RateLimited` if the event exceeds the publish rate
    /// * Encoder and transport errors
    pub fn send_event(&mut self, now_ms: u32, event: &Event<'_>) -> Result<u16> {
        if self.updating {
            log::debug!("event '{}' refused during update", event.name);
            return Err(Error::Busy);
        }
        if !self.limiter.try_acquire(event.name, now_ms) {
            log::warn!(
                "event '{}' rate limited ({} dropped so far)",
                event.name,
                self.limiter.rate_limited_count()
            );
            return Err(Error::RateLimited);
        }

        let message_id = self.ids.next_message_id();
        let len = event.encode(&mut self.buf, message_id)?;
        self.transmit(len)?;
        Ok(message_id)
    }

    /// Send one subscription
    ///
    /// # Returns
    ///
    /// Message ID used
    pub fn send_subscription(
        &mut self,
        filter: Option<&str>,
        scope: SubscriptionScope<'_>,
    ) -> Result<u16> {
        let message_id = self.ids.next_message_id();
        let len = Subscription::new(filter, scope).encode(&mut self.buf, message_id)?;
        self.transmit(len)?;
        Ok(message_id)
    }

    /// Replay every stored subscription
    ///
    /// # Returns
    ///
    /// Number of messages sent
    pub fn send_subscriptions<K: Copy + Eq, const N: usize>(
        &mut self,
        table: &SubscriptionTable<K, N>,
    ) -> Result<usize> {
        let transport = &mut self.transport;
        let sent = table.encode_each(&mut self.buf, &mut self.ids, |_, msg| {
            send_checked(transport, msg)
        })?;
        log::debug!("sent {} subscriptions", sent);
        Ok(sent)
    }

    /// Send a ping
    pub fn send_ping(&mut self) -> Result<u16> {
        let message_id = self.ids.next_message_id();
        let len = ping(&mut self.buf, message_id)?;
        self.transmit(len)?;
        Ok(message_id)
    }

    fn transmit(&mut self, len: usize) -> Result<()> {
        send_checked(&mut self.transport, &self.buf[..len])
    }
}

fn send_checked<T: Transport>(transport: &mut T, msg: &[u8]) -> Result<()> {
    if msg.len() > transport.mtu() {
        log::warn!("message of {} bytes exceeds MTU {}", msg.len(), transport.mtu());
        return Err(Error::BufferTooSmall);
    }
    let sent = transport.send(msg)?;
    if sent != msg.len() {
        log::warn!("short send: {} of {} bytes", sent, msg.len());
        return Err(Error::TransportError);
    }
    Ok(())
}
