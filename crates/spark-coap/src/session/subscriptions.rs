// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-capacity table of event subscriptions
//!
//! Each entry pairs a filter and scope with a caller-defined handler key.
//! The table is replayed to the cloud after every (re)connect, so it owns
//! copies of filter and device ID in bounded strings.

use heapless::{String, Vec};

use super::sequence::MessageIdSequence;
use crate::config::{ProtocolConfig, MAX_DEVICE_ID_LEN, MAX_FILTER_LEN};
use crate::error::{Error, Result};
use crate::message::{ScopeKind, Subscription, SubscriptionScope};

/// One stored subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEntry<K> {
    filter: String<MAX_FILTER_LEN>,
    device_id: String<MAX_DEVICE_ID_LEN>,
    scope: ScopeKind,
    handler: K,
}

impl<K: Copy> SubscriptionEntry<K> {
    /// Event name filter (may be empty)
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Device the subscription is restricted to
    pub fn device_id(&self) -> Option<&str> {
        if self.device_id.is_empty() {
            None
        } else {
            Some(&self.device_id)
        }
    }

    /// Scope used when no device ID is stored
    pub fn scope(&self) -> ScopeKind {
        self.scope
    }

    /// Handler key
    pub fn handler(&self) -> K {
        self.handler
    }

    /// Subscription request for this entry
    pub fn subscription(&self) -> Subscription<'_> {
        let scope = match self.device_id() {
            Some(id) => SubscriptionScope::Device(id),
            None => self.scope.into(),
        };
        Subscription::new(Some(self.filter()), scope)
    }
}

/// Table of up to `N` subscriptions keyed by handler `K`
#[derive(Debug, Clone)]
pub struct SubscriptionTable<K, const N: usize> {
    entries: Vec<SubscriptionEntry<K>, N>,
    max_filter_len: usize,
    max_device_id_len: usize,
}

impl<K: Copy + Eq, const N: usize> SubscriptionTable<K, N> {
    /// Create an empty table with the default limits
    pub fn new() -> Self {
        Self::with_config(&ProtocolConfig::default())
    }

    /// Create an empty table with the limits of `config`
    pub fn with_config(config: &ProtocolConfig) -> Self {
        Self {
            entries: Vec::new(),
            max_filter_len: config.max_filter_len.min(MAX_FILTER_LEN),
            max_device_id_len: config.max_device_id_len.min(MAX_DEVICE_ID_LEN),
        }
    }

    /// Number of stored subscriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored subscriptions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionEntry<K>> {
        self.entries.iter()
    }

    /// Check whether an identical subscription is stored
    ///
    /// An entry without a device ID only matches requests without one.
    pub fn exists(
        &self,
        filter: &str,
        handler: K,
        scope: ScopeKind,
        device_id: Option<&str>,
    ) -> bool {
        let filter = truncate(filter, self.max_filter_len);
        let device_id = device_id
            .map(|id| truncate(id, self.max_device_id_len))
            .filter(|id| !id.is_empty());
        self.entries.iter().any(|e| {
            e.handler == handler
                && e.scope == scope
                && e.filter() == filter
                && e.device_id() == device_id
        })
    }

    /// Store a subscription
    ///
    /// Adding an existing subscription again succeeds without a new entry.
    /// Filter and device ID are truncated to the configured limits.
    ///
    /// # Errors
    ///
    /// * `FirehoseWithoutFilter` if the entry could never be sent
    /// * `TableFull` if all `N` slots are used
    pub fn add(
        &mut self,
        filter: &str,
        handler: K,
        scope: ScopeKind,
        device_id: Option<&str>,
    ) -> Result<()> {
        if self.exists(filter, handler, scope, device_id) {
            return Ok(());
        }

        let filter = truncate(filter, self.max_filter_len);
        let device_id = device_id.map_or("", |id| truncate(id, self.max_device_id_len));
        if filter.is_empty() && device_id.is_empty() && scope == ScopeKind::Firehose {
            return Err(Error::FirehoseWithoutFilter);
        }

        let entry = SubscriptionEntry {
            filter: String::try_from(filter).map_err(|_| Error::InvalidParameter)?,
            device_id: String::try_from(device_id).map_err(|_| Error::InvalidParameter)?,
            scope,
            handler,
        };
        if self.entries.push(entry).is_err() {
            log::warn!("subscription table full ({} entries), dropping '{}'", N, filter);
            return Err(Error::TableFull);
        }
        log::debug!("subscribed '{}' scope={:?}", filter, scope);
        Ok(())
    }

    /// Remove subscriptions
    ///
    /// `Some(filter)` removes every entry with exactly that filter and keeps
    /// the others in order; `None` clears the table.
    ///
    /// # Returns
    ///
    /// Number of removed entries
    pub fn remove(&mut self, filter: Option<&str>) -> usize {
        let before = self.entries.len();
        match filter {
            Some(filter) => {
                let filter = truncate(filter, self.max_filter_len);
                self.entries.retain(|e| e.filter() != filter);
            }
            None => self.entries.clear(),
        }
        before - self.entries.len()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Encode the subscription message of every entry
    ///
    /// Each message is built into `buf` with the next ID from `ids` and
    /// handed to `f` before the next one overwrites it. Stops at the first
    /// error.
    ///
    /// # Returns
    ///
    /// Number of messages produced
    pub fn encode_each<F>(
        &self,
        buf: &mut [u8],
        ids: &mut MessageIdSequence,
        mut f: F,
    ) -> Result<usize>
    where
        F: FnMut(u16, &[u8]) -> Result<()>,
    {
        let mut count = 0;
        for entry in self.entries.iter() {
            let message_id = ids.next_message_id();
            let len = entry.subscription().encode(buf, message_id)?;
            f(message_id, &buf[..len])?;
            count += 1;
        }
        Ok(count)
    }
}

impl<K: Copy + Eq, const N: usize> Default for SubscriptionTable<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `s` to at most `max` bytes on a character boundary
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE_ID: &str = "53ff73065067544816300187";

    #[test]
    fn test_add_and_exists() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        table.add("temp", 1, ScopeKind::MyDevices, None).unwrap();
        assert!(table.exists("temp", 1, ScopeKind::MyDevices, None));
        assert!(!table.exists("temp", 2, ScopeKind::MyDevices, None));
        assert!(!table.exists("temp", 1, ScopeKind::Firehose, None));
        assert!(!table.exists("temp", 1, ScopeKind::MyDevices, Some(DEVICE_ID)));
        assert!(!table.exists("tem", 1, ScopeKind::MyDevices, None));
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        table.add("temp", 1, ScopeKind::Firehose, None).unwrap();
        table.add("temp", 1, ScopeKind::Firehose, None).unwrap();
        table.add("temp", 1, ScopeKind::Firehose, Some("")).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_device_entry() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        table.add("", 1, ScopeKind::Firehose, Some(DEVICE_ID)).unwrap();
        let entry = table.iter().next().unwrap();
        assert_eq!(entry.device_id(), Some(DEVICE_ID));
        assert_eq!(
            entry.subscription().scope,
            SubscriptionScope::Device(DEVICE_ID)
        );
        assert!(table.exists("", 1, ScopeKind::Firehose, Some(DEVICE_ID)));
        assert!(!table.exists("", 1, ScopeKind::Firehose, None));
    }

    #[test]
    fn test_firehose_without_filter_rejected() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        assert_eq!(
            table.add("", 1, ScopeKind::Firehose, None),
            Err(Error::FirehoseWithoutFilter)
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_full() {
        let mut table: SubscriptionTable<u8, 2> = SubscriptionTable::new();
        table.add("a", 1, ScopeKind::Firehose, None).unwrap();
        table.add("b", 1, ScopeKind::Firehose, None).unwrap();
        assert_eq!(
            table.add("c", 1, ScopeKind::Firehose, None),
            Err(Error::TableFull)
        );
        // Existing entries are still accepted when full
        assert_eq!(table.add("a", 1, ScopeKind::Firehose, None), Ok(()));
    }

    #[test]
    fn test_remove_compacts() {
        let mut table: SubscriptionTable<u8, 8> = SubscriptionTable::new();
        for (filter, handler) in [("a", 1), ("b", 1), ("a", 2), ("c", 1)] {
            table.add(filter, handler, ScopeKind::Firehose, None).unwrap();
        }
        assert_eq!(table.remove(Some("a")), 2);
        let filters: std::vec::Vec<&str> = table.iter().map(|e| e.filter()).collect();
        assert_eq!(filters, ["b", "c"]);

        assert_eq!(table.remove(Some("zzz")), 0);
        assert_eq!(table.remove(None), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_truncation() {
        let config = ProtocolConfig {
            max_filter_len: 4,
            max_device_id_len: 3,
            ..ProtocolConfig::default()
        };
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::with_config(&config);
        table.add("temperature", 1, ScopeKind::Firehose, Some("abcdef")).unwrap();
        let entry = table.iter().next().unwrap();
        assert_eq!(entry.filter(), "temp");
        assert_eq!(entry.device_id(), Some("abc"));
        // Lookups truncate the same way
        assert!(table.exists("temperature", 1, ScopeKind::Firehose, Some("abcdef")));
    }

    #[test]
    fn test_truncate_char_boundary() {
        assert_eq!(truncate("h\u{e9}llo", 2), "h");
        assert_eq!(truncate("abc", 8), "abc");
    }

    #[test]
    fn test_encode_each() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        table.add("weather", 1, ScopeKind::Firehose, Some(DEVICE_ID)).unwrap();
        table.add("", 2, ScopeKind::MyDevices, None).unwrap();

        let mut ids = MessageIdSequence::new(0x8887, 0);
        let mut buf = [0u8; 64];
        let mut seen = std::vec::Vec::new();
        let count = table
            .encode_each(&mut buf, &mut ids, |id, msg| {
                seen.push((id, msg.to_vec()));
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(seen[0].0, 0x8888);
        assert_eq!(seen[0].1.len(), 39);
        assert_eq!(seen[1].0, 0x8889);
        assert_eq!(seen[1].1, [0x40, 0x01, 0x88, 0x89, 0xB1, b'e', 0x41, b'u']);
    }

    #[test]
    fn test_encode_each_stops_on_error() {
        let mut table: SubscriptionTable<u8, 4> = SubscriptionTable::new();
        table.add("a", 1, ScopeKind::Firehose, None).unwrap();
        table.add("b", 1, ScopeKind::Firehose, None).unwrap();

        let mut ids = MessageIdSequence::default();
        let mut buf = [0u8; 64];
        let mut calls = 0;
        let result = table.encode_each(&mut buf, &mut ids, |_, _| {
            calls += 1;
            Err(Error::TransportError)
        });
        assert_eq!(result, Err(Error::TransportError));
        assert_eq!(calls, 1);
    }
}
