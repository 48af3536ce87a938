// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cloud protocol message builders
//!
//! Every builder writes a complete message into a caller buffer and returns
//! the number of bytes written. Nothing is allocated.

pub mod control;
pub mod event;
pub mod subscription;

pub use control::{
    chunk_missed, chunk_received, describe_post_header, empty_ack, function_return, key_changed,
    ping, separate_response, time_request, update_done, update_ready, variable_value,
    ChunkReceivedCode, Hello, VariableValue,
};
pub use event::{event, Event, EventType, DEFAULT_TTL, MAX_TTL};
pub use subscription::{
    subscription, subscription_for_device, subscription_with_scope, ScopeKind, Subscription,
    SubscriptionScope,
};

use crate::coap::{MessageWriter, PAYLOAD_MARKER};
use crate::error::Result;

/// Write the payload marker followed by `data`
///
/// Nothing is written unless both fit.
pub(crate) fn write_payload(writer: &mut MessageWriter<'_>, data: &[u8]) -> Result<()> {
    writer.reserve(1 + data.len())?;
    writer.write_u8(PAYLOAD_MARKER)?;
    writer.write_bytes(data)
}
