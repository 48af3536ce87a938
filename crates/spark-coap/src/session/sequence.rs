// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

// Message ID and token allocation.

/// Source of CoAP message IDs and one-byte tokens
///
/// Both counters pre-increment and wrap, so the first ID handed out is
/// `seed + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageIdSequence {
    message_id: u16,
    token: u8,
}

impl MessageIdSequence {
    /// Create a sequence continuing after `message_id` and `token`
    pub const fn new(message_id: u16, token: u8) -> Self {
        Self { message_id, token }
    }

    /// Allocate the next message ID
    pub fn next_message_id(&mut self) -> u16 {
        self.message_id = self.message_id.wrapping_add(1);
        self.message_id
    }

    /// Allocate the next token
    pub fn next_token(&mut self) -> u8 {
        self.token = self.token.wrapping_add(1);
        self.token
    }

    /// Last message ID handed out
    pub const fn current_message_id(&self) -> u16 {
        self.message_id
    }
}
