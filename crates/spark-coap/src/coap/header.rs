// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CoAP fixed header

use super::types::{CoapCode, CoapType, COAP_VERSION, MAX_TOKEN_LEN};
use super::writer::MessageWriter;
use crate::error::{Error, Result};

/// CoAP header (4 bytes, token follows separately)
///
/// ```text
/// 0: Ver(2) | Type(2) | TKL(4)
/// 1: Code
/// 2..3: Message ID (big-endian)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Message type
    pub message_type: CoapType,
    /// Method or response code
    pub code: CoapCode,
    /// Message ID
    pub message_id: u16,
    /// Token length (0-8)
    pub token_len: u8,
}

impl MessageHeader {
    /// Size of the fixed header in bytes
    pub const SIZE: usize = 4;

    /// Create a token-less header
    pub const fn new(message_type: CoapType, code: CoapCode, message_id: u16) -> Self {
        Self {
            message_type,
            code,
            message_id,
            token_len: 0,
        }
    }

    /// Same header announcing a token of `token_len` bytes
    pub const fn with_token_len(mut self, token_len: u8) -> Self {
        self.token_len = token_len;
        self
    }

    /// First header byte (version, type, token length)
    pub const fn first_byte(&self) -> u8 {
        (COAP_VERSION << 6) | (self.message_type.as_u8() << 4) | (self.token_len & 0x0F)
    }

    /// Write the 4 header bytes
    pub fn write(&self, writer: &mut MessageWriter<'_>) -> Result<()> {
        if self.token_len as usize > MAX_TOKEN_LEN {
            return Err(Error::TokenTooLong);
        }
        writer.reserve(Self::SIZE)?;
        writer.write_u8(self.first_byte())?;
        writer.write_u8(self.code.as_u8())?;
        writer.write_u16_be(self.message_id)
    }

    /// Encode header to bytes
    ///
    /// # Returns
    ///
    /// Number of bytes written (always 4)
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        let mut writer = MessageWriter::new(buf);
        self.write(&mut writer)?;
        Ok(Self::SIZE)
    }
}
