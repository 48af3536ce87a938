// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field-ordered CoAP message encoder
//!
//! General-purpose builder for messages that do not have a fixed layout.
//! Fields must be supplied in wire order:
//!
//! ```text
//! type -> [code] [id] -> [token] -> [options...] -> [payload]
//! ```
//!
//! Any violation is remembered and reported by [`CoapEncoder::encode`], so
//! calls can be chained without checking each step.

use super::header::MessageHeader;
use super::option::OptionSequence;
use super::types::{CoapCode, CoapType, MAX_TOKEN_LEN, PAYLOAD_MARKER};
use super::writer::MessageWriter;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Empty,
    Header,
    Token,
    Options,
    Payload,
}

/// CoAP message encoder over a caller buffer
///
/// # Example
///
/// ```ignore
/// let mut buf = [0u8; 64];
/// let mut e = CoapEncoder::new(&mut buf);
/// e.message_type(CoapType::Confirmable)
///     .code(CoapCode::GET)
///     .id(0x1234)
///     .option_str(CoapOption::URI_PATH, "t");
/// let len = e.encode()?;
/// ```
pub struct CoapEncoder<'a> {
    writer: MessageWriter<'a>,
    stage: Stage,
    message_type: CoapType,
    code: Option<CoapCode>,
    id: Option<u16>,
    token: [u8; MAX_TOKEN_LEN],
    token_len: usize,
    options: OptionSequence,
    error: Option<Error>,
}

impl<'a> CoapEncoder<'a> {
    /// Create an encoder writing into `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            writer: MessageWriter::new(buf),
            stage: Stage::Empty,
            message_type: CoapType::Confirmable,
            code: None,
            id: None,
            token: [0; MAX_TOKEN_LEN],
            token_len: 0,
            options: OptionSequence::new(),
            error: None,
        }
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn ok(&self) -> bool {
        self.error.is_none()
    }

    /// Move to `stage`, which must not precede the current one
    fn enter(&mut self, stage: Stage) -> bool {
        if !self.ok() {
            return false;
        }
        if self.stage == Stage::Empty || self.stage > stage {
            self.fail(Error::InvalidState);
            return false;
        }
        if stage > Stage::Token && self.stage < Stage::Options {
            if let Err(e) = self.flush_header() {
                self.fail(e);
                return false;
            }
        }
        self.stage = stage;
        true
    }

    /// Write header and token once everything before the options is known
    fn flush_header(&mut self) -> Result<()> {
        let header = MessageHeader {
            message_type: self.message_type,
            code: self.code.unwrap_or(CoapCode::EMPTY),
            message_id: self.id.unwrap_or(0),
            token_len: self.token_len as u8,
        };
        header.write(&mut self.writer)?;
        self.writer.write_bytes(&self.token[..self.token_len])
    }

    /// Set the message type (must be the first call)
    pub fn message_type(&mut self, message_type: CoapType) -> &mut Self {
        if self.ok() {
            if self.stage != Stage::Empty {
                self.fail(Error::InvalidState);
            } else {
                self.message_type = message_type;
                self.stage = Stage::Header;
            }
        }
        self
    }

    /// Set the method/response code
    pub fn code(&mut self, code: CoapCode) -> &mut Self {
        if self.enter(Stage::Header) {
            if self.code.is_some() {
                self.fail(Error::InvalidState);
            } else {
                self.code = Some(code);
            }
        }
        self
    }

    /// Set the message ID
    pub fn id(&mut self, id: u16) -> &mut Self {
        if self.enter(Stage::Header) {
            if self.id.is_some() {
                self.fail(Error::InvalidState);
            } else {
                self.id = Some(id);
            }
        }
        self
    }

    /// Set the token (0-8 bytes)
    pub fn token(&mut self, token: &[u8]) -> &mut Self {
        if self.stage == Stage::Token {
            self.fail(Error::InvalidState);
        } else if self.enter(Stage::Token) {
            if token.len() > MAX_TOKEN_LEN {
                self.fail(Error::TokenTooLong);
            } else {
                self.token[..token.len()].copy_from_slice(token);
                self.token_len = token.len();
            }
        }
        self
    }

    /// Add an opaque option
    pub fn option(&mut self, number: u32, value: &[u8]) -> &mut Self {
        if self.enter(Stage::Options) {
            if let Err(e) = self.options.write(&mut self.writer, number, value) {
                self.fail(e);
            }
        }
        self
    }

    /// Add a string option
    pub fn option_str(&mut self, number: u32, value: &str) -> &mut Self {
        self.option(number, value.as_bytes())
    }

    /// Add an empty option
    pub fn option_empty(&mut self, number: u32) -> &mut Self {
        self.option(number, &[])
    }

    /// Add an unsigned integer option using the shortest of 0, 1, 2 or 4 bytes
    pub fn option_uint(&mut self, number: u32, value: u32) -> &mut Self {
        let bytes = value.to_be_bytes();
        let len = match value {
            0 => 0,
            v if v <= 0xFF => 1,
            v if v <= 0xFFFF => 2,
            _ => 4,
        };
        self.option(number, &bytes[4 - len..])
    }

    /// Set the payload; an empty payload writes no marker
    pub fn payload(&mut self, data: &[u8]) -> &mut Self {
        if self.stage == Stage::Payload {
            self.fail(Error::InvalidState);
        } else if self.enter(Stage::Payload) && !data.is_empty() {
            let res = self
                .writer
                .reserve(1 + data.len())
                .and_then(|()| self.writer.write_u8(PAYLOAD_MARKER))
                .and_then(|()| self.writer.write_bytes(data));
            if let Err(e) = res {
                self.fail(e);
            }
        }
        self
    }

    /// Finish the message
    ///
    /// # Returns
    ///
    /// Number of bytes written, or the first error recorded while building
    pub fn encode(mut self) -> Result<usize> {
        if let Some(e) = self.error {
            return Err(e);
        }
        match self.stage {
            Stage::Empty => return Err(Error::InvalidState),
            Stage::Header | Stage::Token => self.flush_header()?,
            Stage::Options | Stage::Payload => {}
        }
        let len = self.writer.position();
        log::trace!(
            "coap encode: type={:?} code={:?} id={:?} len={}",
            self.message_type,
            self.code,
            self.id,
            len
        );
        Ok(len)
    }
}
