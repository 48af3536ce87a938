// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded message writer over a caller-owned buffer

use crate::error::{Error, Result};

/// Cursor over a fixed-capacity output buffer
///
/// Every write is bounds-checked; a write that does not fit fails with
/// [`Error::BufferTooSmall`] and leaves the position unchanged.
///
/// # Example
///
/// ```ignore
/// let mut buf = [0u8; 64];
/// let mut writer = MessageWriter::new(&mut buf);
///
/// writer.write_u8(0x50)?;
/// writer.write_u16_be(0xF649)?;
///
/// let bytes = writer.finish();
/// ```
pub struct MessageWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> MessageWriter<'a> {
    /// Create a new writer positioned at the start of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Get current position (bytes written so far)
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining capacity
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Finish writing and return the written bytes
    pub fn finish(self) -> &'a [u8] {
        &self.buf[..self.pos]
    }

    /// Fail unless `len` more bytes fit
    pub fn reserve(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(Error::BufferTooSmall);
        }
        Ok(())
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Write one byte
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Write u16, most significant byte first
    pub fn write_u16_be(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write the low 24 bits of `value`, most significant byte first
    pub fn write_u24_be(&mut self, value: u32) -> Result<()> {
        let bytes = value.to_be_bytes();
        self.write_bytes(&bytes[1..])
    }

    /// Write u32, most significant byte first
    pub fn write_u32_be(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }
}
