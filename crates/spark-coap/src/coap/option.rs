// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Option encoder (delta/length TLV)
//!
//! ```text
//!   0   1   2   3   4   5   6   7
//! +---------------+---------------+
//! | Option Delta  | Option Length |   1 byte
//! +---------------+---------------+
//! /  Option Delta (extended)      /   0-2 bytes
//! +-------------------------------+
//! /  Option Length (extended)     /   0-2 bytes
//! +-------------------------------+
//! /  Option Value                 /   0 or more bytes
//! +-------------------------------+
//! ```
//!
//! A nibble of 13 means one extension byte (`n - 13`), 14 means two
//! extension bytes big-endian (`n - 269`). Nibble 15 is never produced, so
//! an option header can not collide with the payload marker.

use super::types::CoapOption;
use super::writer::MessageWriter;
use crate::error::{Error, Result};

/// Largest delta or length representable with the 2-byte extension
pub const MAX_EXTENDED_VALUE: u32 = 65804;

const EXT_BYTE: u32 = 13;
const EXT_WORD: u32 = 269;

/// Nibble plus extension bytes for one delta or length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extended {
    nibble: u8,
    ext: [u8; 2],
    ext_len: usize,
}

impl Extended {
    fn split(value: u32) -> Option<Self> {
        if value < EXT_BYTE {
            Some(Self {
                nibble: value as u8,
                ext: [0; 2],
                ext_len: 0,
            })
        } else if value < EXT_WORD {
            Some(Self {
                nibble: 13,
                ext: [(value - EXT_BYTE) as u8, 0],
                ext_len: 1,
            })
        } else if value <= MAX_EXTENDED_VALUE {
            Some(Self {
                nibble: 14,
                ext: ((value - EXT_WORD) as u16).to_be_bytes(),
                ext_len: 2,
            })
        } else {
            None
        }
    }

    fn ext_bytes(&self) -> &[u8] {
        &self.ext[..self.ext_len]
    }
}

/// Encoded size of an option with the given delta and value length
pub fn encoded_option_len(delta: u32, len: usize) -> usize {
    let ext_len = |v: u32| match v {
        v if v < EXT_BYTE => 0,
        v if v < EXT_WORD => 1,
        _ => 2,
    };
    1 + ext_len(delta) + ext_len(len as u32) + len
}

/// Write one option given its delta from the previous option number
///
/// # Errors
///
/// * `OptionDeltaTooLarge` / `OptionTooLong` when a field exceeds
///   [`MAX_EXTENDED_VALUE`]
/// * `BufferTooSmall` when the option does not fit; nothing is written
pub fn write_option(writer: &mut MessageWriter<'_>, delta: u32, value: &[u8]) -> Result<()> {
    let delta = Extended::split(delta).ok_or(Error::OptionDeltaTooLarge)?;
    let length = u32::try_from(value.len())
        .ok()
        .and_then(Extended::split)
        .ok_or(Error::OptionTooLong)?;

    writer.reserve(1 + delta.ext_len + length.ext_len + value.len())?;
    writer.write_u8((delta.nibble << 4) | length.nibble)?;
    writer.write_bytes(delta.ext_bytes())?;
    writer.write_bytes(length.ext_bytes())?;
    writer.write_bytes(value)
}

/// Tracks the last written option number so options are delta-encoded
/// in ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionSequence {
    last: u32,
}

impl OptionSequence {
    /// Start a new sequence (previous option number 0)
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Number of the last option written
    pub const fn last_number(&self) -> u32 {
        self.last
    }

    /// Write option `number` with `value`
    ///
    /// Fails with `OptionOutOfOrder` if `number` is below the previous one.
    pub fn write(
        &mut self,
        writer: &mut MessageWriter<'_>,
        number: u32,
        value: &[u8],
    ) -> Result<()> {
        let delta = number.checked_sub(self.last).ok_or(Error::OptionOutOfOrder)?;
        write_option(writer, delta, value)?;
        self.last = number;
        Ok(())
    }

    /// Write a Uri-Path option carrying `segment` as one opaque value
    ///
    /// Delta is 11 for the first option of a message and 0 when it follows
    /// another Uri-Path option. Separators inside `segment` are not split.
    pub fn write_uri_path(
        &mut self,
        writer: &mut MessageWriter<'_>,
        segment: &[u8],
    ) -> Result<()> {
        self.write(writer, CoapOption::URI_PATH, segment)
    }
}
