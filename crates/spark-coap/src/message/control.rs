// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-layout control messages
//!
//! Small messages the device exchanges with the cloud besides events and
//! subscriptions: keep-alive pings, acknowledgements, function/variable
//! responses, firmware-update chunk bookkeeping, describe and time
//! requests.

use super::write_payload;
use crate::coap::{
    CoapCode, CoapOption, CoapType, MessageHeader, MessageWriter, OptionSequence, PAYLOAD_MARKER,
};
use crate::error::{Error, Result};

/// Result code for a received firmware chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkReceivedCode {
    /// Chunk stored (2.04)
    Ok,
    /// Chunk failed its CRC (4.00)
    Bad,
}

impl ChunkReceivedCode {
    /// Response code on the wire
    pub const fn code(self) -> CoapCode {
        match self {
            ChunkReceivedCode::Ok => CoapCode::CHANGED,
            ChunkReceivedCode::Bad => CoapCode::BAD_REQUEST,
        }
    }
}

/// Value returned for a cloud variable request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableValue<'a> {
    /// One byte, 0 or 1
    Bool(bool),
    /// 4 bytes big-endian
    Int(i32),
    /// 8 bytes in device (little-endian) order
    Double(f64),
    /// Raw bytes (strings)
    Bytes(&'a [u8]),
}

fn header_with_token(
    writer: &mut MessageWriter<'_>,
    message_type: CoapType,
    code: CoapCode,
    message_id: u16,
    token: u8,
) -> Result<()> {
    MessageHeader::new(message_type, code, message_id)
        .with_token_len(1)
        .write(writer)?;
    writer.write_u8(token)
}

/// Empty confirmable message used as a keep-alive ping
pub fn ping(buf: &mut [u8], message_id: u16) -> Result<usize> {
    MessageHeader::new(CoapType::Confirmable, CoapCode::EMPTY, message_id).encode(buf)
}

/// Empty acknowledgement of a confirmable message
pub fn empty_ack(buf: &mut [u8], message_id: u16) -> Result<usize> {
    MessageHeader::new(CoapType::Acknowledgement, CoapCode::EMPTY, message_id).encode(buf)
}

/// Separate response to an earlier request identified by `token`
pub fn separate_response(
    buf: &mut [u8],
    message_id: u16,
    token: u8,
    code: CoapCode,
    confirmable: bool,
    payload: Option<&[u8]>,
) -> Result<usize> {
    let message_type = if confirmable {
        CoapType::Confirmable
    } else {
        CoapType::NonConfirmable
    };
    let mut writer = MessageWriter::new(buf);
    header_with_token(&mut writer, message_type, code, message_id, token)?;
    if let Some(payload) = payload.filter(|p| !p.is_empty()) {
        write_payload(&mut writer, payload)?;
    }
    Ok(writer.position())
}

/// Response confirming a session key change
pub fn key_changed(buf: &mut [u8], message_id: u16, token: u8) -> Result<usize> {
    separate_response(buf, message_id, token, CoapCode::CHANGED, false, None)
}

/// Response announcing the device is ready for a firmware update
///
/// `flags` is sent as a one-byte payload when present.
pub fn update_ready(
    buf: &mut [u8],
    message_id: u16,
    token: u8,
    flags: Option<u8>,
) -> Result<usize> {
    let flags = flags.map(|f| [f]);
    separate_response(
        buf,
        message_id,
        token,
        CoapCode::CHANGED,
        false,
        flags.as_ref().map(|f| &f[..]),
    )
}

/// Response to a received firmware chunk
pub fn chunk_received(
    buf: &mut [u8],
    message_id: u16,
    token: u8,
    code: ChunkReceivedCode,
) -> Result<usize> {
    separate_response(buf, message_id, token, code.code(), false, None)
}

/// Firmware update finished
pub fn update_done(buf: &mut [u8], message_id: u16, confirmable: bool) -> Result<usize> {
    let message_type = if confirmable {
        CoapType::Confirmable
    } else {
        CoapType::NonConfirmable
    };
    let mut writer = MessageWriter::new(buf);
    MessageHeader::new(message_type, CoapCode::PUT, message_id).write(&mut writer)?;
    OptionSequence::new().write_uri_path(&mut writer, b"u")?;
    Ok(writer.position())
}

/// Return value of a cloud function call
pub fn function_return(buf: &mut [u8], message_id: u16, token: u8, value: i32) -> Result<usize> {
    let mut writer = MessageWriter::new(buf);
    header_with_token(
        &mut writer,
        CoapType::NonConfirmable,
        CoapCode::CHANGED,
        message_id,
        token,
    )?;
    write_payload(&mut writer, &value.to_be_bytes())?;
    Ok(writer.position())
}

/// Piggybacked response to a cloud variable request
///
/// `message_id` is the id of the request being acknowledged.
pub fn variable_value(
    buf: &mut [u8],
    message_id: u16,
    token: u8,
    value: &VariableValue<'_>,
) -> Result<usize> {
    let mut writer = MessageWriter::new(buf);
    header_with_token(
        &mut writer,
        CoapType::Acknowledgement,
        CoapCode::CONTENT,
        message_id,
        token,
    )?;
    match *value {
        VariableValue::Bool(v) => write_payload(&mut writer, &[u8::from(v)])?,
        VariableValue::Int(v) => write_payload(&mut writer, &v.to_be_bytes())?,
        VariableValue::Double(v) => write_payload(&mut writer, &v.to_le_bytes())?,
        VariableValue::Bytes(v) => write_payload(&mut writer, v)?,
    }
    Ok(writer.position())
}

/// Request retransmission of missed firmware chunks
///
/// Indices are sent as consecutive big-endian u16 values.
pub fn chunk_missed(buf: &mut [u8], message_id: u16, indices: &[u16]) -> Result<usize> {
    if indices.is_empty() {
        return Err(Error::InvalidParameter);
    }
    let mut writer = MessageWriter::new(buf);
    MessageHeader::new(CoapType::Confirmable, CoapCode::GET, message_id).write(&mut writer)?;
    OptionSequence::new().write_uri_path(&mut writer, b"c")?;
    writer.reserve(1 + indices.len() * 2)?;
    writer.write_u8(PAYLOAD_MARKER)?;
    for index in indices {
        writer.write_u16_be(*index)?;
    }
    log::debug!("requesting {} missed chunks", indices.len());
    Ok(writer.position())
}

/// Header of a device-initiated describe message
///
/// Writes everything up to and including the payload marker; the caller
/// appends the description document.
///
/// # Returns
///
/// Number of bytes written (offset of the payload)
pub fn describe_post_header(buf: &mut [u8], message_id: u16, flags: u8) -> Result<usize> {
    let mut writer = MessageWriter::new(buf);
    MessageHeader::new(CoapType::Confirmable, CoapCode::POST, message_id).write(&mut writer)?;
    let mut options = OptionSequence::new();
    options.write_uri_path(&mut writer, b"d")?;
    options.write(&mut writer, CoapOption::URI_QUERY, &[flags])?;
    writer.write_u8(PAYLOAD_MARKER)?;
    Ok(writer.position())
}

/// Request the current time from the cloud
pub fn time_request(buf: &mut [u8], message_id: u16, token: u8) -> Result<usize> {
    let mut writer = MessageWriter::new(buf);
    header_with_token(&mut writer, CoapType::Confirmable, CoapCode::GET, message_id, token)?;
    OptionSequence::new().write_uri_path(&mut writer, b"t")?;
    Ok(writer.position())
}

/// Identification sent by the device right after the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hello<'a> {
    /// Session flags
    pub flags: u8,
    /// Hardware platform
    pub platform_id: u16,
    /// Product the device belongs to
    pub product_id: u16,
    /// Product firmware version
    pub product_firmware_version: u16,
    /// Send as confirmable
    pub confirmable: bool,
    /// Device identifier, appended with a 2-byte length prefix when present
    pub device_id: Option<&'a [u8]>,
}

impl Hello<'_> {
    /// Encode into `buf`
    ///
    /// ```text
    /// Header | Uri-Path "h" | 0xFF | product id (2) | firmware version (2)
    ///        | reserved (1) | flags (1) | platform id (2) | [len (2) | device id]
    /// ```
    pub fn encode(&self, buf: &mut [u8], message_id: u16) -> Result<usize> {
        let message_type = if self.confirmable {
            CoapType::Confirmable
        } else {
            CoapType::NonConfirmable
        };
        let mut writer = MessageWriter::new(buf);
        MessageHeader::new(message_type, CoapCode::POST, message_id).write(&mut writer)?;
        OptionSequence::new().write_uri_path(&mut writer, b"h")?;
        writer.reserve(9)?;
        writer.write_u8(PAYLOAD_MARKER)?;
        writer.write_u16_be(self.product_id)?;
        writer.write_u16_be(self.product_firmware_version)?;
        writer.write_u8(0)?;
        writer.write_u8(self.flags)?;
        writer.write_u16_be(self.platform_id)?;
        if let Some(device_id) = self.device_id {
            let len = u16::try_from(device_id.len()).map_err(|_| Error::InvalidParameter)?;
            writer.reserve(2 + device_id.len())?;
            writer.write_u16_be(len)?;
            writer.write_bytes(device_id)?;
        }
        Ok(writer.position())
    }
}
