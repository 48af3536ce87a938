// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CoAP message types, codes and option numbers

use core::fmt;

/// Protocol version carried in the top two header bits
pub const COAP_VERSION: u8 = 1;

/// Byte separating the option sequence from the payload
pub const PAYLOAD_MARKER: u8 = 0xFF;

/// Maximum token length in bytes
pub const MAX_TOKEN_LEN: usize = 8;

/// Message type (header bits 4-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CoapType {
    /// Requires an acknowledgement
    Confirmable = 0,
    /// Fire-and-forget
    NonConfirmable = 1,
    /// Acknowledgement of a confirmable message
    Acknowledgement = 2,
    /// Reset (message could not be processed)
    Reset = 3,
}

impl CoapType {
    /// Wire value (2 bits)
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Method or response code, `class.detail` packed as `ccc ddddd`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CoapCode(pub u8);

impl CoapCode {
    /// 0.00 empty message
    pub const EMPTY: Self = Self::new(0, 0);
    /// 0.01
    pub const GET: Self = Self::new(0, 1);
    /// 0.02
    pub const POST: Self = Self::new(0, 2);
    /// 0.03
    pub const PUT: Self = Self::new(0, 3);
    /// 0.04
    pub const DELETE: Self = Self::new(0, 4);
    /// 2.01
    pub const CREATED: Self = Self::new(2, 1);
    /// 2.02
    pub const DELETED: Self = Self::new(2, 2);
    /// 2.03
    pub const VALID: Self = Self::new(2, 3);
    /// 2.04
    pub const CHANGED: Self = Self::new(2, 4);
    /// 2.05
    pub const CONTENT: Self = Self::new(2, 5);
    /// 4.00
    pub const BAD_REQUEST: Self = Self::new(4, 0);
    /// 4.01
    pub const UNAUTHORIZED: Self = Self::new(4, 1);
    /// 4.02
    pub const BAD_OPTION: Self = Self::new(4, 2);
    /// 4.03
    pub const FORBIDDEN: Self = Self::new(4, 3);
    /// 4.04
    pub const NOT_FOUND: Self = Self::new(4, 4);
    /// 4.05
    pub const METHOD_NOT_ALLOWED: Self = Self::new(4, 5);
    /// 4.06
    pub const NOT_ACCEPTABLE: Self = Self::new(4, 6);
    /// 4.12
    pub const PRECONDITION_FAILED: Self = Self::new(4, 12);
    /// 4.13
    pub const REQUEST_ENTITY_TOO_LARGE: Self = Self::new(4, 13);
    /// 4.15
    pub const UNSUPPORTED_CONTENT_FORMAT: Self = Self::new(4, 15);
    /// 5.00
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(5, 0);
    /// 5.01
    pub const NOT_IMPLEMENTED: Self = Self::new(5, 1);
    /// 5.02
    pub const BAD_GATEWAY: Self = Self::new(5, 2);
    /// 5.03
    pub const SERVICE_UNAVAILABLE: Self = Self::new(5, 3);
    /// 5.04
    pub const GATEWAY_TIMEOUT: Self = Self::new(5, 4);
    /// 5.05
    pub const PROXYING_NOT_SUPPORTED: Self = Self::new(5, 5);

    /// Build a code from its class (0-7) and detail (0-31)
    pub const fn new(class: u8, detail: u8) -> Self {
        Self(((class & 0x07) << 5) | (detail & 0x1F))
    }

    /// Code class (the digit before the dot)
    pub const fn class(self) -> u8 {
        self.0 >> 5
    }

    /// Code detail (the digits after the dot)
    pub const fn detail(self) -> u8 {
        self.0 & 0x1F
    }

    /// Wire value
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for CoapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoapCode({}.{:02})", self.class(), self.detail())
    }
}

impl fmt::Display for CoapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.class(), self.detail())
    }
}

/// Option numbers from the CoAP option registry
pub struct CoapOption;

#[allow(missing_docs)]
impl CoapOption {
    pub const IF_MATCH: u32 = 1;
    pub const URI_HOST: u32 = 3;
    pub const ETAG: u32 = 4;
    pub const IF_NONE_MATCH: u32 = 5;
    pub const OBSERVE: u32 = 6;
    pub const URI_PORT: u32 = 7;
    pub const LOCATION_PATH: u32 = 8;
    pub const URI_PATH: u32 = 11;
    pub const CONTENT_FORMAT: u32 = 12;
    pub const MAX_AGE: u32 = 14;
    pub const URI_QUERY: u32 = 15;
    pub const ACCEPT: u32 = 17;
    pub const LOCATION_QUERY: u32 = 20;
    pub const PROXY_URI: u32 = 35;
    pub const PROXY_SCHEME: u32 = 39;
    pub const SIZE1: u32 = 60;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wire_values() {
        let codes = [
            (CoapCode::EMPTY, 0x00),
            (CoapCode::GET, 0x01),
            (CoapCode::POST, 0x02),
            (CoapCode::PUT, 0x03),
            (CoapCode::DELETE, 0x04),
            (CoapCode::CREATED, 0x41),
            (CoapCode::DELETED, 0x42),
            (CoapCode::VALID, 0x43),
            (CoapCode::CHANGED, 0x44),
            (CoapCode::CONTENT, 0x45),
            (CoapCode::BAD_REQUEST, 0x80),
            (CoapCode::UNAUTHORIZED, 0x81),
            (CoapCode::BAD_OPTION, 0x82),
            (CoapCode::FORBIDDEN, 0x83),
            (CoapCode::NOT_FOUND, 0x84),
            (CoapCode::METHOD_NOT_ALLOWED, 0x85),
            (CoapCode::NOT_ACCEPTABLE, 0x86),
            (CoapCode::PRECONDITION_FAILED, 0x8C),
            (CoapCode::REQUEST_ENTITY_TOO_LARGE, 0x8D),
            (CoapCode::UNSUPPORTED_CONTENT_FORMAT, 0x8F),
            (CoapCode::INTERNAL_SERVER_ERROR, 0xA0),
            (CoapCode::NOT_IMPLEMENTED, 0xA1),
            (CoapCode::BAD_GATEWAY, 0xA2),
            (CoapCode::SERVICE_UNAVAILABLE, 0xA3),
            (CoapCode::GATEWAY_TIMEOUT, 0xA4),
            (CoapCode::PROXYING_NOT_SUPPORTED, 0xA5),
        ];
        for (code, value) in codes {
            assert_eq!(code.as_u8(), value, "{}", code);
        }
    }

    #[test]
    fn test_code_class_detail() {
        assert_eq!(CoapCode::PRECONDITION_FAILED.class(), 4);
        assert_eq!(CoapCode::PRECONDITION_FAILED.detail(), 12);
        assert_eq!(CoapCode(0x45), CoapCode::CONTENT);
    }

    #[test]
    fn test_type_bits() {
        assert_eq!(CoapType::Confirmable.as_u8(), 0);
        assert_eq!(CoapType::NonConfirmable.as_u8(), 1);
        assert_eq!(CoapType::Acknowledgement.as_u8(), 2);
        assert_eq!(CoapType::Reset.as_u8(), 3);
    }
}
