// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CoAP subset: header, option TLV encoding, bounded writer
//!
//! Only the parts of RFC 7252 the cloud protocol uses are implemented:
//! no block-wise transfer, no observe, no decoding.

pub mod encoder;
pub mod header;
pub mod option;
pub mod types;
pub mod writer;

pub use encoder::CoapEncoder;
pub use header::MessageHeader;
pub use option::{encoded_option_len, write_option, OptionSequence, MAX_EXTENDED_VALUE};
pub use types::{CoapCode, CoapOption, CoapType, COAP_VERSION, MAX_TOKEN_LEN, PAYLOAD_MARKER};
pub use writer::MessageWriter;
