// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use spark_coap::coap::encoded_option_len;
use spark_coap::{Error, Event, EventType, DEFAULT_TTL};

// Layout: [buf_len_hi, buf_len_lo, flags, ttl(3), name_len, name.., data..]
fuzz_target!(|data: &[u8]| {
    if data.len() < 7 {
        return;
    }
    let buf_len = usize::from(u16::from_be_bytes([data[0], data[1]])) % 2048;
    let flags = data[2];
    let ttl = u32::from_be_bytes([0, data[3], data[4], data[5]]);
    let name_len = usize::from(data[6]).min(data.len() - 7);
    let Ok(name) = core::str::from_utf8(&data[7..7 + name_len]) else {
        return;
    };
    let payload = &data[7 + name_len..];

    let mut event = Event::new(name).ttl(ttl).with_ack(flags & 1 != 0);
    if flags & 2 != 0 {
        event = event.event_type(EventType::Private);
    }
    if flags & 4 != 0 {
        event = event.data(payload);
    }

    let mut expected = 4 + 2 + encoded_option_len(0, name.len());
    if ttl != DEFAULT_TTL {
        expected += 4;
    }
    if event.data.is_some() {
        expected += 1 + payload.len();
    }

    let mut buf = vec![0u8; buf_len];
    match event.encode(&mut buf, 0x1234) {
        Ok(len) => {
            assert_eq!(len, expected);
            assert_eq!(&buf[..4], &[if flags & 1 != 0 { 0x40 } else { 0x50 }, 0x02, 0x12, 0x34]);
        }
        Err(Error::BufferTooSmall) => assert!(expected > buf_len),
        Err(e) => panic!("unexpected error {:?}", e),
    }
});
