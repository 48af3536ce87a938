// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use spark_coap::coap::encoded_option_len;
use spark_coap::{Error, Subscription, SubscriptionScope};

// Layout: [buf_len, scope, filter_len, filter.., device..]
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let buf_len = usize::from(data[0]);
    let filter_len = usize::from(data[2]).min(data.len() - 3);
    let Ok(filter) = core::str::from_utf8(&data[3..3 + filter_len]) else {
        return;
    };
    let Ok(device) = core::str::from_utf8(&data[3 + filter_len..]) else {
        return;
    };
    let scope = match data[1] % 3 {
        0 => SubscriptionScope::Device(device),
        1 => SubscriptionScope::MyDevices,
        _ => SubscriptionScope::Firehose,
    };

    let mut expected = 4 + 2;
    if !filter.is_empty() {
        expected += encoded_option_len(0, filter.len());
    }
    match scope {
        SubscriptionScope::Device(d) => expected += 1 + d.len(),
        SubscriptionScope::MyDevices => expected += 2,
        SubscriptionScope::Firehose => {}
    }

    let mut buf = vec![0u8; buf_len];
    match Subscription::new(Some(filter), scope).encode(&mut buf, 0x8888) {
        Ok(len) => assert_eq!(len, expected),
        Err(Error::FirehoseWithoutFilter) => {
            assert!(filter.is_empty() && scope == SubscriptionScope::Firehose);
            assert!(buf.iter().all(|&b| b == 0));
        }
        Err(Error::BufferTooSmall) => assert!(expected > buf_len),
        Err(e) => panic!("unexpected error {:?}", e),
    }
});
