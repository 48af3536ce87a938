// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Golden messages: byte-exact vectors for the event and subscription
// builders, as accepted by the cloud.

#![allow(clippy::unreadable_literal)]

use spark_coap::{
    event, subscription, subscription_for_device, subscription_with_scope, Error, EventType,
    ScopeKind, SubscriptionScope,
};

const DEVICE_ID: &str = "53ff73065067544816300187";

fn encode_event(id: u16, name: &str, data: Option<&[u8]>, ttl: u32, ty: EventType) -> Vec<u8> {
    let mut buf = [0u8; 640];
    let len = event(&mut buf, id, name, data, ttl, ty).unwrap();
    buf[..len].to_vec()
}

#[test]
fn event_single_char_name() {
    let msg = encode_event(0xF649, "x", None, 60, EventType::Public);
    assert_eq!(msg, [0x50, 0x02, 0xF6, 0x49, 0xB1, 0x65, 0x01, 0x78]);
}

#[test]
fn event_private_extended_name() {
    let name = "front-door-unlocked";
    let msg = encode_event(0xF649, name, None, 60, EventType::Private);
    assert_eq!(msg.len(), 27);
    assert_eq!(&msg[..8], &[0x50, 0x02, 0xF6, 0x49, 0xB1, b'E', 0x0D, 0x06]);
    assert_eq!(&msg[8..], name.as_bytes());
}

#[test]
fn event_with_ttl_and_payload() {
    let name = "weather/us/mn/minneapolis";
    let data = b"t:5F,d:-2F,p:15%";
    let msg = encode_event(0x7654, name, Some(data), 3600, EventType::Public);

    let mut expected = vec![0x50, 0x02, 0x76, 0x54, 0xB1, b'e', 0x0D, 0x0C];
    expected.extend_from_slice(name.as_bytes());
    expected.extend_from_slice(&[0x33, 0x00, 0x0E, 0x10, 0xFF]);
    expected.extend_from_slice(data);

    assert_eq!(msg.len(), 54);
    assert_eq!(msg, expected);
}

#[test]
fn subscription_device_with_filter() {
    let mut buf = [0u8; 64];
    let len = subscription_for_device(&mut buf, 0x8888, Some("weather"), DEVICE_ID).unwrap();

    let mut expected = vec![0x40, 0x01, 0x88, 0x88, 0xB1, b'e', 0x07];
    expected.extend_from_slice(b"weather");
    expected.push(0xFF);
    expected.extend_from_slice(DEVICE_ID.as_bytes());

    assert_eq!(len, 39);
    assert_eq!(&buf[..len], expected.as_slice());
}

#[test]
fn subscription_device_without_filter() {
    let mut a = [0u8; 64];
    let mut b = [0u8; 64];
    let la = subscription(&mut a, 0x7000, None, SubscriptionScope::Device(DEVICE_ID)).unwrap();
    let lb =
        subscription(&mut b, 0x7000, Some(""), SubscriptionScope::Device(DEVICE_ID)).unwrap();

    assert_eq!(la, 31);
    assert_eq!(lb, 31);
    assert_eq!(&a[..la], &b[..lb]);
    assert_eq!(&a[..7], &[0x40, 0x01, 0x70, 0x00, 0xB1, b'e', 0xFF]);
}

#[test]
fn subscription_my_devices() {
    let mut buf = [0u8; 16];
    let len = subscription_with_scope(&mut buf, 0x1114, None, ScopeKind::MyDevices).unwrap();
    assert_eq!(&buf[..len], &[0x40, 0x01, 0x11, 0x14, 0xB1, 0x65, 0x41, 0x75]);
}

#[test]
fn subscription_firehose_without_filter() {
    let mut buf = [0u8; 16];
    assert_eq!(
        subscription_with_scope(&mut buf, 0x1116, None, ScopeKind::Firehose),
        Err(Error::FirehoseWithoutFilter)
    );
}

#[test]
fn event_name_at_extension_boundaries() {
    // 12 -> inline, 13 -> one extension byte, 269 -> two extension bytes
    for (n, header) in [
        (12usize, vec![0x0C]),
        (13, vec![0x0D, 0x00]),
        (268, vec![0x0D, 0xFF]),
        (269, vec![0x0E, 0x00, 0x00]),
    ] {
        let name = "n".repeat(n);
        let msg = encode_event(1, &name, None, 60, EventType::Public);
        assert_eq!(&msg[6..6 + header.len()], header.as_slice(), "name length {}", n);
        assert_eq!(msg.len(), 6 + header.len() + n);
    }
}
