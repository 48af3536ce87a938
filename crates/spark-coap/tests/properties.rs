// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Randomized properties of the encoders: message lengths follow the option
// length formula, and the option stream replays to the exact inputs.

#![allow(clippy::cast_possible_truncation)]

use spark_coap::coap::encoded_option_len;
use spark_coap::{event, CoapEncoder, CoapOption, CoapType, Event, EventType, Subscription};
use spark_coap::{CoapCode, SubscriptionScope};

const ITERATIONS: usize = 500;

/// Decoded view of a message: header fields, options and payload
#[derive(Debug, PartialEq)]
struct Replayed {
    first_byte: u8,
    code: u8,
    message_id: u16,
    token: Vec<u8>,
    options: Vec<(u32, Vec<u8>)>,
    payload: Option<Vec<u8>>,
}

fn read_extended(nibble: u8, bytes: &[u8], pos: &mut usize) -> u32 {
    match nibble {
        13 => {
            let v = u32::from(bytes[*pos]) + 13;
            *pos += 1;
            v
        }
        14 => {
            let v = u32::from(u16::from_be_bytes([bytes[*pos], bytes[*pos + 1]])) + 269;
            *pos += 2;
            v
        }
        15 => panic!("reserved nibble 15"),
        n => u32::from(n),
    }
}

/// Replay an encoded message into its parts
fn replay(msg: &[u8]) -> Replayed {
    let tkl = usize::from(msg[0] & 0x0F);
    let mut pos = 4 + tkl;
    let mut number = 0u32;
    let mut options = Vec::new();
    let mut payload = None;

    while pos < msg.len() {
        let b = msg[pos];
        pos += 1;
        if b == 0xFF {
            payload = Some(msg[pos..].to_vec());
            break;
        }
        let delta = read_extended(b >> 4, msg, &mut pos);
        let len = read_extended(b & 0x0F, msg, &mut pos) as usize;
        number += delta;
        options.push((number, msg[pos..pos + len].to_vec()));
        pos += len;
    }

    Replayed {
        first_byte: msg[0],
        code: msg[1],
        message_id: u16::from_be_bytes([msg[2], msg[3]]),
        token: msg[4..4 + tkl].to_vec(),
        options,
        payload,
    }
}

fn random_name(rng: &mut fastrand::Rng, max: usize) -> String {
    let len = rng.usize(0..=max);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

#[test]
fn event_length_follows_option_formula() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0001);
    let mut buf = vec![0u8; 2048];
    for _ in 0..ITERATIONS {
        let name = random_name(&mut rng, 600);
        let ty = if rng.bool() {
            EventType::Public
        } else {
            EventType::Private
        };
        let len = event(&mut buf, rng.u16(..), &name, None, 60, ty).unwrap();
        assert_eq!(len, 4 + 2 + encoded_option_len(0, name.len()), "name {:?}", name);
    }
}

#[test]
fn event_replays_to_inputs() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0002);
    let mut buf = vec![0u8; 2048];
    for _ in 0..ITERATIONS {
        let name = random_name(&mut rng, 300);
        let data: Option<Vec<u8>> = rng
            .bool()
            .then(|| (0..rng.usize(0..200)).map(|_| rng.u8(..)).collect());
        let ttl = if rng.bool() { 60 } else { rng.u32(0..=0xFF_FFFF) };
        let id = rng.u16(..);
        let with_ack = rng.bool();

        let mut ev = Event::new(&name).ttl(ttl).with_ack(with_ack);
        if let Some(d) = &data {
            ev = ev.data(d);
        }
        let len = ev.encode(&mut buf, id).unwrap();
        let replayed = replay(&buf[..len]);

        let mut expected = vec![
            (CoapOption::URI_PATH, vec![b'e']),
            (CoapOption::URI_PATH, name.as_bytes().to_vec()),
        ];
        if ttl != 60 {
            expected.push((CoapOption::MAX_AGE, ttl.to_be_bytes()[1..].to_vec()));
        }

        let ty = if with_ack { 0x40 } else { 0x50 };
        assert_eq!(replayed.first_byte, ty);
        assert_eq!(replayed.code, 0x02);
        assert_eq!(replayed.message_id, id);
        assert!(replayed.token.is_empty());
        assert_eq!(replayed.options, expected);
        assert_eq!(replayed.payload, data);
    }
}

#[test]
fn subscription_replays_to_inputs() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0003);
    let mut buf = vec![0u8; 2048];
    for _ in 0..ITERATIONS {
        let filter = random_name(&mut rng, 80);
        let device = random_name(&mut rng, 24);
        let scope = match rng.u8(0..3) {
            0 => SubscriptionScope::Device(device.as_str()),
            1 => SubscriptionScope::MyDevices,
            _ => SubscriptionScope::Firehose,
        };
        let id = rng.u16(..);

        let result = Subscription::new(Some(filter.as_str()), scope).encode(&mut buf, id);
        if filter.is_empty() && scope == SubscriptionScope::Firehose {
            assert!(result.is_err());
            continue;
        }
        let replayed = replay(&buf[..result.unwrap()]);

        let mut expected = vec![(CoapOption::URI_PATH, vec![b'e'])];
        if !filter.is_empty() {
            expected.push((CoapOption::URI_PATH, filter.as_bytes().to_vec()));
        }
        if scope == SubscriptionScope::MyDevices {
            expected.push((CoapOption::URI_QUERY, vec![b'u']));
        }
        let payload = match scope {
            SubscriptionScope::Device(d) => Some(d.as_bytes().to_vec()),
            _ => None,
        };

        assert_eq!(replayed.first_byte, 0x40);
        assert_eq!(replayed.code, 0x01);
        assert_eq!(replayed.message_id, id);
        assert_eq!(replayed.options, expected);
        assert_eq!(replayed.payload, payload);
    }
}

#[test]
fn generic_encoder_replays_to_inputs() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0004);
    let mut buf = vec![0u8; 8192];
    for _ in 0..ITERATIONS {
        let token: Vec<u8> = (0..rng.usize(0..=8)).map(|_| rng.u8(..)).collect();
        let mut numbers: Vec<u32> = (0..rng.usize(0..6)).map(|_| rng.u32(0..2000)).collect();
        numbers.sort_unstable();
        let options: Vec<(u32, Vec<u8>)> = numbers
            .into_iter()
            .map(|n| {
                let len = if rng.u8(0..10) == 0 {
                    rng.usize(269..600)
                } else {
                    rng.usize(0..40)
                };
                (n, (0..len).map(|_| rng.u8(..)).collect())
            })
            .collect();
        let payload: Vec<u8> = (0..rng.usize(0..64)).map(|_| rng.u8(..)).collect();
        let id = rng.u16(..);

        let mut enc = CoapEncoder::new(&mut buf);
        enc.message_type(CoapType::NonConfirmable)
            .code(CoapCode::POST)
            .id(id)
            .token(&token);
        for (n, v) in &options {
            enc.option(*n, v);
        }
        enc.payload(&payload);
        let len = enc.encode().unwrap();

        let replayed = replay(&buf[..len]);
        assert_eq!(replayed.first_byte, 0x50 | token.len() as u8);
        assert_eq!(replayed.code, 0x02);
        assert_eq!(replayed.message_id, id);
        assert_eq!(replayed.token, token);
        assert_eq!(replayed.options, options);
        assert_eq!(
            replayed.payload,
            (!payload.is_empty()).then_some(payload.clone())
        );
    }
}

#[test]
fn short_buffers_fail_cleanly() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0005);
    for _ in 0..ITERATIONS {
        let name = random_name(&mut rng, 40);
        let mut full = [0u8; 128];
        let needed = event(&mut full, 1, &name, Some(b"abc"), 120, EventType::Public).unwrap();

        let mut short = vec![0u8; rng.usize(0..needed)];
        assert_eq!(
            event(&mut short, 1, &name, Some(b"abc"), 120, EventType::Public),
            Err(spark_coap::Error::BufferTooSmall)
        );
    }
}
