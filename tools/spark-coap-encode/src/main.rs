// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! spark-coap-encode - build cloud messages from the command line
//!
//! Prints the encoded bytes as an annotated hex dump, or as plain hex for
//! piping into other tools.

use clap::{Parser, Subcommand};
use colored::*;
use spark_coap::message::ping;
use spark_coap::{Event, EventType, Subscription, SubscriptionScope, MAX_MESSAGE_SIZE};

/// Device-to-cloud CoAP message encoder
#[derive(Parser, Debug)]
#[command(name = "spark-coap-encode")]
#[command(version)]
#[command(about = "Encode device-to-cloud CoAP messages")]
struct Args {
    #[command(subcommand)]
    message: Message,

    /// Message ID (decimal or 0x-prefixed hex)
    #[arg(short, long, default_value = "1", value_parser = parse_u16, global = true)]
    id: u16,

    /// Print plain hex without offsets or colors
    #[arg(long, global = true)]
    plain: bool,
}

#[derive(Subcommand, Debug)]
enum Message {
    /// Publish an event
    Event {
        /// Event name
        name: String,

        /// Event data
        #[arg(short, long)]
        data: Option<String>,

        /// Time to live in seconds
        #[arg(short, long, default_value = "60")]
        ttl: u32,

        /// Private event (owner only)
        #[arg(long)]
        private: bool,

        /// Request an acknowledgement (confirmable)
        #[arg(long)]
        ack: bool,
    },
    /// Subscribe to events
    Subscribe {
        /// Event name prefix
        filter: Option<String>,

        /// Only events from this device
        #[arg(long, conflicts_with = "my_devices")]
        device: Option<String>,

        /// Only events from devices of the same account
        #[arg(long)]
        my_devices: bool,
    },
    /// Keep-alive ping
    Ping,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid message id '{}': {}", s, e))
}

fn main() {
    // Initialize logger for RUST_LOG-based debug output
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = [0u8; MAX_MESSAGE_SIZE];

    let len = match &args.message {
        Message::Event {
            name,
            data,
            ttl,
            private,
            ack,
        } => {
            let mut event = Event::new(name).ttl(*ttl).with_ack(*ack);
            if *private {
                event = event.event_type(EventType::Private);
            }
            if let Some(data) = data {
                event = event.data(data.as_bytes());
            }
            event.encode(&mut buf, args.id)?
        }
        Message::Subscribe {
            filter,
            device,
            my_devices,
        } => {
            let scope = match (device, my_devices) {
                (Some(device), _) => SubscriptionScope::Device(device),
                (None, true) => SubscriptionScope::MyDevices,
                (None, false) => SubscriptionScope::Firehose,
            };
            Subscription::new(filter.as_deref(), scope).encode(&mut buf, args.id)?
        }
        Message::Ping => ping(&mut buf, args.id)?,
    };

    let msg = &buf[..len];
    if args.plain {
        println!("{}", plain_hex(msg));
    } else {
        println!("{} {} bytes", "Encoded".green().bold(), len);
        print!("{}", hex_dump(msg));
    }
    Ok(())
}

fn plain_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Offset, hex and ASCII columns; header bytes and the payload marker are
/// highlighted
fn hex_dump(bytes: &[u8]) -> String {
    let marker = bytes.iter().skip(4).position(|&b| b == 0xFF).map(|p| p + 4);
    let mut out = String::new();

    for (row, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", row * 16).dimmed().to_string());
        for (col, b) in chunk.iter().enumerate() {
            let offset = row * 16 + col;
            let hex = format!("{:02x}", b);
            let hex = if offset < 4 {
                hex.cyan().to_string()
            } else if Some(offset) == marker {
                hex.yellow().bold().to_string()
            } else {
                hex
            };
            out.push_str(&hex);
            out.push(' ');
            if col == 7 {
                out.push(' ');
            }
        }
        for col in chunk.len()..16 {
            out.push_str("   ");
            if col == 7 {
                out.push(' ');
            }
        }
        out.push('|');
        for b in chunk {
            if b.is_ascii_graphic() || *b == b' ' {
                out.push(*b as char);
            } else {
                out.push('.');
            }
        }
        out.push_str("|\n");
    }
    out
}
