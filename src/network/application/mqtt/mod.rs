//! Publish-only MQTT 3.1.1 client for embedded systems.
//!
//! This module provides a deliberately small MQTT client for devices whose
//! only job is to push payloads upstream. It implements the subset of MQTT
//! 3.1.1 that a publish-only device needs:
//!
//! - CONNECT with clean-session and username/password credentials,
//!   CONNACK validation
//! - PUBLISH at QoS 0 (fire and forget)
//! - loop-driven keepalive: inbound traffic is drained and PINGREQ is sent on
//!   a configurable cadence
//!
//! There is no subscribe, no QoS 1/2 state machine and no inbound message
//! delivery; whatever the broker pushes down is read off the wire and
//! discarded so the stream stays healthy.
//!
//! # Usage
//!
//! The main entry point is [`client::Client`], which works over any
//! [`Transport`](crate::network::Transport) and satisfies the
//! [`PubSub`](crate::network::PubSub) capability consumed by the MQTT request
//! variant.
//!
//! ```rust,no_run
//! use unireq::network::application::mqtt::{Client, Options};
//! use unireq::network::{Delay, Transport};
//! # struct NetTransport;
//! # impl Transport for NetTransport {
//! #     type Error = ();
//! #     fn connect(&mut self, _host: &str, _port: u16) -> Result<(), Self::Error> { Ok(()) }
//! #     fn is_connected(&mut self) -> bool { false }
//! #     fn available(&mut self) -> usize { 0 }
//! #     fn read_byte(&mut self) -> Option<u8> { None }
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn close(&mut self) {}
//! # }
//! # struct BusyDelay;
//! # impl Delay for BusyDelay {
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! # }
//!
//! let options = Options::new("broker.emqx.io", 1883);
//! let mut client = Client::new(NetTransport, BusyDelay, options);
//!
//! if client.connect("esp-client-1", Some("emqx"), Some("123")).is_ok() {
//!     let _ = client.publish("esp32/test", b"[data]");
//! }
//! ```

/// MQTT client implementation and supporting types.
pub mod client;

pub use client::{Client, Options};
