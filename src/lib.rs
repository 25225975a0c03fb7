//! # unireq - Unified Request Layer
//!
//! A Rust library that lets a resource-constrained device deliver an application
//! payload over HTTP or MQTT through a single client interface. The protocol is
//! picked once, at construction time, from a plain configuration struct; the
//! call site then drives the client through the same three operations
//! regardless of the protocol behind it: `setup`, `maintain`, `send`.
//!
//! The library is transport agnostic and designed for `no_std` environments:
//! the surrounding firmware supplies an open byte stream (Ethernet, Wi-Fi,
//! cellular, a serial modem) through the [`network::Transport`] capability and
//! a blocking sleep through [`network::Delay`]. Nothing here allocates; all
//! wire buffers are fixed-capacity [`heapless`] vectors.
//!
//! ## Protocol Variants
//!
//! - **HTTP**: one request per `send`. The client connects, writes a single
//!   newline-delimited request message, then drains the raw response stream
//!   under a bounded time and byte budget to extract the status code. Response
//!   bodies are never parsed.
//! - **MQTT**: one publish per `send`, delegated to a broker client behind the
//!   [`network::PubSub`] capability. A minimal built-in MQTT 3.1.1 publisher
//!   is provided in [`network::application::mqtt`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unireq::network::{Delay, Transport};
//! use unireq::request::{Config, HttpRequestClient, RequestClient};
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
//! let config = Config::http("httpbin.org", "post");
//! let mut client =
//!     HttpRequestClient::new(&config, NetTransport, BusyDelay).unwrap();
//!
//! client.setup();
//! loop {
//!     client.maintain();
//!     let is_ok = client.send(b"[data]");
//!     let _ = is_ok;
//! }
//! ```
//!
//! Configuration can also be loaded from JSON with [`request::Config::from_json`],
//! which borrows string fields directly out of the input buffer.
//!
//! ## Failure Reporting
//!
//! Every failure collapses to a sentinel at the unified boundary: `send`
//! returns `false`, [`request::HttpRequestClient::status`] returns `0`. The
//! detailed API ([`request::HttpRequestClient::request`]) distinguishes
//! connect failures, timeouts and malformed responses when the caller wants
//! to know. A genuine status code of `0` is indistinguishable from failure;
//! that ambiguity is part of the contract.
//!
//! ## Optional Features
//!
//! - `std`: enable standard library support (default: disabled)
//! - `defmt`: emit wire-level diagnostics through `defmt` for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Capability traits consumed by the request clients, and the protocol
/// implementations built on top of them.
///
/// The firmware supplies the capabilities ([`Transport`](network::Transport),
/// [`Delay`](network::Delay), optionally [`PubSub`](network::PubSub)); this
/// module supplies the HTTP wire encoding, the bounded response reader and a
/// minimal MQTT 3.1.1 publisher.
pub mod network;

/// The unified request façade: configuration, the
/// [`RequestClient`](request::RequestClient) trait and its HTTP and MQTT
/// variants.
pub mod request;
