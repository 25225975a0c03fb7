//! # Application Layer Protocols
//!
//! Implementations of the two application layer (OSI Layer 7) protocols the
//! unified request client can speak. Both are built directly on the
//! [`Transport`](crate::network::Transport) capability and follow the same
//! principles:
//!
//! - **Connection agnostic**: any byte stream the firmware supplies will do
//! - **No-std compatible**: fixed-size [`heapless`] buffers, no allocation
//! - **Single-threaded**: blocking waits through
//!   [`Delay`](crate::network::Delay), never a background task
//!
//! [`http`] carries the wire encoder and the bounded response reader used by
//! the HTTP request variant. [`mqtt`] is a minimal publish-only MQTT 3.1.1
//! client that satisfies the [`PubSub`](crate::network::PubSub) capability for
//! deployments that do not bring their own broker client.

/// HTTP request encoding and bounded response reading.
///
/// Produces the newline-delimited request message and extracts a status code
/// from a partial, timeout-bounded read of the raw response stream.
pub mod http;

/// Minimal MQTT 3.1.1 publisher.
///
/// Provides session establishment with username/password credentials, QoS 0
/// publishing and loop-driven keepalive, implementing the
/// [`PubSub`](crate::network::PubSub) capability.
pub mod mqtt;
