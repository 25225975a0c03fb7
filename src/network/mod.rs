//! Capability traits for the network collaborators a device firmware supplies.
//!
//! The request clients in this crate never open sockets themselves. The
//! surrounding application owns the physical link (Ethernet, Wi-Fi, a cellular
//! modem) and hands it over as an implementation of these traits:
//!
//! - [`Transport`]: an open, reconnectable duplex byte stream with polling
//!   reads, matching what embedded TCP client stacks expose.
//! - [`Delay`]: a blocking millisecond sleep. This is the only suspension
//!   mechanism in the crate; there are no background tasks and no scheduler.
//! - [`PubSub`]: a broker-side messaging client (connect, publish, service the
//!   session). Implemented in-tree by
//!   [`application::mqtt::Client`], or by any external broker client.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Protocol implementations built on the capability traits
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{ConnectionState, Delay, PubSub, Transport};
}

/// An open duplex byte stream to a remote endpoint.
///
/// Unlike a one-shot socket handle, a `Transport` is reconnectable: `connect`
/// may be called again after `close`, and the request clients rely on that to
/// open one connection per send. `close` must be idempotent; the HTTP response
/// reader tears the stream down as soon as it observes an idle gap and closes
/// again unconditionally on exit.
pub trait Transport {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection to `host:port`
    fn connect(&mut self, host: &str, port: u16) -> Result<(), Self::Error>;
    /// Whether the stream is currently open
    fn is_connected(&mut self) -> bool;
    /// Number of received bytes ready to be read without blocking
    fn available(&mut self) -> usize;
    /// Read a single byte, `None` when nothing is buffered
    fn read_byte(&mut self) -> Option<u8>;
    /// Write `buf` to the stream, returning the number of bytes accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Tear the connection down. Must be idempotent.
    fn close(&mut self);
}

/// A blocking millisecond sleep.
///
/// Busy-wait loops in this crate (reply waits, broker connect retries) sleep
/// through this capability instead of assuming an operating system.
pub trait Delay {
    /// Block the current (only) thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Connection lifecycle of a [`PubSub`] client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session with the broker
    Disconnected,
    /// A connect attempt is in flight
    Connecting,
    /// Session established, publishes will be accepted
    Connected,
}

/// A publish/subscribe broker client.
///
/// This is the boundary the MQTT request variant delegates to. The in-tree
/// [`application::mqtt::Client`] implements it; so can a vendor SDK wrapper.
/// Failures are reported as plain booleans at this boundary, mirroring the
/// publish contract the request layer exposes to its own callers.
///
/// A `connect` that returns `true` must leave `state()` at
/// [`ConnectionState::Connected`].
pub trait PubSub {
    /// Establish a session with the broker
    fn connect(
        &mut self,
        client_id: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> bool;
    /// Publish `payload` to `topic`
    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool;
    /// Service the session: drain inbound traffic, keep the connection alive
    fn process(&mut self);
    /// Current connection state
    fn state(&self) -> ConnectionState;
}
