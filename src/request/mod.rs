//! The unified request façade.
//!
//! One call site, two protocols. A [`Config`] describes the endpoint once
//! (mode, host, path-or-topic, credentials, timing) and selects which variant
//! type the firmware constructs:
//!
//! - [`HttpRequestClient`]: connects per send, writes one request message,
//!   derives a status code from a bounded read of the raw response.
//! - [`MqttRequestClient`]: blocks in `setup` until the broker accepts the
//!   session, re-ensures the session in `maintain`, publishes in `send`.
//!
//! Both implement [`RequestClient`], so application code drives them
//! identically:
//!
//! 1. `setup()` once after the network link is up
//! 2. `maintain()` at the top of every loop iteration
//! 3. `send(payload)` whenever there is data to push
//!
//! `send` reports plain success/failure; the HTTP variant's
//! [`request`](HttpRequestClient::request) method exposes the detailed
//! outcome when the caller needs more than a boolean.

/// Request configuration shared by both variants.
pub mod config;

/// HTTP variant of the request client.
pub mod http;

/// MQTT variant of the request client.
pub mod mqtt;

pub use config::{Config, Mode};
pub use http::HttpRequestClient;
pub use mqtt::MqttRequestClient;

/// One interface over both protocol variants.
///
/// The three operations have the same meaning in either mode, so the code
/// that produces payloads never branches on the protocol.
pub trait RequestClient {
    /// Prepare the client for sending.
    ///
    /// HTTP: nothing to do, connections are opened per send. MQTT: blocks,
    /// retrying with a fixed delay, until the broker accepts the session;
    /// an unattended device has nothing better to do than wait for its
    /// uplink.
    fn setup(&mut self);

    /// Keep the client healthy; call once per application loop iteration.
    ///
    /// HTTP: nothing to do. MQTT: reconnects if the session dropped, then
    /// services the protocol (inbound drain, keepalive ping).
    fn maintain(&mut self);

    /// Deliver one payload. `true` means the protocol accepted it: a nonzero
    /// HTTP status code, or a publish the broker client took. `false` folds
    /// every failure (connect refusal, timeout, malformed response) together,
    /// with no further detail at this boundary.
    fn send(&mut self, payload: &[u8]) -> bool;
}
