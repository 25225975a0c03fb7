//! HTTP/1.1 request encoding and response reading for embedded systems.
//!
//! This is deliberately not a general HTTP client. It produces exactly one
//! request message shape (see [`request::format_request`]) and reads back only
//! enough of the response to derive a status code (see
//! [`response::ResponseReader`]). Response headers beyond the status line and
//! response bodies are never materialized; the capture buffer is a fixed,
//! small number of bytes and everything past it is dropped on the floor.
//!
//! The wire format is newline-delimited with no carriage returns, matching
//! the fielded devices this layer talks to.

/// Request message assembly.
pub mod request;

/// Bounded, timeout-driven response reading and status extraction.
pub mod response;
