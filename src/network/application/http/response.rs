use crate::network::error::Error;
use crate::network::{Delay, Transport};
use heapless::Vec;

/// Default capture capacity for the response status line, in bytes.
pub const DEFAULT_STATUS_LINE_CAPACITY: usize = 49;

/// Default number of 1 ms wait iterations before giving up on the first byte.
pub const DEFAULT_REPLY_WAIT: u16 = 100;

/// How the reader waits for and drains a response stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Maximum number of 1 ms sleeps to wait for the first response byte.
    /// When exceeded, the reader proceeds to the drain anyway; an empty
    /// stream then surfaces as [`Error::Timeout`].
    pub reply_wait: u16,
    /// Close the connection on the first iteration that observes no buffered
    /// byte while the stream is still up. This keeps keep-alive connections
    /// from idling open, at the cost of truncating responses from servers
    /// that pause mid-header. Set to `false` to poll until the peer closes
    /// instead (which relies on the server actually closing).
    pub close_on_idle: bool,
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            reply_wait: DEFAULT_REPLY_WAIT,
            close_on_idle: true,
        }
    }
}

/// Outcome of one drained response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    /// The derived HTTP status code.
    pub status_code: u16,
    /// The reply-wait budget ran out before the first byte arrived.
    pub timed_out: bool,
    /// The capture buffer filled up and later bytes were dropped.
    pub truncated: bool,
}

/// Drains a transport under a bounded time and byte budget and derives the
/// response status code.
///
/// `CAP` is the capture capacity: only the first `CAP` bytes of the response
/// are kept, which is enough for the status line. Everything past that is
/// read and discarded so the stream drains, but never stored.
///
/// The reader always leaves the transport closed, whether or not a status
/// code was found.
#[derive(Debug, Clone, Copy)]
pub struct ResponseReader<const CAP: usize = DEFAULT_STATUS_LINE_CAPACITY> {
    policy: ReadPolicy,
}

impl<const CAP: usize> ResponseReader<CAP> {
    /// Create a reader with the given policy.
    pub fn new(policy: ReadPolicy) -> Self {
        Self { policy }
    }

    /// Wait for, capture and parse the response on an already-connected
    /// transport.
    ///
    /// One call is one attempt; there are no retries. Waiting for the first
    /// byte is bounded by the policy's `reply_wait`, after which the drain
    /// still runs (the peer may have closed without writing, which is how an
    /// empty response is distinguished from a slow one).
    pub fn read<T: Transport, D: Delay>(
        &self,
        transport: &mut T,
        delay: &mut D,
    ) -> Result<Response, Error> {
        // Wait for the answer to come back before draining. Prevents some
        // "empty response" instances on slow links. The counter is local to
        // this call; a timeout here does not bleed into the next request.
        let mut waited: u32 = 0;
        let mut timed_out = false;
        while transport.available() == 0 {
            delay.delay_ms(1);
            waited += 1;
            if waited > u32::from(self.policy.reply_wait) {
                timed_out = true;
                break;
            }
        }

        // Capture the header prefix. Bytes past the capacity are still read
        // off the wire but dropped.
        let mut captured: Vec<u8, CAP> = Vec::new();
        let mut truncated = false;
        while transport.is_connected() {
            if transport.available() > 0 {
                if let Some(byte) = transport.read_byte() {
                    if captured.push(byte).is_err() {
                        truncated = true;
                    }
                }
            } else if self.policy.close_on_idle {
                // No byte buffered right now: tear the connection down rather
                // than hold a keep-alive open.
                transport.close();
            } else {
                delay.delay_ms(1);
            }
        }
        transport.close();

        let status_code = parse_status_line(&captured);
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "response capture {=[u8]:a} -> code {=u16}",
            &captured[..],
            status_code
        );

        match status_code {
            0 if captured.is_empty() && timed_out => Err(Error::Timeout),
            0 => Err(Error::MalformedResponse),
            code => Ok(Response {
                status_code: code,
                timed_out,
                truncated,
            }),
        }
    }
}

/// Derive a status code from captured response bytes, `0` when none is found.
///
/// Handles both the bare `"200 OK"` form and the usual
/// `"HTTP/1.1 200 OK"` status line: the token before the first space is
/// parsed first, and if it is not a positive number the three characters
/// after the space are parsed instead. Integer parsing takes leading ASCII
/// digits and gives `0` when there are none.
///
/// A response whose genuine status token is `0` is indistinguishable from an
/// unparsable one; callers see the same sentinel either way.
pub fn parse_status_line(captured: &[u8]) -> u16 {
    let Some(first_space) = captured.iter().position(|&byte| byte == b' ') else {
        return 0;
    };
    // "{code} WORD" form
    let code = parse_leading_digits(&captured[..first_space]);
    if code != 0 {
        return code;
    }
    // "HTTP/x.y {code} WORD" form: three characters after the first space
    let rest = &captured[first_space + 1..];
    parse_leading_digits(&rest[..rest.len().min(3)])
}

fn parse_leading_digits(bytes: &[u8]) -> u16 {
    let mut value: u32 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(u32::from(byte - b'0'));
    }
    value.min(u32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_code_form() {
        assert_eq!(parse_status_line(b"200 OK\n"), 200);
    }

    #[test]
    fn status_line_form() {
        assert_eq!(parse_status_line(b"HTTP/1.1 404 Not Found\n"), 404);
        assert_eq!(parse_status_line(b"HTTP/1.1 500 Internal Server Error"), 500);
    }

    #[test]
    fn no_space_gives_zero() {
        assert_eq!(parse_status_line(b""), 0);
        assert_eq!(parse_status_line(b"garbage-without-any-space"), 0);
    }

    #[test]
    fn non_numeric_code_gives_zero() {
        assert_eq!(parse_status_line(b"HTTP/1.1 abc def"), 0);
    }

    #[test]
    fn leading_digits_are_enough() {
        // atol semantics: digits up to the first non-digit count
        assert_eq!(parse_status_line(b"12x rest"), 12);
        assert_eq!(parse_status_line(b"HTTP/1.1 2000"), 200);
    }

    #[test]
    fn zero_token_is_the_failure_sentinel() {
        assert_eq!(parse_status_line(b"0 OK\n"), 0);
    }

    #[test]
    fn short_tail_after_space_is_clamped() {
        assert_eq!(parse_status_line(b"HTTP/1.1 4"), 4);
        assert_eq!(parse_status_line(b"x "), 0);
    }
}
