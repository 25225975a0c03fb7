use crate::network::error::Error;
use core::fmt::Write;
use heapless::{String, Vec};

/// Capacity of the assembled request message, headers and body included.
pub const REQUEST_CAPACITY: usize = 2048;

/// Borrowed request-line and header fields for one send.
#[derive(Debug, Clone, Copy)]
pub struct RequestParts<'a> {
    /// Verb token, all caps. Not validated; anything other than `GET` is
    /// treated as a method that carries a body.
    pub method: &'a str,
    /// Host name, written into the `Host:` header.
    pub host: &'a str,
    /// Path without the leading slash; the slash is added here.
    pub path: &'a str,
    /// Raw, pre-formatted extra header lines. Appended verbatim, empty means
    /// none. No trailing newline.
    pub extra_headers: &'a str,
}

/// Assemble the complete request message for `payload`.
///
/// `GET` appends the payload to the path as a query string (always, even when
/// the payload is empty) and carries no body. Every other method gets a
/// `Content-Length` header with the exact payload byte length, and the payload
/// follows the header block after a blank line.
///
/// Lines are `\n`-terminated with no `\r`. Returns [`Error::WriteError`] when
/// the message does not fit in [`REQUEST_CAPACITY`].
pub fn format_request(
    parts: &RequestParts<'_>,
    payload: &[u8],
) -> Result<Vec<u8, REQUEST_CAPACITY>, Error> {
    let is_get = parts.method == "GET";
    let mut message: Vec<u8, REQUEST_CAPACITY> = Vec::new();

    // Request line
    append(&mut message, parts.method.as_bytes())?;
    append(&mut message, b" /")?;
    append(&mut message, parts.path.as_bytes())?;
    if is_get {
        append(&mut message, b"?")?;
        append(&mut message, payload)?;
    }
    append(&mut message, b" HTTP/1.1\n")?;

    // Headers
    append(&mut message, b"Host: ")?;
    append(&mut message, parts.host.as_bytes())?;
    append(&mut message, b"\n")?;
    if !is_get {
        let mut len_str: String<10> = String::new();
        write!(len_str, "{}", payload.len()).map_err(|_| Error::WriteError)?;
        append(&mut message, b"Content-Length: ")?;
        append(&mut message, len_str.as_bytes())?;
        append(&mut message, b"\n")?;
    }
    if !parts.extra_headers.is_empty() {
        append(&mut message, parts.extra_headers.as_bytes())?;
    }

    // Body
    if !is_get {
        append(&mut message, b"\n")?;
        append(&mut message, payload)?;
    }
    append(&mut message, b"\n")?;

    Ok(message)
}

fn append(message: &mut Vec<u8, REQUEST_CAPACITY>, bytes: &[u8]) -> Result<(), Error> {
    message.extend_from_slice(bytes).map_err(|_| Error::WriteError)
}
