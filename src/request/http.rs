use crate::network::application::http::request::{RequestParts, format_request};
use crate::network::application::http::response::{
    DEFAULT_STATUS_LINE_CAPACITY, Response, ResponseReader,
};
use crate::network::error::Error;
use crate::network::{Delay, Transport};
use crate::request::{Config, RequestClient};

/// The HTTP variant of the request client.
///
/// Owns the transport and opens one connection per send; nothing persists
/// between calls. `CAP` bounds the response capture, see
/// [`ResponseReader`].
#[derive(Debug)]
pub struct HttpRequestClient<
    'a,
    T: Transport,
    D: Delay,
    const CAP: usize = DEFAULT_STATUS_LINE_CAPACITY,
> {
    config: &'a Config<'a>,
    transport: T,
    delay: D,
}

impl<'a, T: Transport, D: Delay> HttpRequestClient<'a, T, D> {
    /// Bind a validated config to a transport, with the default response
    /// capture capacity.
    pub fn new(config: &'a Config<'a>, transport: T, delay: D) -> Result<Self, Error> {
        Self::with_capture(config, transport, delay)
    }
}

impl<'a, T: Transport, D: Delay, const CAP: usize> HttpRequestClient<'a, T, D, CAP> {
    /// Like [`new`](HttpRequestClient::new), but with the capture capacity
    /// chosen through the `CAP` parameter.
    pub fn with_capture(config: &'a Config<'a>, transport: T, delay: D) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            delay,
        })
    }

    /// Perform one request with `payload` and return the detailed outcome.
    ///
    /// Connects, writes the whole request message in a single transport
    /// write, then hands the stream to the response reader. A failed connect
    /// returns [`Error::ConnectFailed`] without writing a byte. Whatever
    /// happens after the connect, the transport is closed again before this
    /// returns.
    pub fn request(&mut self, payload: &[u8]) -> Result<Response, Error> {
        if self
            .transport
            .connect(self.config.url, self.config.effective_port())
            .is_err()
        {
            return Err(Error::ConnectFailed);
        }

        let parts = RequestParts {
            method: self.config.method,
            host: self.config.url,
            path: self.config.path,
            extra_headers: self.config.headers,
        };
        let message = match format_request(&parts, payload) {
            Ok(message) => message,
            Err(error) => {
                self.transport.close();
                return Err(error);
            }
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("outgoing request {=[u8]:a}", &message[..]);

        if self.transport.write(&message).is_err() {
            self.transport.close();
            return Err(Error::WriteError);
        }

        let reader: ResponseReader<CAP> = ResponseReader::new(self.config.read_policy());
        reader.read(&mut self.transport, &mut self.delay)
    }

    /// Sentinel-style adapter over [`request`](HttpRequestClient::request):
    /// the derived status code, or `0` for any failure. A genuine status
    /// token of `0` is indistinguishable from failure here.
    pub fn status(&mut self, payload: &[u8]) -> u16 {
        self.request(payload)
            .map_or(0, |response| response.status_code)
    }
}

impl<'a, T: Transport, D: Delay, const CAP: usize> RequestClient
    for HttpRequestClient<'a, T, D, CAP>
{
    /// Nothing to prepare; connections are opened lazily per send.
    fn setup(&mut self) {}

    /// Nothing to maintain; HTTP is stateless per request.
    fn maintain(&mut self) {}

    fn send(&mut self, payload: &[u8]) -> bool {
        self.status(payload) != 0
    }
}
