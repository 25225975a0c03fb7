use crate::network::application::http::response::{DEFAULT_REPLY_WAIT, ReadPolicy};
use crate::network::application::mqtt;
use crate::network::error::Error;
use serde::Deserialize;

/// Default port when [`Mode::Http`] leaves the port unset.
pub const DEFAULT_HTTP_PORT: u16 = 80;
/// Default port when [`Mode::Mqtt`] leaves the port unset.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Which protocol the request client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One HTTP request per send.
    Http,
    /// One MQTT publish per send.
    Mqtt,
}

/// Immutable description of one logical endpoint.
///
/// Built once by the caller and shared by reference with the request client
/// for the client's lifetime. Beyond the structural checks in
/// [`validate`](Config::validate) the fields pass through unvalidated:
/// garbage in, garbage out, exactly as fielded devices behave.
///
/// String fields are borrowed so a config can live in flash, in a static, or
/// be carved zero-copy out of a JSON buffer by [`from_json`](Config::from_json).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config<'a> {
    /// Protocol selection; fixed at construction.
    pub mode: Mode,
    /// Host name of the server or broker.
    pub url: &'a str,
    /// URL path (HTTP) or topic (MQTT), without a leading `/`; the HTTP
    /// encoder adds the slash itself.
    pub path: &'a str,
    /// Port override; `None` means 80 or 1883 by mode.
    #[serde(default)]
    pub port: Option<u16>,
    /// HTTP method token, all caps, not validated against a fixed set.
    /// Anything other than `GET` carries the payload as a body.
    #[serde(default = "default_method")]
    pub method: &'a str,
    /// Raw, pre-formatted extra HTTP header lines, appended verbatim.
    /// No trailing newline. The encoder already emits `Host` and
    /// `Content-Length`.
    #[serde(default)]
    pub headers: &'a str,
    /// Maximum number of 1 ms waits for the first response byte.
    #[serde(default = "default_reply_wait")]
    pub reply_wait: u16,
    /// Tear the HTTP connection down on the first idle read gap. See
    /// [`ReadPolicy::close_on_idle`] for the trade-off.
    #[serde(default = "default_close_on_idle")]
    pub close_on_idle: bool,
    /// MQTT client identifier; `None` falls back to the device identifier
    /// handed to the MQTT variant at construction.
    #[serde(default)]
    pub client_id: Option<&'a str>,
    /// MQTT username. Mandatory in MQTT mode.
    #[serde(default)]
    pub username: Option<&'a str>,
    /// MQTT password. Mandatory in MQTT mode.
    #[serde(default)]
    pub password: Option<&'a str>,
}

fn default_method() -> &'static str {
    "GET"
}

fn default_reply_wait() -> u16 {
    DEFAULT_REPLY_WAIT
}

fn default_close_on_idle() -> bool {
    true
}

impl<'a> Config<'a> {
    /// An HTTP config for `url`/`path` with every default: port 80, `GET`,
    /// no extra headers, 100 ms reply wait, close on idle.
    pub fn http(url: &'a str, path: &'a str) -> Self {
        Self {
            mode: Mode::Http,
            url,
            path,
            port: None,
            method: "GET",
            headers: "",
            reply_wait: DEFAULT_REPLY_WAIT,
            close_on_idle: true,
            client_id: None,
            username: None,
            password: None,
        }
    }

    /// An MQTT config publishing to `topic` on `url` with the given
    /// credentials and port 1883.
    pub fn mqtt(url: &'a str, topic: &'a str, username: &'a str, password: &'a str) -> Self {
        Self {
            mode: Mode::Mqtt,
            url,
            path: topic,
            port: None,
            method: "GET",
            headers: "",
            reply_wait: DEFAULT_REPLY_WAIT,
            close_on_idle: true,
            client_id: None,
            username: Some(username),
            password: Some(password),
        }
    }

    /// Parse a config out of a JSON buffer, borrowing the string fields.
    ///
    /// Expects the field names of this struct; missing optional fields take
    /// their defaults. Fails with [`Error::InvalidConfig`] on malformed JSON
    /// or when [`validate`](Config::validate) rejects the result.
    pub fn from_json(json: &'a [u8]) -> Result<Self, Error> {
        let (config, _remainder) =
            serde_json_core::from_slice::<Config<'a>>(json).map_err(|_| Error::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation: a host must be present, and MQTT mode must
    /// additionally carry a topic and full credentials.
    pub fn validate(&self) -> Result<(), Error> {
        if self.url.is_empty() {
            return Err(Error::InvalidConfig);
        }
        if self.mode == Mode::Mqtt
            && (self.path.is_empty() || self.username.is_none() || self.password.is_none())
        {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// The configured port, or the mode's default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(match self.mode {
            Mode::Http => DEFAULT_HTTP_PORT,
            Mode::Mqtt => DEFAULT_MQTT_PORT,
        })
    }

    /// The read policy the HTTP response reader should run under.
    pub fn read_policy(&self) -> ReadPolicy {
        ReadPolicy {
            reply_wait: self.reply_wait,
            close_on_idle: self.close_on_idle,
        }
    }

    /// Broker options for the built-in MQTT client, derived from this config.
    pub fn broker_options(&self) -> mqtt::Options<'a> {
        let mut options = mqtt::Options::new(self.url, self.effective_port());
        options.reply_wait = self.reply_wait;
        options
    }
}
