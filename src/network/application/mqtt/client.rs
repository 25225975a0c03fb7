//! A publish-only MQTT client based on the MQTT 3.1.1 specification.
use crate::network::error::Error;
use crate::network::{ConnectionState, Delay, PubSub, Transport};
use heapless::Vec;

// MQTT Control Packet types
const CONNECT: u8 = 0x10;
const CONNACK: u8 = 0x20;
const PUBLISH: u8 = 0x30;
const PINGREQ: u8 = 0xC0;
const DISCONNECT: u8 = 0xE0;

// Protocol constants
const PROTOCOL_NAME: &[u8] = b"MQTT";
const PROTOCOL_LEVEL: u8 = 4; // MQTT 3.1.1

// CONNECT flag bits
const FLAG_CLEAN_SESSION: u8 = 0x02;
const FLAG_PASSWORD: u8 = 0x40;
const FLAG_USERNAME: u8 = 0x80;

/// Options for configuring the MQTT session.
#[derive(Debug, Clone)]
pub struct Options<'a> {
    /// Broker host name or address.
    pub host: &'a str,
    /// Broker port.
    pub port: u16,
    /// The keep-alive interval announced to the broker, in seconds.
    pub keep_alive_seconds: u16,
    /// Whether to start a clean session.
    pub clean_session: bool,
    /// Number of [`Client::process`] calls between keepalive pings, `0` to
    /// disable pinging. The crate has no clock capability, so the cadence is
    /// counted in service calls; tune it to the host loop period so pings
    /// land inside `keep_alive_seconds`.
    pub ping_after: u32,
    /// Maximum number of 1 ms sleeps to wait for each expected byte of a
    /// broker reply (the CONNACK, remaining-length bytes, drained packets).
    pub reply_wait: u16,
}

impl<'a> Options<'a> {
    /// Options for `host:port` with the defaults a telemetry device wants:
    /// 60 s keep-alive, clean session, a ping every 100 service calls and a
    /// 100 ms per-byte reply wait.
    pub fn new(host: &'a str, port: u16) -> Self {
        Self {
            host,
            port,
            keep_alive_seconds: 60,
            clean_session: true,
            ping_after: 100,
            reply_wait: 100,
        }
    }
}

/// A publish-only MQTT 3.1.1 client over a polling byte stream.
///
/// The client owns its transport and reconnects it on every
/// [`connect`](Client::connect), so a session can be re-established after the
/// broker drops it. Inbound packets are drained and discarded in
/// [`process`](Client::process); a publish-only device has no use for them,
/// but leaving them buffered would eventually stall the stream.
#[derive(Debug)]
pub struct Client<'a, T: Transport, D: Delay> {
    transport: T,
    delay: D,
    options: Options<'a>,
    state: ConnectionState,
    since_ping: u32,
}

impl<'a, T: Transport, D: Delay> Client<'a, T, D> {
    /// Create a disconnected client; call [`connect`](Client::connect) to
    /// establish the session.
    pub fn new(transport: T, delay: D, options: Options<'a>) -> Self {
        Self {
            transport,
            delay,
            options,
            state: ConnectionState::Disconnected,
            since_ping: 0,
        }
    }

    /// Current session state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Establish the session: open the transport, send CONNECT, validate the
    /// CONNACK.
    ///
    /// Credentials are optional; a password without a username is a protocol
    /// error and is rejected before anything is written. On
    /// [`Error::BrokerRefused`] (CONNACK return codes 1-5) the transport is
    /// closed again.
    pub fn connect(
        &mut self,
        client_id: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), Error> {
        if password.is_some() && username.is_none() {
            return Err(Error::ProtocolError);
        }

        self.state = ConnectionState::Connecting;
        if self
            .transport
            .connect(self.options.host, self.options.port)
            .is_err()
        {
            self.state = ConnectionState::Disconnected;
            return Err(Error::ConnectFailed);
        }

        // --- Variable Header ---
        let mut vh: Vec<u8, 10> = Vec::new();
        vh.extend_from_slice(&(PROTOCOL_NAME.len() as u16).to_be_bytes())
            .unwrap();
        vh.extend_from_slice(PROTOCOL_NAME).unwrap();
        vh.push(PROTOCOL_LEVEL).unwrap();

        let mut connect_flags = 0;
        if self.options.clean_session {
            connect_flags |= FLAG_CLEAN_SESSION;
        }
        if username.is_some() {
            connect_flags |= FLAG_USERNAME;
        }
        if password.is_some() {
            connect_flags |= FLAG_PASSWORD;
        }
        vh.push(connect_flags).unwrap();
        vh.extend_from_slice(&self.options.keep_alive_seconds.to_be_bytes())
            .unwrap();

        // --- Payload: client id, then credentials in flag order ---
        let mut payload: Vec<u8, 256> = Vec::new();
        push_utf8_field(&mut payload, client_id)?;
        if let Some(username) = username {
            push_utf8_field(&mut payload, username)?;
        }
        if let Some(password) = password {
            push_utf8_field(&mut payload, password)?;
        }

        let remaining_len = vh.len() + payload.len();

        // --- Fixed Header ---
        let mut fixed_header: Vec<u8, 5> = Vec::new();
        fixed_header.push(CONNECT).unwrap();
        encode_remaining_length(&mut fixed_header, remaining_len)
            .map_err(|_| Error::ProtocolError)?;

        self.write_all(&fixed_header)?;
        self.write_all(&vh)?;
        self.write_all(&payload)?;

        // Wait for and parse CONNACK
        let mut connack = [0u8; 4];
        if let Err(error) = self.read_exact(&mut connack) {
            self.state = ConnectionState::Disconnected;
            self.transport.close();
            return Err(error);
        }

        if connack[0] != CONNACK || connack[1] != 2 {
            self.state = ConnectionState::Disconnected;
            self.transport.close();
            return Err(Error::ProtocolError);
        }

        // Connection acknowledgement status
        match connack[3] {
            0 => {
                self.state = ConnectionState::Connected;
                self.since_ping = 0;
                Ok(())
            }
            1..=5 => {
                self.state = ConnectionState::Disconnected;
                self.transport.close();
                Err(Error::BrokerRefused)
            }
            _ => {
                self.state = ConnectionState::Disconnected;
                self.transport.close();
                Err(Error::ProtocolError)
            }
        }
    }

    /// Publish `payload` to `topic` at QoS 0.
    pub fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Error> {
        if self.state != ConnectionState::Connected {
            return Err(Error::NotOpen);
        }

        let mut packet: Vec<u8, 1024> = Vec::new();

        // --- Variable Header ---
        let topic_bytes = topic.as_bytes();
        packet
            .extend_from_slice(&(topic_bytes.len() as u16).to_be_bytes())
            .map_err(|_| Error::ProtocolError)?;
        packet
            .extend_from_slice(topic_bytes)
            .map_err(|_| Error::ProtocolError)?;

        // --- Payload ---
        packet
            .extend_from_slice(payload)
            .map_err(|_| Error::ProtocolError)?;

        // --- Fixed Header: QoS 0, so no flags and no packet identifier ---
        let mut fixed_header: Vec<u8, 5> = Vec::new();
        fixed_header.push(PUBLISH).unwrap();
        encode_remaining_length(&mut fixed_header, packet.len())
            .map_err(|_| Error::ProtocolError)?;

        self.write_all(&fixed_header)?;
        self.write_all(&packet)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("published {=usize} bytes to {=str}", payload.len(), topic);

        Ok(())
    }

    /// Service the session: drain inbound packets and emit a keepalive ping
    /// on the configured cadence.
    pub fn process(&mut self) -> Result<(), Error> {
        if self.state != ConnectionState::Connected {
            return Err(Error::NotOpen);
        }
        if !self.transport.is_connected() {
            self.state = ConnectionState::Disconnected;
            return Err(Error::ConnectionClosed);
        }

        // Whatever the broker pushed down (PINGRESP, retained junk) is read
        // and discarded; a publish-only client has nobody to hand it to.
        while self.transport.available() > 0 {
            if self.transport.read_byte().is_none() {
                break;
            }
            let remaining = self.read_remaining_length()?;
            self.discard(remaining)?;
        }

        if self.options.ping_after != 0 {
            self.since_ping += 1;
            if self.since_ping >= self.options.ping_after {
                self.since_ping = 0;
                self.write_all(&[PINGREQ, 0x00])?;
            }
        }
        Ok(())
    }

    /// Send DISCONNECT (best effort) and close the transport.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Connected {
            let _ = self.transport.write(&[DISCONNECT, 0x00]);
        }
        self.transport.close();
        self.state = ConnectionState::Disconnected;
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.transport.write(bytes).is_err() {
            self.state = ConnectionState::Disconnected;
            return Err(Error::WriteError);
        }
        Ok(())
    }

    /// Fill `buf` from the polling stream, sleeping 1 ms per missing byte up
    /// to the configured reply wait.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        for slot in buf.iter_mut() {
            let mut waited: u32 = 0;
            loop {
                if self.transport.available() > 0 {
                    if let Some(byte) = self.transport.read_byte() {
                        *slot = byte;
                        break;
                    }
                }
                if !self.transport.is_connected() {
                    return Err(Error::ConnectionClosed);
                }
                self.delay.delay_ms(1);
                waited += 1;
                if waited > u32::from(self.options.reply_wait) {
                    return Err(Error::Timeout);
                }
            }
        }
        Ok(())
    }

    fn read_remaining_length(&mut self) -> Result<usize, Error> {
        let mut value: usize = 0;
        let mut multiplier: usize = 1;
        for _ in 0..4 {
            let mut byte = [0u8; 1];
            self.read_exact(&mut byte)?;
            value += (byte[0] as usize & 127) * multiplier;
            multiplier *= 128;
            if byte[0] & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(Error::ProtocolError)
    }

    fn discard(&mut self, mut remaining: usize) -> Result<(), Error> {
        let mut byte = [0u8; 1];
        while remaining > 0 {
            self.read_exact(&mut byte)?;
            remaining -= 1;
        }
        Ok(())
    }
}

impl<'a, T: Transport, D: Delay> PubSub for Client<'a, T, D> {
    fn connect(
        &mut self,
        client_id: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> bool {
        Client::connect(self, client_id, username, password).is_ok()
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        Client::publish(self, topic, payload).is_ok()
    }

    fn process(&mut self) {
        let _ = Client::process(self);
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}

/// Append a UTF-8 string field: big-endian length prefix, then the bytes.
fn push_utf8_field(buf: &mut Vec<u8, 256>, field: &str) -> Result<(), Error> {
    let bytes = field.as_bytes();
    buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes())
        .map_err(|_| Error::ProtocolError)?;
    buf.extend_from_slice(bytes).map_err(|_| Error::ProtocolError)
}

/// Encode the remaining length field for an MQTT packet.
///
/// Up to 4 bytes, 7 bits of length per byte, the high bit marking that
/// another byte follows.
fn encode_remaining_length(buf: &mut Vec<u8, 5>, mut len: usize) -> Result<(), ()> {
    loop {
        if buf.is_full() {
            return Err(());
        }
        let mut byte = (len % 128) as u8;
        len /= 128;
        if len > 0 {
            byte |= 0x80;
        }
        buf.push(byte).unwrap(); // `is_full` check above ensures this won't panic
        if len == 0 {
            break;
        }
    }
    Ok(())
}
