use crate::network::error::Error;
use crate::network::{ConnectionState, Delay, PubSub};
use crate::request::{Config, Mode, RequestClient};

/// Fixed delay between broker connect attempts, in milliseconds.
const RETRY_DELAY_MS: u32 = 1000;

/// The MQTT variant of the request client.
///
/// A thin state machine over a [`PubSub`] broker client: `setup` drives
/// `Disconnected -> Connecting -> Connected` and does not come back until the
/// session is up, retrying forever with a fixed delay; on an unattended
/// device there is no one to report a nicer error to, so it waits for the
/// broker instead. `send` is a single publish with no local retry.
#[derive(Debug)]
pub struct MqttRequestClient<'a, P: PubSub, D: Delay> {
    config: &'a Config<'a>,
    broker: P,
    delay: D,
    device_id: &'a str,
}

impl<'a, P: PubSub, D: Delay> MqttRequestClient<'a, P, D> {
    /// Bind a validated MQTT config to a broker client.
    ///
    /// `device_id` is the hardware-derived identifier (typically the MAC
    /// string the network layer knows) used as the MQTT client id when the
    /// config does not name one.
    pub fn new(
        config: &'a Config<'a>,
        broker: P,
        delay: D,
        device_id: &'a str,
    ) -> Result<Self, Error> {
        config.validate()?;
        if config.mode != Mode::Mqtt {
            return Err(Error::InvalidConfig);
        }
        Ok(Self {
            config,
            broker,
            delay,
            device_id,
        })
    }

    /// The client id in effect: the configured one, or the device identifier.
    pub fn client_id(&self) -> &'a str {
        self.config.client_id.unwrap_or(self.device_id)
    }

    fn connect_until_ready(&mut self) {
        while self.broker.state() != ConnectionState::Connected {
            let accepted = self.broker.connect(
                self.client_id(),
                self.config.username,
                self.config.password,
            );
            if accepted {
                #[cfg(feature = "defmt")]
                defmt::debug!("broker connected");
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!("broker connect failed, retrying");
                self.delay.delay_ms(RETRY_DELAY_MS);
            }
        }
    }
}

impl<'a, P: PubSub, D: Delay> RequestClient for MqttRequestClient<'a, P, D> {
    /// Block until the broker accepts the session; one fixed delay after
    /// every failed attempt, no attempt limit.
    fn setup(&mut self) {
        self.connect_until_ready();
    }

    /// Re-establish the session if it dropped, then service the protocol.
    fn maintain(&mut self) {
        self.connect_until_ready();
        self.broker.process();
    }

    /// Publish the payload to the configured topic. The result is the broker
    /// client's own verdict; nothing is retried here.
    fn send(&mut self, payload: &[u8]) -> bool {
        let delivered = self.broker.publish(self.config.path, payload);
        #[cfg(feature = "defmt")]
        if delivered {
            defmt::debug!(
                "sent {=usize} bytes to {=str} on {=str}",
                payload.len(),
                self.config.path,
                self.config.url
            );
        }
        delivered
    }
}
