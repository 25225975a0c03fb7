mod common;

use common::{CountingDelay, MockTransport, ScriptedBroker};
use unireq::network::error::Error;
use unireq::request::{Config, HttpRequestClient, Mode, MqttRequestClient, RequestClient};

fn drive(client: &mut impl RequestClient, payload: &[u8]) -> bool {
    client.setup();
    client.maintain();
    client.send(payload)
}

#[test]
fn one_call_site_drives_both_variants() {
    let http_config = Config::http("example.com", "ingest");
    let (transport, _state) = MockTransport::with_response(b"HTTP/1.1 200 OK\n");
    let (delay, _log) = CountingDelay::new();
    let mut http_client = HttpRequestClient::new(&http_config, transport, delay).unwrap();
    assert!(drive(&mut http_client, b"[data]"));

    let mqtt_config = Config::mqtt("broker.local", "esp32/test", "user", "pass");
    let (broker, _broker_state) = ScriptedBroker::new(0);
    let (delay, _log) = CountingDelay::new();
    let mut mqtt_client = MqttRequestClient::new(&mqtt_config, broker, delay, "a1b2c3").unwrap();
    assert!(drive(&mut mqtt_client, b"[data]"));
}

#[test]
fn config_from_json_with_defaults() {
    let json = br#"{"mode":"http","url":"example.com","path":"post","method":"POST","reply_wait":250}"#;
    let config = Config::from_json(json).unwrap();

    assert_eq!(config.mode, Mode::Http);
    assert_eq!(config.url, "example.com");
    assert_eq!(config.path, "post");
    assert_eq!(config.method, "POST");
    assert_eq!(config.reply_wait, 250);
    assert_eq!(config.headers, "");
    assert_eq!(config.effective_port(), 80);
    assert!(config.close_on_idle);
    assert_eq!(config.client_id, None);
}

#[test]
fn config_from_json_mqtt_with_port_override() {
    let json = br#"{"mode":"mqtt","url":"broker.local","path":"t/1","port":8883,"username":"u","password":"p"}"#;
    let config = Config::from_json(json).unwrap();

    assert_eq!(config.mode, Mode::Mqtt);
    assert_eq!(config.effective_port(), 8883);
    assert_eq!(config.username, Some("u"));
    assert_eq!(config.password, Some("p"));
}

#[test]
fn mqtt_port_defaults_when_unset() {
    let config = Config::mqtt("broker.local", "t", "u", "p");
    assert_eq!(config.effective_port(), 1883);
}

#[test]
fn config_from_json_rejects_missing_credentials() {
    let json = br#"{"mode":"mqtt","url":"broker.local","path":"t/1","username":"u"}"#;
    assert_eq!(Config::from_json(json), Err(Error::InvalidConfig));
}

#[test]
fn config_from_json_rejects_malformed_input() {
    assert_eq!(Config::from_json(b"{not json"), Err(Error::InvalidConfig));
    assert_eq!(Config::from_json(br#"{"mode":"ftp"}"#), Err(Error::InvalidConfig));
}

#[test]
fn empty_host_is_rejected_at_construction() {
    let config = Config::http("", "path");
    let (transport, _state) = MockTransport::new();
    let (delay, _log) = CountingDelay::new();
    assert!(matches!(
        HttpRequestClient::new(&config, transport, delay),
        Err(Error::InvalidConfig)
    ));
}

#[test]
fn http_config_is_rejected_by_the_mqtt_variant() {
    let config = Config::http("example.com", "path");
    let (broker, _broker_state) = ScriptedBroker::new(0);
    let (delay, _log) = CountingDelay::new();
    assert!(matches!(
        MqttRequestClient::new(&config, broker, delay, "a1b2c3"),
        Err(Error::InvalidConfig)
    ));
}

#[test]
fn mqtt_topic_is_mandatory() {
    let config = Config::mqtt("broker.local", "", "u", "p");
    assert_eq!(config.validate(), Err(Error::InvalidConfig));
}
