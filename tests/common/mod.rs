//! Shared test doubles for the capability traits.
//!
//! The mocks hand out a second `Rc` to their interior state so a test can
//! inspect written bytes, connect/close counts and broker interactions after
//! the client under test has taken ownership of the mock.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use unireq::network::{ConnectionState, Delay, PubSub, Transport};

#[derive(Default)]
pub struct TransportState {
    pub incoming: VecDeque<u8>,
    pub written: Vec<u8>,
    pub connected: bool,
    pub accept_connect: bool,
    /// Report the stream as closed once every scripted byte has been read,
    /// simulating a server that closes after its response.
    pub peer_closes_when_drained: bool,
    pub connect_calls: usize,
    pub close_calls: usize,
}

/// A scripted in-memory transport.
#[derive(Clone)]
pub struct MockTransport {
    state: Rc<RefCell<TransportState>>,
}

impl MockTransport {
    pub fn new() -> (Self, Rc<RefCell<TransportState>>) {
        let state = Rc::new(RefCell::new(TransportState {
            accept_connect: true,
            ..TransportState::default()
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }

    pub fn with_response(response: &[u8]) -> (Self, Rc<RefCell<TransportState>>) {
        let (transport, state) = Self::new();
        state.borrow_mut().incoming.extend(response.iter().copied());
        (transport, state)
    }

    pub fn refusing() -> (Self, Rc<RefCell<TransportState>>) {
        let (transport, state) = Self::new();
        state.borrow_mut().accept_connect = false;
        (transport, state)
    }
}

impl Transport for MockTransport {
    type Error = ();

    fn connect(&mut self, _host: &str, _port: u16) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.connect_calls += 1;
        if state.accept_connect {
            state.connected = true;
            Ok(())
        } else {
            Err(())
        }
    }

    fn is_connected(&mut self) -> bool {
        let state = self.state.borrow();
        state.connected && !(state.peer_closes_when_drained && state.incoming.is_empty())
    }

    fn available(&mut self) -> usize {
        self.state.borrow().incoming.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.state.borrow_mut().incoming.pop_front()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut state = self.state.borrow_mut();
        if !state.connected {
            return Err(());
        }
        state.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.connected = false;
        state.close_calls += 1;
    }
}

/// A delay that only records what it was asked to sleep.
#[derive(Clone)]
pub struct CountingDelay {
    log: Rc<RefCell<Vec<u32>>>,
}

impl CountingDelay {
    pub fn new() -> (Self, Rc<RefCell<Vec<u32>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl Delay for CountingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(ms);
    }
}

pub struct BrokerState {
    pub connect_failures_remaining: usize,
    pub connect_attempts: usize,
    pub last_client_id: Option<String>,
    pub last_username: Option<String>,
    pub last_password: Option<String>,
    pub published: Vec<(String, Vec<u8>)>,
    pub process_calls: usize,
    pub publish_ok: bool,
    pub state: ConnectionState,
}

/// A scripted broker client: fails the first `connect_failures` attempts,
/// then connects; records everything.
#[derive(Clone)]
pub struct ScriptedBroker {
    state: Rc<RefCell<BrokerState>>,
}

impl ScriptedBroker {
    pub fn new(connect_failures: usize) -> (Self, Rc<RefCell<BrokerState>>) {
        let state = Rc::new(RefCell::new(BrokerState {
            connect_failures_remaining: connect_failures,
            connect_attempts: 0,
            last_client_id: None,
            last_username: None,
            last_password: None,
            published: Vec::new(),
            process_calls: 0,
            publish_ok: true,
            state: ConnectionState::Disconnected,
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl PubSub for ScriptedBroker {
    fn connect(
        &mut self,
        client_id: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> bool {
        let mut state = self.state.borrow_mut();
        state.connect_attempts += 1;
        state.last_client_id = Some(client_id.to_string());
        state.last_username = username.map(str::to_string);
        state.last_password = password.map(str::to_string);
        if state.connect_failures_remaining > 0 {
            state.connect_failures_remaining -= 1;
            state.state = ConnectionState::Disconnected;
            false
        } else {
            state.state = ConnectionState::Connected;
            true
        }
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        let mut state = self.state.borrow_mut();
        state.published.push((topic.to_string(), payload.to_vec()));
        state.publish_ok
    }

    fn process(&mut self) {
        self.state.borrow_mut().process_calls += 1;
    }

    fn state(&self) -> ConnectionState {
        self.state.borrow().state
    }
}
