use criterion::{Criterion, Throughput};
use rand::Rng;
use std::collections::VecDeque;
use std::hint::black_box;

use unireq::network::application::http::request::{RequestParts, format_request};
use unireq::network::application::http::response::parse_status_line;
use unireq::network::application::mqtt::{Client, Options};
use unireq::network::{Delay, Transport};

fn random_payload(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| rng.sample(rand::distributions::Alphanumeric))
        .collect()
}

pub fn bench_format_request(c: &mut Criterion) {
    let payload = random_payload(256);
    let parts = RequestParts {
        method: "POST",
        host: "example.com",
        path: "ingest",
        extra_headers: "Content-Type: application/json",
    };

    let mut group = c.benchmark_group("format_request");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("post_256b", |b| {
        b.iter(|| format_request(black_box(&parts), black_box(&payload)).unwrap())
    });
    group.finish();
}

pub fn bench_parse_status_line(c: &mut Criterion) {
    let captured = b"HTTP/1.1 404 Not Found\nContent-Type: text/html\n";

    let mut group = c.benchmark_group("parse_status_line");
    group.throughput(Throughput::Bytes(captured.len() as u64));
    group.bench_function("status_line", |b| {
        b.iter(|| parse_status_line(black_box(captured)))
    });
    group.finish();
}

/// An in-memory transport: reads come from a scripted queue, writes vanish.
struct SinkTransport {
    incoming: VecDeque<u8>,
    connected: bool,
}

impl Transport for SinkTransport {
    type Error = ();

    fn connect(&mut self, _host: &str, _port: u16) -> Result<(), Self::Error> {
        self.connected = true;
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn available(&mut self) -> usize {
        self.incoming.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.incoming.pop_front()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn close(&mut self) {
        self.connected = false;
    }
}

struct NoDelay;

impl Delay for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

pub fn bench_publish_encode(c: &mut Criterion) {
    let transport = SinkTransport {
        incoming: VecDeque::from(vec![0x20, 0x02, 0x00, 0x00]), // CONNACK
        connected: false,
    };
    let mut client = Client::new(transport, NoDelay, Options::new("bench.local", 1883));
    client
        .connect("bench-client", None, None)
        .expect("scripted CONNACK");

    let payload = random_payload(256);

    let mut group = c.benchmark_group("publish_encode");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("qos0_256b", |b| {
        b.iter(|| {
            client
                .publish(black_box("bench/topic"), black_box(&payload))
                .unwrap()
        })
    });
    group.finish();
}
