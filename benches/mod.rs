use criterion::{criterion_group, criterion_main};

mod request;

criterion_group!(
    benches,
    request::bench_format_request,
    request::bench_parse_status_line,
    request::bench_publish_encode
);
criterion_main!(benches);
