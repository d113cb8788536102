//! Criterion benchmark for the stages of the encode pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scriptpack_core::encode::{escape_tokens, hex_upper, wrap_columns, WRAP_COLUMNS};
use scriptpack_core::header::render_header;

fn bench_encode_stages(c: &mut Criterion) {
    // Roughly the size of the largest bundled tool source.
    let body: Vec<u8> = (0..256 * 1024).map(|i| (i % 251) as u8).collect();

    c.bench_function("hex_upper 256KiB", |b| {
        b.iter(|| hex_upper(black_box(&body)))
    });

    let hex = hex_upper(&body);
    c.bench_function("escape_tokens 256KiB", |b| {
        b.iter(|| escape_tokens(black_box(&hex)))
    });

    let tokens = escape_tokens(&hex);
    c.bench_function("wrap_columns 256KiB", |b| {
        b.iter(|| wrap_columns(black_box(&tokens), WRAP_COLUMNS))
    });

    c.bench_function("render_header 256KiB", |b| {
        b.iter(|| render_header("bench_script", black_box(&body)))
    });
}

criterion_group!(benches, bench_encode_stages);
criterion_main!(benches);
