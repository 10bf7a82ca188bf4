//! Benchmarks for the normalization pipeline hot path.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use subrefine::aggregator::{dedupe, sorted_full, tail};
use subrefine::config::SchemeSet;
use subrefine::decoder::decode_payload;
use subrefine::parser::extract_entries;

/// Generate a plain-text feed with duplicates, comments and mixed schemes
fn generate_feed(count: usize) -> String {
    (0..count)
        .map(|i| match i % 7 {
            0 => format!("vless://user{}@host{}.example:443?type=ws#n{}\n", i, i % 97, i),
            1 => format!("VMESS://eyJ2IjoiMiIsImlkIjoi{}In0\n", i % 53),
            2 => format!("ss://YWVzLTI1Ni1nY206cGFzcw@host{}:8388#tag{}\n", i % 31, i),
            3 => "# comment line\n".to_string(),
            4 => format!("trojan://dropped{}@host:443\n", i),
            5 => String::from("\n"),
            _ => format!("ss://YWVzLTI1Ni1nY206cGFzcw@host{}:8388#tag{}\n", i % 31, i % 11),
        })
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let schemes = SchemeSet::default();
    let mut group = c.benchmark_group("extract");

    for size in [100, 1_000, 10_000] {
        let feed = generate_feed(size);
        group.bench_with_input(BenchmarkId::new("plain_feed", size), &feed, |b, feed| {
            b.iter(|| black_box(extract_entries(feed, &schemes)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let schemes = SchemeSet::default();
    let mut group = c.benchmark_group("normalize");

    for size in [1_000, 10_000] {
        let feed = generate_feed(size);
        group.bench_with_input(BenchmarkId::new("full_pipeline", size), &feed, |b, feed| {
            b.iter(|| {
                let normal = dedupe(extract_entries(feed, &schemes));
                let sorted = sorted_full(&normal);
                let recent = tail(&normal, 100);
                black_box((sorted, recent))
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let schemes = SchemeSet::default();
    let mut group = c.benchmark_group("decode");

    for size in [1_000, 10_000] {
        let encoded = STANDARD.encode(generate_feed(size));
        group.bench_with_input(
            BenchmarkId::new("whole_payload", size),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(decode_payload(encoded.as_bytes(), &schemes)).len());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_normalize, bench_decode);
criterion_main!(benches);
