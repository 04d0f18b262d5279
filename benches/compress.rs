use chunkflate::{CompressionLevel, Engine, EngineConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

fn sample_data(len: usize) -> Vec<u8> {
    // Mildly compressible: repeating text with a rolling counter mixed in
    let text = b"Hello, GD! Compressing image... ";
    (0..len)
        .map(|i| text[i % text.len()] ^ ((i / 4096) as u8))
        .collect()
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let data = sample_data(1024 * 1024);
    let mut group = c.benchmark_group("compress_chunk_size");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk_size in [1024usize, 16 * 1024, 64 * 1024] {
        let engine = Engine::new(EngineConfig::default().with_chunk_size(chunk_size));
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::with_capacity(data.len() / 2);
                engine.compress(Cursor::new(black_box(data)), &mut out).unwrap();
                out
            })
        });
    }
    group.finish();
}

fn bench_levels(c: &mut Criterion) {
    let data = sample_data(256 * 1024);
    let mut group = c.benchmark_group("compress_level");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for (name, level) in [
        ("fast", CompressionLevel::Fast),
        ("default", CompressionLevel::Default),
        ("best", CompressionLevel::Best),
    ] {
        let engine = Engine::new(EngineConfig::default().with_level(level));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::new();
                engine.compress(Cursor::new(black_box(data)), &mut out).unwrap();
                out
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chunk_sizes, bench_levels);
criterion_main!(benches);
