//! Criterion benchmarks for channel reads and writes
//!
//! Run with: cargo bench

use chardev_channels::{ChannelAccess, ChannelConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn access() -> ChannelAccess {
    ChannelAccess::with_config(&ChannelConfig::default()).unwrap()
}

fn bench_read_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel");
    group.throughput(Throughput::Elements(1));

    group.bench_function("write_full", |b| {
        let access = access();
        let data = [b'x'; 255];
        b.iter(|| access.write_channel(0, black_box(&data)).unwrap());
    });

    group.bench_function("read_full", |b| {
        let access = access();
        access.write_channel(0, &[b'x'; 255]).unwrap();
        let h = access.open(0).unwrap();
        let mut buf = [0u8; 255];
        b.iter(|| access.read(h, black_box(&mut buf)).unwrap());
    });

    group.bench_function("read_partial", |b| {
        let access = access();
        access.write_channel(0, b"Hello World").unwrap();
        let h = access.open(0).unwrap();
        let mut buf = [0u8; 3];
        b.iter(|| access.read(h, black_box(&mut buf)).unwrap());
    });

    group.bench_function("open_close", |b| {
        let access = access();
        b.iter(|| {
            let h = access.open(black_box(1)).unwrap();
            access.close(h).unwrap();
        });
    });

    group.finish();
}

fn bench_many_handles(c: &mut Criterion) {
    let mut group = c.benchmark_group("handles");

    for count in [1usize, 64, 1024].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_function(format!("read_each_{}", count), |b| {
            let access = access();
            access.write_channel(2, &[b'y'; 128]).unwrap();
            let handles: Vec<_> = (0..*count).map(|_| access.open(2).unwrap()).collect();
            let mut buf = [0u8; 16];
            b.iter(|| {
                for &h in &handles {
                    black_box(access.read(h, &mut buf).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_write, bench_many_handles);
criterion_main!(benches);
