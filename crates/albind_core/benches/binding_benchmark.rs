//! Binding benchmarks
//!
//! Measures the paths that run on every diagnostics query and teardown.

use albind_core::{BindingTable, DeviceList, Symbol};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn device_buffer(count: usize) -> Vec<u8> {
    let mut buffer = Vec::new();
    for i in 0..count {
        buffer.extend_from_slice(format!("OpenAL Soft on Output Device {}", i).as_bytes());
        buffer.push(0);
    }
    buffer.push(0);
    buffer
}

fn benchmark_device_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("device_list");

    // Typical desktops expose a handful of outputs; docks and HDMI add more
    for count in [1, 4, 16, 64].iter() {
        let buffer = device_buffer(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_function(format!("parse_{}_devices", count), |b| {
            b.iter(|| DeviceList::from_bytes(black_box(&buffer)).count())
        });
    }

    group.finish();
}

fn benchmark_table_reset(c: &mut Criterion) {
    c.bench_function("table_reset_all", |b| {
        let mut table = BindingTable::new();
        b.iter(|| {
            table.reset_all();
            black_box(table.is_bound(Symbol::AlcOpenDevice))
        })
    });
}

criterion_group!(benches, benchmark_device_list, benchmark_table_reset);
criterion_main!(benches);
