use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use schema_view::{
    ArrayView, Buffer, Endian, RecordView, Schema, ViewOptions, float32, float64, reserved,
    uint16, uint32, utf8,
};

fn particle() -> Schema {
    Schema::new([
        ("id", uint32(Endian::Little)),
        ("flags", uint16(Endian::Little)),
        ("pad", reserved(2)),
        ("x", float64(Endian::Little)),
        ("y", float64(Endian::Little)),
        ("mass", float32(Endian::Little)),
        ("name", utf8(12)),
    ])
    .unwrap()
}

fn bench_record_access(c: &mut Criterion) {
    let schema = particle();
    let buffer = Buffer::new(schema.size());
    let record = RecordView::at(&buffer, &schema, 0).unwrap();

    let mut group = c.benchmark_group("record");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_scalar", |b| {
        b.iter(|| black_box(record.get(black_box("x")).unwrap()))
    });

    group.bench_function("set_scalar", |b| {
        let mut i = 0u32;
        b.iter(|| {
            record.set(black_box("id"), black_box(i)).unwrap();
            i = i.wrapping_add(1);
        })
    });

    group.bench_function("set_string", |b| {
        b.iter(|| record.set(black_box("name"), black_box("particle")).unwrap())
    });

    group.bench_function("to_value", |b| {
        b.iter(|| black_box(record.to_value().unwrap()))
    });

    group.finish();
}

fn bench_array_access(c: &mut Criterion) {
    let schema = particle();
    let buffer = Buffer::new(schema.size() * 4096);

    let mut group = c.benchmark_group("array");

    group.bench_function("construct", |b| {
        b.iter(|| black_box(ArrayView::new(&buffer, &schema, ViewOptions::default()).unwrap()))
    });

    let array = ArrayView::new(&buffer, &schema, ViewOptions::default()).unwrap();
    group.throughput(Throughput::Elements(array.len() as u64));

    group.bench_function("sum_cached", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for element in &array {
                sum += element.get("mass").unwrap().as_f64().unwrap();
            }
            black_box(sum)
        })
    });

    group.bench_function("sum_fresh", |b| {
        b.iter(|| {
            let fresh = ArrayView::new(&buffer, &schema, ViewOptions::default()).unwrap();
            let mut sum = 0.0;
            for element in &fresh {
                sum += element.get("mass").unwrap().as_f64().unwrap();
            }
            black_box(sum)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_record_access, bench_array_access);
criterion_main!(benches);
