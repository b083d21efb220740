use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use rust_data_cleaning::export::{write_csv_to_writer, WriteOptions};
use rust_data_cleaning::ingestion::{load_csv_from_reader, LoadOptions};

fn synthetic_csv(rows: usize) -> Vec<u8> {
    let mut out = String::with_capacity(rows * 32);
    for i in 0..rows {
        match i % 10 {
            3 => out.push_str("5.1,hello,1.4,0.2,setosa\n"),
            7 => out.push_str("5.1,3.5,1.4,0.2,\n"),
            _ => out.push_str(&format!("{}.{},3.5,1.4,0.{},virginica\n", i % 8, i % 10, i % 3)),
        }
    }
    out.into_bytes()
}

fn bench_cleaning(c: &mut Criterion) {
    let input = synthetic_csv(100_000);
    let mut group = c.benchmark_group("cleaning");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("load_100k", |b| {
        b.iter(|| load_csv_from_reader(black_box(input.as_slice()), &LoadOptions::default()).unwrap())
    });

    let report = load_csv_from_reader(input.as_slice(), &LoadOptions::default()).unwrap();
    group.bench_function("write_80k", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(input.len());
            write_csv_to_writer(&mut out, black_box(&report.records), &WriteOptions::default()).unwrap();
            out
        })
    });

    group.finish();
}

criterion_group!(benches, bench_cleaning);
criterion_main!(benches);
