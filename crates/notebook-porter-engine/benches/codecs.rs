use criterion::{Criterion, criterion_group, criterion_main};
use notebook_porter_engine::{
    Orientation, TableOptions, convert_source, parse_document, render_document,
};
use std::hint::black_box;
mod common;

fn bench_block_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_document");

    let content = common::generate_notebook_content(100);
    group.bench_function("parse", |b| {
        b.iter(|| parse_document(black_box(&content), Some("bench")))
    });

    let document = parse_document(&content, Some("bench")).unwrap();
    group.bench_function("render", |b| b.iter(|| render_document(black_box(&document))));

    group.finish();
}

fn bench_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabular");

    let content = common::generate_csv_content(1_000);
    for orientation in [Orientation::Row, Orientation::Column] {
        let options = TableOptions {
            orientation,
            ..TableOptions::default()
        };
        group.bench_function(format!("convert_{orientation:?}"), |b| {
            b.iter(|| convert_source("bench.csv", black_box(&content), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_document, bench_tabular);
criterion_main!(benches);
