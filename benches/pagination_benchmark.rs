// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use course_portal::pagination::{Page, Pagination};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn benchmark_pagination(c: &mut Criterion) {
    let items: Vec<u64> = (0..10_000).collect();

    let mut group = c.benchmark_group("pagination");

    group.bench_function("window_middle_of_large_list", |b| {
        let pagination = Pagination::new(black_box(1_000_000), 20, 25_000);
        b.iter(|| pagination.window(black_box(2)))
    });

    group.bench_function("page_from_slice", |b| {
        b.iter(|| Page::from_slice(black_box(&items), 100, black_box(42)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_pagination);
criterion_main!(benches);
