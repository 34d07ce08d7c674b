use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use matching_engine::MatchingEngine;
use types::order::OrderParams;

fn params(client_id: u64, cl_ord_id: u64, side: u8, price: i64, qty: i64, tif: u8) -> OrderParams {
    OrderParams {
        client_id,
        cl_ord_id,
        side,
        price,
        qty,
        tif,
    }
}

// Helper: rest `count` GTC orders laddered across a price range
fn rest_ladder(engine: &mut MatchingEngine, side: u8, start_id: u64, count: u64, price_start: i64, price_span: i64) {
    for i in 0..count {
        let price = price_start + (i as i64 % price_span);
        engine.submit(params(1, start_id + i, side, price, 10, 0));
    }
}

// Benchmark 1: resting insert throughput
fn bench_rest(c: &mut Criterion) {
    let mut group = c.benchmark_group("rest");

    group.bench_function("rest_into_empty_book", |b| {
        b.iter(|| {
            let mut engine = MatchingEngine::new();
            rest_ladder(&mut engine, 0, 0, 10_000, 90, 20);
            black_box(engine);
        });
    });

    group.bench_function("rest_into_warm_book", |b| {
        let mut warm = MatchingEngine::new();
        rest_ladder(&mut warm, 0, 0, 10_000, 90, 20);
        b.iter(|| {
            let mut engine = warm.clone();
            rest_ladder(&mut engine, 0, 10_000, 1_000, 90, 20);
            black_box(&engine);
        });
    });

    group.finish();
}

// Benchmark 2: crossing throughput through a laddered book
fn bench_cross(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross");

    group.bench_function("ioc_sweep_through_asks", |b| {
        let mut warm = MatchingEngine::new();
        rest_ladder(&mut warm, 1, 0, 10_000, 100, 20);
        b.iter(|| {
            let mut engine = warm.clone();
            for i in 0..1_000u64 {
                engine.submit(params(2, 100_000 + i, 0, 125, 50, 1));
            }
            black_box(&engine);
        });
    });

    group.finish();
}

// Benchmark 3: cancel through the key index
fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel");

    group.bench_function("cancel_resting_orders", |b| {
        let mut warm = MatchingEngine::new();
        rest_ladder(&mut warm, 0, 0, 10_000, 90, 20);
        b.iter(|| {
            let mut engine = warm.clone();
            for i in 0..1_000u64 {
                engine.cancel(1, i);
            }
            black_box(&engine);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rest, bench_cross, bench_cancel);
criterion_main!(benches);
