//! Criterion benchmarks for LotLab hot paths.
//!
//! Benchmarks:
//! 1. Full-tape FIFO matching (many small lots, one giant sell)
//! 2. Position history replay (quadratic prefix matching)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{TimeZone, Utc};
use lotlab_core::domain::{AssetId, Order, OrderId};
use lotlab_core::engine::{invested_value_series, match_orders, position_history};

// ── Helpers ──────────────────────────────────────────────────────────

/// n alternating buys and sells: buy 2, sell 1, buy 2, sell 1, ...
fn make_alternating_tape(n: usize) -> Vec<Order> {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let buy = i % 2 == 0;
            Order {
                id: OrderId::new(format!("o-{i}")),
                asset_id: AssetId::new("BENCH"),
                pieces: if buy { 2.0 } else { -1.0 },
                share_price: 100.0 + (i as f64 * 0.1).sin() * 10.0,
                order_fee: 1.0,
                timestamp: base + chrono::Duration::minutes(i as i64),
            }
        })
        .collect()
}

/// n tiny buy lots followed by one sell draining all of them.
fn make_giant_sell_tape(n: usize) -> Vec<Order> {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let mut orders: Vec<Order> = (0..n)
        .map(|i| Order {
            id: OrderId::new(format!("b-{i}")),
            asset_id: AssetId::new("BENCH"),
            pieces: 1.0,
            share_price: 50.0 + i as f64 * 0.01,
            order_fee: 0.1,
            timestamp: base + chrono::Duration::minutes(i as i64),
        })
        .collect();
    orders.push(Order {
        id: OrderId::new("giant-sell"),
        asset_id: AssetId::new("BENCH"),
        pieces: -(n as f64),
        share_price: 80.0,
        order_fee: 5.0,
        timestamp: base + chrono::Duration::minutes(n as i64),
    });
    orders
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_match_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_orders");
    for size in [100, 1_000, 10_000] {
        let alternating = make_alternating_tape(size);
        group.bench_with_input(
            BenchmarkId::new("alternating", size),
            &alternating,
            |b, tape| b.iter(|| match_orders(black_box(tape)).unwrap()),
        );

        let giant = make_giant_sell_tape(size);
        group.bench_with_input(BenchmarkId::new("giant_sell", size), &giant, |b, tape| {
            b.iter(|| match_orders(black_box(tape)).unwrap())
        });
    }
    group.finish();
}

fn bench_position_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_history");
    for size in [100, 500] {
        let tape = make_alternating_tape(size);
        group.bench_with_input(BenchmarkId::new("alternating", size), &tape, |b, tape| {
            b.iter(|| position_history(black_box(tape)).unwrap())
        });
    }
    group.finish();
}

fn bench_invested_series(c: &mut Criterion) {
    let tape = make_alternating_tape(200);
    let history = position_history(&tape).unwrap();
    c.bench_function("invested_value_series_200", |b| {
        b.iter(|| invested_value_series(black_box(&history)))
    });
}

criterion_group!(
    benches,
    bench_match_orders,
    bench_position_history,
    bench_invested_series
);
criterion_main!(benches);
