//! Criterion benchmarks for the analysis pipeline.
//!
//! Benchmarks:
//! 1. Full `analyze` over growing inputs
//! 2. `analyze_parallel` against the same inputs
//! 3. Individual stages: ATR, pivots, fair value gaps

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use smclab_core::indicators::AverageTrueRange;
use smclab_core::structure::detect_pivots;
use smclab_core::zones::detect_fair_value_gaps;
use smclab_core::{analyze, analyze_parallel, Candle, DetectorConfig};

// ── Helpers ──────────────────────────────────────────────────────────

/// Oscillating trend with alternating candle colours, so every stage has work.
fn make_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + (t * 0.07).sin() * 12.0 + (t * 0.31).sin() * 3.0 + t * 0.01;
            let open = if i % 2 == 0 { close - 0.8 } else { close + 0.8 };
            let high = open.max(close) + 0.6;
            let low = open.min(close) - 0.6;
            Candle::new(i as i64 * 60, open, high, low, close)
        })
        .collect()
}

// ── 1. Full pipeline ─────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let mut group = c.benchmark_group("analyze");
    for n in [500, 2_000, 10_000] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| analyze(black_box(candles), black_box(&config)))
        });
    }
    group.finish();
}

// ── 2. Parallel pipeline ─────────────────────────────────────────────

fn bench_analyze_parallel(c: &mut Criterion) {
    let config = DetectorConfig {
        track_gap_fills: true,
        ..DetectorConfig::default()
    };
    let mut group = c.benchmark_group("analyze_parallel");
    for n in [2_000, 10_000] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::new("sequential", n), &candles, |b, candles| {
            b.iter(|| analyze(black_box(candles), black_box(&config)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &candles, |b, candles| {
            b.iter(|| analyze_parallel(black_box(candles), black_box(&config)))
        });
    }
    group.finish();
}

// ── 3. Stages ────────────────────────────────────────────────────────

fn bench_stages(c: &mut Criterion) {
    let candles = make_candles(10_000);
    let atr = AverageTrueRange::new(14).compute(&candles);

    c.bench_function("atr_14_10k", |b| {
        let indicator = AverageTrueRange::new(14);
        b.iter(|| indicator.compute(black_box(&candles)))
    });
    c.bench_function("pivots_5_10k", |b| {
        b.iter(|| detect_pivots(black_box(&candles), 5))
    });
    c.bench_function("fvg_10k", |b| {
        b.iter(|| detect_fair_value_gaps(black_box(&candles), &atr, 0.5))
    });
}

criterion_group!(benches, bench_analyze, bench_analyze_parallel, bench_stages);
criterion_main!(benches);
