//! Domain types for smclab

pub mod candle;
pub mod structure;
pub mod zones;

pub use candle::{validate_series, Candle};
pub use structure::{Direction, Pivot, PivotKind, StructureEvent, StructureKind, TrendState};
pub use zones::{EqualLevel, FairValueGap, OrderBlock};

/// Build a candle path from closes for tests.
///
/// open = previous close (or close for the first candle). Wicks extend 0.5 in
/// the direction of the candle and 0.2 against it, so turning points are strict
/// extremes. `time` advances 60 per candle.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let (high, low) = if close >= open {
                (close + 0.5, open - 0.2)
            } else {
                (open + 0.2, close - 0.5)
            };
            Candle::new(i as i64 * 60, open, high, low, close)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
