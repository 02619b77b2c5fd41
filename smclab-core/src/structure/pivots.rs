//! Swing pivot detection.
//!
//! A candle at `i` is a pivot high when its high is strictly above every other
//! high in `[i - length, i + length]`, and a pivot low when its low is strictly
//! below every other low in that window. Equal extremes inside the window
//! disqualify the candidate, so plateaus never produce a pivot.

use crate::domain::{Candle, Pivot, PivotKind};

/// Find swing pivots with a symmetric confirmation window of `length` candles.
///
/// Only indices in `[length, n - length)` are candidates. An outside candle
/// that is both the window's highest high and lowest low yields a `High`
/// pivot followed by a `Low` pivot at the same index.
pub fn detect_pivots(candles: &[Candle], length: usize) -> Vec<Pivot> {
    let n = candles.len();
    let mut pivots = Vec::new();
    if length == 0 || n < 2 * length + 1 {
        return pivots;
    }

    for i in length..(n - length) {
        let window = &candles[i - length..=i + length];
        let current = &candles[i];
        let others = || {
            window
                .iter()
                .enumerate()
                .filter(move |(j, _)| *j != length)
                .map(|(_, c)| c)
        };

        if others().all(|c| c.high < current.high) {
            pivots.push(Pivot {
                index: i,
                kind: PivotKind::High,
                price: current.high,
            });
        }
        if others().all(|c| c.low > current.low) {
            pivots.push(Pivot {
                index: i,
                kind: PivotKind::Low,
                price: current.low,
            });
        }
    }

    pivots
}
