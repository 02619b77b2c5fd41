//! Equal highs and equal lows.
//!
//! Swing pivots are split by kind; each adjacent pair of the same kind whose
//! prices differ by less than `equal_level_atr_multiple × ATR` is recorded.
//! Pairwise only: three equal highs in a row give two overlapping pairs, not a
//! cluster.

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, EqualLevel, Pivot, PivotKind};
use crate::indicators::AtrSeries;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EqualLevels {
    pub highs: Vec<EqualLevel>,
    pub lows: Vec<EqualLevel>,
}

impl EqualLevels {
    pub fn len(&self) -> usize {
        self.highs.len() + self.lows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highs.is_empty() && self.lows.is_empty()
    }
}

pub fn detect_equal_levels(
    candles: &[Candle],
    pivots: &[Pivot],
    atr: &AtrSeries,
    atr_multiple: f64,
) -> EqualLevels {
    EqualLevels {
        highs: pair_up(candles, pivots, PivotKind::High, atr, atr_multiple),
        lows: pair_up(candles, pivots, PivotKind::Low, atr, atr_multiple),
    }
}

fn pair_up(
    candles: &[Candle],
    pivots: &[Pivot],
    kind: PivotKind,
    atr: &AtrSeries,
    atr_multiple: f64,
) -> Vec<EqualLevel> {
    let same_kind: Vec<&Pivot> = pivots.iter().filter(|p| p.kind == kind).collect();

    same_kind
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            // Tolerance is measured at the earlier pivot.
            let tolerance = atr_multiple * atr.at(a.index.min(b.index));
            if (a.price - b.price).abs() >= tolerance {
                return None;
            }
            let time_at = |i: usize| candles.get(i).map_or(0, |c| c.time);
            Some(EqualLevel {
                price: (a.price + b.price) / 2.0,
                indices: (a.index, b.index),
                times: (time_at(a.index), time_at(b.index)),
            })
        })
        .collect()
}
