//! Fair value gap detection.
//!
//! For each triple of consecutive candles `(i-2, i-1, i)`:
//! - bullish gap when `low[i] > high[i-2]`
//! - bearish gap when `high[i] < low[i-2]`
//!
//! Gaps smaller than `fvg_atr_multiple × ATR[i]` are noise and dropped.
//! Detection never looks forward, so every gap comes out unfilled. Filling is
//! the separate opt-in pass [`track_fills`].

use crate::domain::{Candle, Direction, FairValueGap};
use crate::indicators::AtrSeries;

/// Scan for fair value gaps, in candle order.
pub fn detect_fair_value_gaps(
    candles: &[Candle],
    atr: &AtrSeries,
    atr_multiple: f64,
) -> Vec<FairValueGap> {
    let mut gaps = Vec::new();

    for (offset, triple) in candles.windows(3).enumerate() {
        let index = offset + 2;
        let (first, current) = (&triple[0], &triple[2]);
        let min_size = atr_multiple * atr.at(index);

        if current.low > first.high {
            let size = current.low - first.high;
            if size >= min_size {
                gaps.push(FairValueGap {
                    direction: Direction::Bullish,
                    index,
                    time: current.time,
                    top: current.low,
                    bottom: first.high,
                    size,
                    filled: false,
                    fill_index: None,
                });
            }
        }

        if current.high < first.low {
            let size = first.low - current.high;
            if size >= min_size {
                gaps.push(FairValueGap {
                    direction: Direction::Bearish,
                    index,
                    time: current.time,
                    top: first.low,
                    bottom: current.high,
                    size,
                    filled: false,
                    fill_index: None,
                });
            }
        }
    }

    gaps
}

/// Forward fill pass: mark each gap filled at the first later candle that
/// trades through it.
///
/// A bullish gap fills when a later low reaches its bottom; a bearish gap when
/// a later high reaches its top.
pub fn track_fills(gaps: &mut [FairValueGap], candles: &[Candle]) {
    for gap in gaps.iter_mut() {
        let start = gap.index + 1;
        let Some(rest) = candles.get(start..) else {
            continue;
        };
        let hit = rest.iter().position(|c| match gap.direction {
            Direction::Bullish => c.low <= gap.bottom,
            Direction::Bearish => c.high >= gap.top,
        });
        if let Some(offset) = hit {
            gap.mark_filled(start + offset);
        }
    }
}
