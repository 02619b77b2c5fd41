//! Forward invalidation scan for order blocks.
//!
//! A bullish block is mitigated by the first later candle whose low drops
//! strictly below the block's low; a bearish block by the first later candle
//! whose high rises strictly above the block's high.

use crate::domain::{Candle, Direction};

/// Index of the first candle after `block_index` that mitigates the block.
///
/// `lookahead` bounds the scan to that many candles after the block; `None`
/// scans to the end of the series. Pure: the same inputs always give the
/// same answer, and extending `candles` can only turn `None` into `Some`.
pub fn find_mitigation(
    candles: &[Candle],
    block_index: usize,
    direction: Direction,
    lookahead: Option<usize>,
) -> Option<usize> {
    let block = candles.get(block_index)?;
    let start = block_index + 1;
    let end = match lookahead {
        Some(n) => start.saturating_add(n).min(candles.len()),
        None => candles.len(),
    };
    if start >= end {
        return None;
    }

    candles[start..end]
        .iter()
        .position(|c| match direction {
            Direction::Bullish => c.low < block.low,
            Direction::Bearish => c.high > block.high,
        })
        .map(|offset| start + offset)
}
