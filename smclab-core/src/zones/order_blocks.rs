//! Order block extraction.
//!
//! For every CHOCH, walk back from the candle before the break to the nearest
//! candle of the opposite colour whose body is at least
//! `ob_body_atr_multiple × ATR` at that candle. The first such candle wins;
//! the scan never looks for a stronger one further back. If the window holds
//! none, the CHOCH simply has no order block.
//!
//! Significance is ATR-relative only. There is no "share of own range" rule.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::mitigation::find_mitigation;
use super::overlap::resolve_overlaps;
use crate::config::DetectorConfig;
use crate::domain::{Candle, Direction, OrderBlock, StructureEvent};
use crate::indicators::AtrSeries;

/// Order blocks split by direction, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBlocks {
    pub bullish: Vec<OrderBlock>,
    pub bearish: Vec<OrderBlock>,
}

impl OrderBlocks {
    pub fn len(&self) -> usize {
        self.bullish.len() + self.bearish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullish.is_empty() && self.bearish.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderBlock> {
        self.bullish.iter().chain(self.bearish.iter())
    }
}

/// Full order-block stage: extract, track mitigation, resolve overlaps, cap.
pub fn detect_order_blocks(
    candles: &[Candle],
    events: &[StructureEvent],
    atr: &AtrSeries,
    config: &DetectorConfig,
) -> OrderBlocks {
    let (bullish, bearish): (Vec<_>, Vec<_>) = extract_order_blocks(candles, events, atr, config)
        .into_iter()
        .partition(|ob| ob.direction == Direction::Bullish);

    OrderBlocks {
        bullish: resolve_overlaps(bullish, config.max_order_blocks),
        bearish: resolve_overlaps(bearish, config.max_order_blocks),
    }
}

/// One candidate block per CHOCH that has a qualifying candle, in event order.
///
/// Mitigation is already applied; overlap resolution is not.
pub fn extract_order_blocks(
    candles: &[Candle],
    events: &[StructureEvent],
    atr: &AtrSeries,
    config: &DetectorConfig,
) -> Vec<OrderBlock> {
    let last_time = match candles.last() {
        Some(c) => c.time,
        None => return Vec::new(),
    };

    events
        .iter()
        .filter(|e| e.is_choch())
        .filter_map(|choch| {
            let index = find_candidate(
                candles,
                choch,
                atr,
                config.lookback_candles,
                config.ob_body_atr_multiple,
            )?;
            let candle = &candles[index];
            let mut block = OrderBlock::fresh(
                candle,
                index,
                choch.direction,
                candle_strength(candle),
                choch.index,
                last_time,
            );
            if let Some(m) =
                find_mitigation(candles, index, choch.direction, config.mitigation_lookahead)
            {
                block.mark_mitigated(m, candles[m].time);
            }
            trace!(
                index,
                choch = choch.index,
                direction = ?choch.direction,
                mitigated = block.mitigated,
                "order block candidate"
            );
            Some(block)
        })
        .collect()
}

/// Nearest qualifying opposite-colour candle before `choch`, scanning back at
/// most `lookback` candles.
pub fn find_candidate(
    candles: &[Candle],
    choch: &StructureEvent,
    atr: &AtrSeries,
    lookback: usize,
    body_atr_multiple: f64,
) -> Option<usize> {
    let end = choch.index.min(candles.len());
    let start = choch.index.saturating_sub(lookback);
    if start >= end {
        return None;
    }

    (start..end).rev().find(|&i| {
        let candle = &candles[i];
        let opposing = match choch.direction {
            Direction::Bullish => candle.is_bearish(),
            Direction::Bearish => candle.is_bullish(),
        };
        opposing && candle.body() >= body_atr_multiple * atr.at(i)
    })
}

/// Candle strength in `[0, 3]`.
///
/// Twice the body-to-range ratio, plus a bonus of up to 1 for ranges that are
/// large relative to price.
pub fn candle_strength(candle: &Candle) -> f64 {
    let range = candle.range();
    if range <= 0.0 {
        return 0.0;
    }
    let mut strength = candle.body() / range * 2.0;
    if candle.close > 0.0 {
        strength += (range / candle.close * 1000.0).min(1.0);
    }
    strength.min(3.0)
}
