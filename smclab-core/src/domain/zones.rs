//! Price zones produced by the engine: order blocks, fair value gaps, equal levels.

use serde::{Deserialize, Serialize};

use super::candle::Candle;
use super::structure::Direction;

/// The last opposing candle before a change of character.
///
/// Created fresh by the extractor. Mitigation is write-once: once
/// [`OrderBlock::mark_mitigated`] has recorded an index, later calls are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub index: usize,
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub direction: Direction,
    /// Candle strength score in `[0, 3]`.
    pub strength: f64,
    pub fresh: bool,
    pub mitigated: bool,
    pub mitigation_index: Option<usize>,
    /// Time of the mitigating candle, or of the last candle while still fresh.
    pub end_time: i64,
    /// Index of the CHOCH event this block was extracted for.
    pub source_choch_index: usize,
}

impl OrderBlock {
    /// Build a fresh block anchored at `candles[index]`.
    pub fn fresh(
        candle: &Candle,
        index: usize,
        direction: Direction,
        strength: f64,
        source_choch_index: usize,
        end_time: i64,
    ) -> Self {
        Self {
            index,
            time: candle.time,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            direction,
            strength,
            fresh: true,
            mitigated: false,
            mitigation_index: None,
            end_time,
            source_choch_index,
        }
    }

    /// Record the first mitigating candle. No-op if already mitigated.
    pub fn mark_mitigated(&mut self, index: usize, time: i64) {
        if self.mitigated {
            return;
        }
        self.mitigated = true;
        self.fresh = false;
        self.mitigation_index = Some(index);
        self.end_time = time;
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Length of the shared price interval with `other` (0 when disjoint).
    pub fn overlap_with(&self, other: &OrderBlock) -> f64 {
        (self.high.min(other.high) - self.low.max(other.low)).max(0.0)
    }
}

/// Three-candle price imbalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueGap {
    pub direction: Direction,
    /// Index of the third candle of the triple.
    pub index: usize,
    pub time: i64,
    pub top: f64,
    pub bottom: f64,
    pub size: f64,
    /// Always `false` unless the opt-in fill tracking pass ran.
    pub filled: bool,
    pub fill_index: Option<usize>,
}

impl FairValueGap {
    /// Record the first filling candle. No-op if already filled.
    pub fn mark_filled(&mut self, index: usize) {
        if self.filled {
            return;
        }
        self.filled = true;
        self.fill_index = Some(index);
    }
}

/// Two adjacent same-kind swing pivots at nearly the same price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualLevel {
    /// Average of the two pivot prices.
    pub price: f64,
    pub indices: (usize, usize),
    pub times: (i64, i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(low: f64, high: f64) -> OrderBlock {
        let candle = Candle::new(0, high, high, low, low);
        OrderBlock::fresh(&candle, 0, Direction::Bullish, 1.0, 3, 0)
    }

    #[test]
    fn mitigation_is_write_once() {
        let mut ob = block(10.0, 12.0);
        assert!(ob.fresh);
        ob.mark_mitigated(7, 700);
        ob.mark_mitigated(9, 900);
        assert!(ob.mitigated);
        assert!(!ob.fresh);
        assert_eq!(ob.mitigation_index, Some(7));
        assert_eq!(ob.end_time, 700);
    }

    #[test]
    fn overlap_measures_shared_interval() {
        let a = block(10.0, 12.0);
        let b = block(11.0, 15.0);
        let c = block(13.0, 14.0);
        assert_eq!(a.overlap_with(&b), 1.0);
        assert_eq!(b.overlap_with(&a), 1.0);
        assert_eq!(a.overlap_with(&c), 0.0);
    }

    #[test]
    fn gap_fill_is_write_once() {
        let mut gap = FairValueGap {
            direction: Direction::Bullish,
            index: 4,
            time: 240,
            top: 12.0,
            bottom: 10.0,
            size: 2.0,
            filled: false,
            fill_index: None,
        };
        gap.mark_filled(8);
        gap.mark_filled(9);
        assert!(gap.filled);
        assert_eq!(gap.fill_index, Some(8));
    }
}
