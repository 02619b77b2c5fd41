//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), defined for
//! every candle after the first.
//! ATR is a simple moving average of TR over `period`, aligned to candle
//! indices `[period, n-1]`.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;

/// Fallback scale used wherever ATR is unavailable or zero.
pub const ATR_EPSILON: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct AverageTrueRange {
    period: usize,
}

impl AverageTrueRange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }

    /// Compute the ATR series for `candles`.
    pub fn compute(&self, candles: &[Candle]) -> AtrSeries {
        let tr = true_range(candles);
        let period = self.period;
        // Each window is summed directly so flat stretches give an exact zero.
        let values = tr
            .windows(period)
            .map(|w| w.iter().sum::<f64>() / period as f64)
            .collect();

        AtrSeries { period, values }
    }
}

/// Compute the True Range series.
///
/// `tr[k]` belongs to candle `k + 1`; the first candle has no previous close.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs())
        })
        .collect()
}

/// ATR values aligned to candle indices `[period, period + values.len())`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtrSeries {
    period: usize,
    values: Vec<f64>,
}

impl AtrSeries {
    /// Raw values; `values()[k]` is the ATR at candle `k + period`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// ATR at a candle index, if that index has a computed value.
    pub fn get(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(self.period)
            .and_then(|k| self.values.get(k).copied())
    }

    /// ATR at a candle index for threshold use.
    ///
    /// Indices inside the warmup, past the end, or holding a zero ATR all
    /// resolve to [`ATR_EPSILON`].
    pub fn at(&self, index: usize) -> f64 {
        self.get(index)
            .filter(|v| *v > 0.0)
            .unwrap_or(ATR_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assert_approx, DEFAULT_EPSILON};

    fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| {
                Candle::new(i as i64 * 60, open, high, low, close)
            })
            .collect()
    }

    #[test]
    fn true_range_basic() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&candles);
        assert_eq!(tr.len(), 2);
        assert_approx(tr[0], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[1], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current candle 110-115-108
        let candles = make_ohlc_candles(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&candles);
        assert_approx(tr[0], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 6
        ]);
        let atr = AverageTrueRange::new(3).compute(&candles);

        // Aligned to candles [3, 4]
        assert_eq!(atr.len(), 2);
        assert_eq!(atr.get(2), None);
        assert_approx(atr.get(3).unwrap(), 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(atr.get(4).unwrap(), 21.0 / 3.0, DEFAULT_EPSILON);
        assert_eq!(atr.get(5), None);
    }

    #[test]
    fn series_is_shorter_by_period() {
        let candles = crate::domain::make_candles(&[10.0, 11.0, 12.0, 11.0, 10.0, 12.0, 13.0]);
        let atr = AverageTrueRange::new(4).compute(&candles);
        assert_eq!(atr.len(), candles.len() - 4);
    }

    #[test]
    fn period_longer_than_input_is_empty() {
        let candles = crate::domain::make_candles(&[10.0, 11.0, 12.0]);
        let atr = AverageTrueRange::new(14).compute(&candles);
        assert!(atr.is_empty());
        assert_eq!(atr.at(2), ATR_EPSILON);
    }

    #[test]
    fn out_of_range_lookup_falls_back_to_epsilon() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        let atr = AverageTrueRange::new(2).compute(&candles);
        assert_eq!(atr.at(0), ATR_EPSILON);
        assert_eq!(atr.at(1), ATR_EPSILON);
        assert_approx(atr.at(2), 8.5, DEFAULT_EPSILON);
        assert_eq!(atr.at(3), ATR_EPSILON);
    }

    #[test]
    fn zero_atr_falls_back_to_epsilon() {
        let flat: Vec<Candle> = (0..10)
            .map(|i| Candle::new(i * 60, 100.0, 100.0, 100.0, 100.0))
            .collect();
        let atr = AverageTrueRange::new(3).compute(&flat);
        assert_eq!(atr.get(5), Some(0.0));
        assert_eq!(atr.at(5), ATR_EPSILON);
    }

    #[test]
    fn atr_is_non_negative() {
        let candles = crate::domain::make_candles(&[
            10.0, 12.0, 9.0, 15.0, 14.0, 14.5, 13.0, 18.0, 11.0, 10.5,
        ]);
        let atr = AverageTrueRange::new(3).compute(&candles);
        assert!(atr.values().iter().all(|v| *v >= 0.0));
    }

    #[test]
    #[should_panic(expected = "ATR period must be >= 1")]
    fn zero_period_panics() {
        let _ = AverageTrueRange::new(0);
    }
}
