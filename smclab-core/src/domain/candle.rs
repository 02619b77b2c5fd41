//! Candle — the fundamental market data unit.

use serde::{Deserialize, Serialize};

use crate::error::CandleDefect;

/// OHLC candle for a single fixed interval.
///
/// `time` is an integer timestamp in a caller-defined unit (the CLI uses Unix
/// seconds). The engine only requires it to be non-decreasing across a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Absolute open-to-close distance.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// High-to-low distance.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Check the OHLC contract for this candle in isolation.
    ///
    /// Time ordering is a property of the series and is checked by
    /// [`validate_series`].
    pub fn check(&self) -> Result<(), CandleDefect> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(CandleDefect::NonFinitePrice { field });
            }
        }
        if self.high < self.low {
            return Err(CandleDefect::InvertedRange {
                high: self.high,
                low: self.low,
            });
        }
        if self.open.min(self.close) < self.low || self.open.max(self.close) > self.high {
            return Err(CandleDefect::BodyOutsideRange);
        }
        Ok(())
    }
}

/// Validate a candle series at the engine boundary.
///
/// Returns the index of the first offending candle together with its defect.
pub fn validate_series(candles: &[Candle]) -> Result<(), (usize, CandleDefect)> {
    let mut previous: Option<i64> = None;
    for (index, candle) in candles.iter().enumerate() {
        candle.check().map_err(|defect| (index, defect))?;
        if let Some(prev) = previous {
            if candle.time < prev {
                return Err((
                    index,
                    CandleDefect::NonMonotonicTime {
                        previous: prev,
                        current: candle.time,
                    },
                ));
            }
        }
        previous = Some(candle.time);
    }
    Ok(())
}
