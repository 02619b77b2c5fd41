//! Swing pivots, structure-break events, and the trend state machine.

use serde::{Deserialize, Serialize};

/// Side of the market a break, zone, or gap belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Bullish => Direction::Bearish,
            Direction::Bearish => Direction::Bullish,
        }
    }
}

/// Which extreme a pivot marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// A local price extreme confirmed by a symmetric window of candles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    /// Position in the candle series.
    pub index: usize,
    pub kind: PivotKind,
    /// The candle's high for a `High` pivot, its low for a `Low` pivot.
    pub price: f64,
}

/// Break of Structure vs Change of Character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// The break continues the prevailing trend (or starts one from neutral).
    Bos,
    /// The break reverses the prevailing trend.
    Choch,
}

/// A detected break of the prior swing extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureEvent {
    pub direction: Direction,
    pub kind: StructureKind,
    /// Index of the pivot that broke structure.
    pub index: usize,
    /// Price of the breaking pivot.
    pub price: f64,
    pub time: i64,
    /// The prior same-kind swing extreme that was broken.
    pub break_level: f64,
}

impl StructureEvent {
    pub fn is_choch(&self) -> bool {
        self.kind == StructureKind::Choch
    }
}

/// Trend state threaded through a single classifier pass.
///
/// Three states, two triggers (bullish break, bearish break). Every pass starts
/// at `Neutral`; nothing carries over between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendState {
    #[default]
    Neutral,
    Bullish,
    Bearish,
}

impl TrendState {
    /// Apply a structure break in `direction`.
    ///
    /// Returns the label of the break and the state after it. A break against
    /// the current trend is a CHOCH; anything else (including the first break
    /// out of `Neutral`) is a BOS. The new state always follows the break.
    pub fn on_break(self, direction: Direction) -> (StructureKind, TrendState) {
        let kind = match (self, direction) {
            (TrendState::Bearish, Direction::Bullish)
            | (TrendState::Bullish, Direction::Bearish) => StructureKind::Choch,
            _ => StructureKind::Bos,
        };
        (kind, TrendState::from(direction))
    }
}

impl From<Direction> for TrendState {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Bullish => TrendState::Bullish,
            Direction::Bearish => TrendState::Bearish,
        }
    }
}
