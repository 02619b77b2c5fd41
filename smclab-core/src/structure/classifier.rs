//! Market structure classification: BOS / CHOCH events from swing pivots.
//!
//! Pivots are walked as consecutive triples `(prev_prev, prev, current)`:
//! - `High, Low, High` with `current > prev_prev` is a bullish break.
//! - `Low, High, Low` with `current < prev_prev` is a bearish break.
//!
//! Each break goes through [`TrendState::on_break`], which labels it and
//! moves the trend. Events come out in pivot order and are never revised.

use crate::domain::{Candle, Direction, Pivot, PivotKind, StructureEvent, TrendState};

/// Classify structure breaks over `pivots`.
///
/// `candles` is the series the pivots were detected on; it supplies event
/// timestamps.
pub fn classify_structure(candles: &[Candle], pivots: &[Pivot]) -> Vec<StructureEvent> {
    let mut trend = TrendState::Neutral;
    let mut events = Vec::new();

    for triple in pivots.windows(3) {
        let (prev_prev, prev, current) = (&triple[0], &triple[1], &triple[2]);

        let Some(direction) = break_direction(prev_prev, prev, current) else {
            continue;
        };
        let Some(candle) = candles.get(current.index) else {
            continue;
        };

        let (kind, next) = trend.on_break(direction);
        trend = next;
        events.push(StructureEvent {
            direction,
            kind,
            index: current.index,
            price: current.price,
            time: candle.time,
            break_level: prev_prev.price,
        });
    }

    events
}

/// Which break, if any, a pivot triple represents.
fn break_direction(prev_prev: &Pivot, prev: &Pivot, current: &Pivot) -> Option<Direction> {
    match (prev_prev.kind, prev.kind, current.kind) {
        (PivotKind::High, PivotKind::Low, PivotKind::High) if current.price > prev_prev.price => {
            Some(Direction::Bullish)
        }
        (PivotKind::Low, PivotKind::High, PivotKind::Low) if current.price < prev_prev.price => {
            Some(Direction::Bearish)
        }
        _ => None,
    }
}
