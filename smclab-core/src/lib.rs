//! smclab core: market structure and order block detection over OHLC candles.
//!
//! One call to [`analyze`] runs the whole pipeline over a candle slice:
//! - ATR as the volatility scale for every threshold
//! - Swing pivots and a BOS/CHOCH trend state machine (swing and internal)
//! - Order blocks at swing CHOCHs, with mitigation, overlap resolution and a cap
//! - Fair value gaps (with an opt-in fill pass)
//! - Equal highs and equal lows
//!
//! The engine is pure and synchronous: no I/O, no caching, no shared state.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod structure;
pub mod zones;

pub use config::{ConfigError, DetectorConfig};
pub use domain::{
    Candle, Direction, EqualLevel, FairValueGap, OrderBlock, Pivot, PivotKind, StructureEvent,
    StructureKind, TrendState,
};
pub use engine::{analyze, analyze_parallel, AnalysisResult, AnalysisStatus, Structures};
pub use error::{AnalysisError, CandleDefect};
pub use fingerprint::InputFingerprint;
pub use zones::{EqualLevels, OrderBlocks};
