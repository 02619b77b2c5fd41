//! Volatility reference for every significance threshold in the pipeline.

pub mod atr;

pub use atr::{true_range, AtrSeries, AverageTrueRange, ATR_EPSILON};
