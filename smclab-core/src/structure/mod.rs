//! Swing pivots and the market structure state machine.

pub mod classifier;
pub mod pivots;

pub use classifier::classify_structure;
pub use pivots::detect_pivots;
