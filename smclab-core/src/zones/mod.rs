//! Zone stages: order blocks with mitigation and overlap resolution, fair
//! value gaps, equal levels.

pub mod equal_levels;
pub mod fvg;
pub mod mitigation;
pub mod order_blocks;
pub mod overlap;

pub use equal_levels::{detect_equal_levels, EqualLevels};
pub use fvg::{detect_fair_value_gaps, track_fills};
pub use mitigation::find_mitigation;
pub use order_blocks::{candle_strength, detect_order_blocks, extract_order_blocks, OrderBlocks};
pub use overlap::{overlaps_substantially, resolve_overlaps};
