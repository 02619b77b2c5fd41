//! Analysis pipeline.
//!
//! `analyze` is the single entry point:
//!
//! 1. Validate the config and every candle.
//! 2. Short inputs return an explicit insufficient-data result.
//! 3. ATR, then swing pivots.
//! 4. Structure → order blocks (mitigation, overlap, cap).
//! 5. Fair value gaps, optionally followed by the fill pass.
//! 6. Equal highs and lows over the swing pivots.
//!
//! Every call recomputes from scratch. Nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::domain::{validate_series, Candle, FairValueGap, Pivot, StructureEvent};
use crate::error::AnalysisError;
use crate::indicators::{AtrSeries, AverageTrueRange};
use crate::structure::{classify_structure, detect_pivots};
use crate::zones::{
    detect_equal_levels, detect_fair_value_gaps, detect_order_blocks, track_fills, EqualLevels,
    OrderBlocks,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    /// Fewer than `required` candles were supplied; every collection is empty.
    InsufficientData { required: usize, got: usize },
}

/// Structure events from both pivot windows, in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structures {
    pub swing: Vec<StructureEvent>,
    pub internal: Vec<StructureEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub order_blocks: OrderBlocks,
    pub structures: Structures,
    pub fair_value_gaps: Vec<FairValueGap>,
    pub equal_levels: EqualLevels,
}

impl AnalysisResult {
    pub fn insufficient(required: usize, got: usize) -> Self {
        Self {
            status: AnalysisStatus::InsufficientData { required, got },
            order_blocks: OrderBlocks::default(),
            structures: Structures::default(),
            fair_value_gaps: Vec::new(),
            equal_levels: EqualLevels::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == AnalysisStatus::Complete
    }
}

/// Run the full pipeline over `candles`.
///
/// Errors only on an invalid config or a malformed candle. Short inputs are
/// not errors: they yield [`AnalysisStatus::InsufficientData`].
pub fn analyze(
    candles: &[Candle],
    config: &DetectorConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let Some(inputs) = prepare(candles, config)? else {
        return Ok(AnalysisResult::insufficient(config.min_candles, candles.len()));
    };

    let (structures, order_blocks) = structure_branch(candles, &inputs, config);
    let fair_value_gaps = gap_branch(candles, &inputs.atr, config);
    let equal_levels = equal_level_branch(candles, &inputs, config);

    Ok(finish(candles, structures, order_blocks, fair_value_gaps, equal_levels))
}

/// Same result as [`analyze`], with the structure chain, gap scan and
/// equal-level scan run on the rayon pool.
pub fn analyze_parallel(
    candles: &[Candle],
    config: &DetectorConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let Some(inputs) = prepare(candles, config)? else {
        return Ok(AnalysisResult::insufficient(config.min_candles, candles.len()));
    };

    let ((structures, order_blocks), (fair_value_gaps, equal_levels)) = rayon::join(
        || structure_branch(candles, &inputs, config),
        || {
            rayon::join(
                || gap_branch(candles, &inputs.atr, config),
                || equal_level_branch(candles, &inputs, config),
            )
        },
    );

    Ok(finish(candles, structures, order_blocks, fair_value_gaps, equal_levels))
}

/// Inputs shared by every branch.
struct SharedInputs {
    atr: AtrSeries,
    swing_pivots: Vec<Pivot>,
}

/// Validation, the short-input guard and the shared precomputation.
fn prepare(
    candles: &[Candle],
    config: &DetectorConfig,
) -> Result<Option<SharedInputs>, AnalysisError> {
    config.validate()?;
    validate_series(candles)?;

    if candles.len() < config.min_candles {
        warn!(
            required = config.min_candles,
            got = candles.len(),
            "insufficient data, returning empty result"
        );
        return Ok(None);
    }

    let atr = AverageTrueRange::new(config.atr_period).compute(candles);
    debug!(period = config.atr_period, values = atr.len(), "atr computed");

    let swing_pivots = detect_pivots(candles, config.swing_length);
    debug!(length = config.swing_length, pivots = swing_pivots.len(), "swing pivots");

    Ok(Some(SharedInputs { atr, swing_pivots }))
}

fn structure_branch(
    candles: &[Candle],
    inputs: &SharedInputs,
    config: &DetectorConfig,
) -> (Structures, OrderBlocks) {
    let swing = classify_structure(candles, &inputs.swing_pivots);

    let internal_pivots = detect_pivots(candles, config.internal_length);
    let internal = classify_structure(candles, &internal_pivots);
    debug!(
        swing = swing.len(),
        internal = internal.len(),
        internal_pivots = internal_pivots.len(),
        "structure classified"
    );

    // Only swing-level CHOCHs anchor order blocks.
    let order_blocks = detect_order_blocks(candles, &swing, &inputs.atr, config);
    debug!(
        bullish = order_blocks.bullish.len(),
        bearish = order_blocks.bearish.len(),
        "order blocks"
    );

    (Structures { swing, internal }, order_blocks)
}

fn gap_branch(candles: &[Candle], atr: &AtrSeries, config: &DetectorConfig) -> Vec<FairValueGap> {
    let mut gaps = detect_fair_value_gaps(candles, atr, config.fvg_atr_multiple);
    if config.track_gap_fills {
        track_fills(&mut gaps, candles);
    }
    debug!(
        gaps = gaps.len(),
        fill_tracking = config.track_gap_fills,
        "fair value gaps"
    );
    gaps
}

fn equal_level_branch(
    candles: &[Candle],
    inputs: &SharedInputs,
    config: &DetectorConfig,
) -> EqualLevels {
    let levels = detect_equal_levels(
        candles,
        &inputs.swing_pivots,
        &inputs.atr,
        config.equal_level_atr_multiple,
    );
    debug!(highs = levels.highs.len(), lows = levels.lows.len(), "equal levels");
    levels
}

fn finish(
    candles: &[Candle],
    structures: Structures,
    order_blocks: OrderBlocks,
    fair_value_gaps: Vec<FairValueGap>,
    equal_levels: EqualLevels,
) -> AnalysisResult {
    info!(
        candles = candles.len(),
        order_blocks = order_blocks.len(),
        swing_events = structures.swing.len(),
        gaps = fair_value_gaps.len(),
        equal_levels = equal_levels.len(),
        "analysis complete"
    );
    AnalysisResult {
        status: AnalysisStatus::Complete,
        order_blocks,
        structures,
        fair_value_gaps,
        equal_levels,
    }
}
