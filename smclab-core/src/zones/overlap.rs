//! Greedy overlap resolution for one direction's order blocks.
//!
//! Blocks are visited most recent first. A block is kept unless the price
//! interval it shares with an already-kept block exceeds half of either
//! block's own range. The result is then capped, most recent first.
//!
//! This is a single local pass, not a search for the best non-overlapping
//! cover. Cost is `O(k²)` in the candidate count.

use std::cmp::Reverse;

use crate::domain::OrderBlock;

/// Share of a block's range above which an overlap counts as substantial.
pub const MAX_OVERLAP_SHARE: f64 = 0.5;

/// Filter `blocks` (one direction) and cap the survivors at `max_count`.
pub fn resolve_overlaps(mut blocks: Vec<OrderBlock>, max_count: usize) -> Vec<OrderBlock> {
    blocks.sort_by_key(|ob| Reverse((ob.index, ob.source_choch_index)));

    let mut kept: Vec<OrderBlock> = Vec::with_capacity(blocks.len().min(max_count));
    for candidate in blocks {
        if kept.len() >= max_count {
            break;
        }
        if kept.iter().all(|existing| !overlaps_substantially(&candidate, existing)) {
            kept.push(candidate);
        }
    }
    kept
}

/// True when the shared interval exceeds [`MAX_OVERLAP_SHARE`] of either range.
pub fn overlaps_substantially(a: &OrderBlock, b: &OrderBlock) -> bool {
    let shared = a.overlap_with(b);
    shared > 0.0
        && (shared > a.range() * MAX_OVERLAP_SHARE || shared > b.range() * MAX_OVERLAP_SHARE)
}
