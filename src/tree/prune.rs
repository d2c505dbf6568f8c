//! Bounded greedy pruning.
//!
//! Repeatedly collapses the lightest leaf into its parent until the tree
//! fits a display budget. Collapsed weight is re-attributed to an ancestor,
//! never dropped, so the root's subtree weight is unchanged by pruning.

use super::{NodeId, SampleTree};
use crate::error::ReportError;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Collapse leaves until at most `max_leaves` remain or every remaining leaf
/// carries more than `min_weight` samples.
///
/// Min-heap over `(own_weight, NodeId)`; equal weights tie-break on the
/// arena id, so pruning is reproducible given identical insertion order.
/// The loop stops when the lightest leaf is the root (the tree collapsed to
/// a single node) or when that leaf exceeds `min_weight` while strictly
/// fewer than `max_leaves` other leaves remain. The strict `<` means
/// pruning can stop with exactly `max_leaves` leaves surviving.
///
/// Each merge removes one node, so at most `initial_leaf_count - 1` merges
/// run. Re-pruning with the same or looser constraints performs no merges.
pub fn prune(tree: &mut SampleTree, max_leaves: usize, min_weight: u64) -> Result<(), ReportError> {
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = tree
        .leaves()
        .map(|leaf| Reverse((tree.own_weight(leaf), leaf)))
        .collect();

    while let Some(&Reverse((weight, leaf))) = heap.peek() {
        if tree.parent(leaf).is_none() {
            break;
        }
        heap.pop();
        if weight > min_weight && heap.len() < max_leaves {
            break;
        }
        let parent = tree.merge_up(leaf)?;
        if tree.is_leaf(parent) {
            heap.push(Reverse((tree.own_weight(parent), parent)));
        }
    }
    Ok(())
}
