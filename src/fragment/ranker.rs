//! Global fragment ordering.

use super::FragmentSet;

/// Orders the arena by saliency, tallest first, and writes each
/// fragment's rank.
///
/// The sort is stable so equal-saliency fragments keep their input
/// order; reordering ties would silently change the adjacency graph.
/// After this call `set[rank]` addresses the fragment with that rank.
///
/// Runs whenever the fragment set or the sort key changes; animation
/// parameters alone never require a re-rank.
pub fn rank(set: &mut FragmentSet) {
    set.fragments
        .sort_by(|a, b| b.saliency.total_cmp(&a.saliency));
    for (index, fragment) in set.fragments.iter_mut().enumerate() {
        fragment.rank = index;
    }
}
