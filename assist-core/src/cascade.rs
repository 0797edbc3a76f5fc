//! Derives the selectable values for each hierarchy level from the
//! metadata tree and the current selections.
//!
//! The walk filters at every ancestor depth by that level's selection set
//! (empty set = unconstrained) and collects the ids reachable at the
//! target depth. Stale ids never error: a selection that no longer exists
//! in the tree simply stops contributing options.

use std::collections::BTreeSet;

use crate::filters::SearchFilters;
use crate::protocol::{FilterMetadata, HierarchyNode};

/// One of the five hierarchy levels, parent to child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Location,
    Line,
    Equipment1,
    Equipment2,
    Equipment3,
}

impl Level {
    /// Depth in the tree, locations at zero.
    pub fn depth(self) -> usize {
        match self {
            Level::Location => 0,
            Level::Line => 1,
            Level::Equipment1 => 2,
            Level::Equipment2 => 3,
            Level::Equipment3 => 4,
        }
    }

    /// All levels in parent-to-child order.
    pub const ALL: [Level; 5] = [
        Level::Location,
        Level::Line,
        Level::Equipment1,
        Level::Equipment2,
        Level::Equipment3,
    ];
}

/// Ids selectable at `level` given the current selections at ancestor
/// levels. Sorted ascending, deduplicated.
pub fn available_at(level: Level, hierarchy: &[HierarchyNode], filters: &SearchFilters) -> Vec<String> {
    // Gates indexed by depth; a value at depth d is collected only when
    // every ancestor depth passed its gate.
    let gates: [&BTreeSet<String>; 4] = [
        &filters.locations,
        &filters.production_lines,
        &filters.equipment1s,
        &filters.equipment2s,
    ];

    let mut ids = BTreeSet::new();
    collect(hierarchy, 0, level.depth(), &gates, &mut ids);
    ids.into_iter().collect()
}

fn collect(
    nodes: &[HierarchyNode],
    depth: usize,
    target: usize,
    gates: &[&BTreeSet<String>; 4],
    ids: &mut BTreeSet<String>,
) {
    for node in nodes {
        if depth == target {
            ids.insert(node.id.clone());
            continue;
        }
        let gate = gates[depth];
        if gate.is_empty() || gate.contains(&node.id) {
            collect(&node.children, depth + 1, target, gates, ids);
        }
    }
}

/// Like [`available_at`], but falls back to the flat per-level metadata
/// list when the hierarchy has not been delivered. The flat lists carry
/// no parent information, so no cascading applies to them; locations have
/// no flat list and fall back to empty.
pub fn available_options(level: Level, metadata: &FilterMetadata, filters: &SearchFilters) -> Vec<String> {
    match &metadata.hierarchy {
        Some(hierarchy) => available_at(level, hierarchy, filters),
        None => match level {
            Level::Location => Vec::new(),
            Level::Line => metadata.production_lines.clone(),
            Level::Equipment1 => metadata.equipment1s.clone(),
            Level::Equipment2 => metadata.equipment2s.clone(),
            Level::Equipment3 => metadata.equipment3s.clone(),
        },
    }
}
