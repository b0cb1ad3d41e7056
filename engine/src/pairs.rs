use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::path::can_connect;
use crate::types::{PatternId, Position};

// BTreeMap keeps group order stable across runs, which keeps seeded
// sessions and the elimination simulation reproducible.
fn pattern_groups(grid: &Grid) -> BTreeMap<PatternId, Vec<Position>> {
    let mut groups: BTreeMap<PatternId, Vec<Position>> = BTreeMap::new();
    for (pos, cell) in grid.active_cells() {
        if let Some(pattern) = cell.pattern {
            groups.entry(pattern).or_default().push(pos);
        }
    }
    groups
}

pub fn find_connectable_pairs(grid: &Grid) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();

    for positions in pattern_groups(grid).values() {
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if can_connect(grid, positions[i], positions[j]) {
                    pairs.push((positions[i], positions[j]));
                }
            }
        }
    }

    pairs
}

// Same walk as find_connectable_pairs, stopping at the first hit.
pub fn first_connectable_pair(grid: &Grid) -> Option<(Position, Position)> {
    for positions in pattern_groups(grid).values() {
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if can_connect(grid, positions[i], positions[j]) {
                    return Some((positions[i], positions[j]));
                }
            }
        }
    }

    None
}

pub fn has_connectable_pair(grid: &Grid) -> bool {
    first_connectable_pair(grid).is_some()
}
