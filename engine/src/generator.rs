use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::log;
use crate::pairs::first_connectable_pair;
use crate::rng::SessionRng;
use crate::types::{
    DEEP_RESHUFFLE_PASSES, MAX_GENERATION_ATTEMPTS, PatternId, SIMULATION_STEPS_PER_CELL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    // Counts the accepted shuffle too.
    pub attempts: u32,
    pub deep_reshuffled: bool,
    pub solvable: bool,
}

// Reshuffles until a layout survives the elimination simulation. Once the
// retry ceiling is spent, one deep reshuffle is applied and the board is
// delivered regardless of its verdict.
pub fn generate_board(
    grid: &mut Grid,
    patterns: &[PatternId],
    pattern_count: usize,
    rng: &mut SessionRng,
) -> Result<GenerationReport, String> {
    if pattern_count > patterns.len() {
        return Err(format!(
            "Pattern count {} exceeds the {} available patterns",
            pattern_count,
            patterns.len()
        ));
    }
    if pattern_count * 2 > grid.cell_count() {
        return Err(format!(
            "{} pattern pairs need {} cells, grid has {}",
            pattern_count,
            pattern_count * 2,
            grid.cell_count()
        ));
    }

    let mut bag: Vec<PatternId> = Vec::with_capacity(pattern_count * 2);
    for &pattern in &patterns[..pattern_count] {
        bag.push(pattern);
        bag.push(pattern);
    }

    let mut attempts = 0u32;
    while attempts < MAX_GENERATION_ATTEMPTS {
        attempts += 1;
        rng.shuffle(&mut bag);
        grid.fill_row_major(&bag);

        if !has_pairing_parity(grid) {
            log!("Pairing parity broken on attempt {}, reshuffling", attempts);
            continue;
        }

        if simulate_full_clear(grid) {
            return Ok(GenerationReport {
                attempts,
                deep_reshuffled: false,
                solvable: true,
            });
        }
    }

    deep_reshuffle(grid, rng);
    let solvable = has_pairing_parity(grid) && simulate_full_clear(grid);
    log!(
        "Deep reshuffle after {} attempts, board {}",
        attempts,
        if solvable {
            "solvable"
        } else {
            "accepted without solvability"
        }
    );

    Ok(GenerationReport {
        attempts,
        deep_reshuffled: true,
        solvable,
    })
}

fn has_pairing_parity(grid: &Grid) -> bool {
    let mut counts: BTreeMap<PatternId, usize> = BTreeMap::new();
    for (_, cell) in grid.active_cells() {
        if let Some(pattern) = cell.pattern {
            *counts.entry(pattern).or_insert(0) += 1;
        }
    }

    counts.values().all(|count| count % 2 == 0)
}

// Greedy elimination on a scratch copy: repeatedly remove the first
// enumerated pair. A stuck layout may still clear under a different removal
// order but counts as unsolvable here. The live grid is never touched.
fn simulate_full_clear(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    let step_limit = SIMULATION_STEPS_PER_CELL * scratch.cell_count();

    for _ in 0..step_limit {
        if scratch.active_cell_count() == 0 {
            return true;
        }

        let Some((first, second)) = first_connectable_pair(&scratch) else {
            return false;
        };

        if let Some(cell) = scratch.get_mut(first) {
            cell.matched = true;
        }
        if let Some(cell) = scratch.get_mut(second) {
            cell.matched = true;
        }
    }

    if scratch.active_cell_count() == 0 {
        return true;
    }
    log!(
        "Elimination simulation exceeded {} steps, treating the layout as unsolvable",
        step_limit
    );
    false
}

fn deep_reshuffle(grid: &mut Grid, rng: &mut SessionRng) {
    let mut patterns: Vec<PatternId> = grid
        .active_cells()
        .filter_map(|(_, cell)| cell.pattern)
        .collect();

    for _ in 0..DEEP_RESHUFFLE_PASSES {
        rng.shuffle(&mut patterns);
    }

    grid.fill_row_major(&patterns);
}
