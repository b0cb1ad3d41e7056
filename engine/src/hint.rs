use crate::grid::Grid;
use crate::pairs::find_connectable_pairs;
use crate::rng::SessionRng;
use crate::types::Position;

pub fn find_hint(grid: &Grid, rng: &mut SessionRng) -> Option<(Position, Position)> {
    let pairs = find_connectable_pairs(grid);
    if pairs.is_empty() {
        return None;
    }

    let index = rng.random_range(0..pairs.len());
    Some(pairs[index])
}
