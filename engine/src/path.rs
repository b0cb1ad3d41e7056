use crate::grid::Grid;
use crate::types::Position;

pub fn can_connect(grid: &Grid, first: Position, second: Position) -> bool {
    connection_path(grid, first, second).is_some()
}

// Endpoints are compared by pattern only; their own visible/matched flags are
// not checked here. Selection and enumeration only ever pass active cells.
pub fn connection_path(grid: &Grid, first: Position, second: Position) -> Option<Vec<Position>> {
    if first == second {
        return None;
    }

    let first_pattern = grid.get(first).and_then(|cell| cell.pattern)?;
    let second_pattern = grid.get(second).and_then(|cell| cell.pattern)?;
    if first_pattern != second_pattern {
        return None;
    }

    if clear_straight(grid, first, second) {
        return Some(vec![first, second]);
    }

    if let Some(corner) = one_corner(grid, first, second) {
        return Some(vec![first, corner, second]);
    }

    if let Some((corner1, corner2)) = two_corner(grid, first, second) {
        return Some(vec![first, corner1, corner2, second]);
    }

    None
}

fn clear_straight(grid: &Grid, from: Position, to: Position) -> bool {
    if from.row == to.row {
        let (start, end) = if from.col < to.col {
            (from.col, to.col)
        } else {
            (to.col, from.col)
        };
        ((start + 1)..end).all(|col| grid.is_open(Position::new(from.row, col)))
    } else if from.col == to.col {
        let (start, end) = if from.row < to.row {
            (from.row, to.row)
        } else {
            (to.row, from.row)
        };
        ((start + 1)..end).all(|row| grid.is_open(Position::new(row, from.col)))
    } else {
        false
    }
}

fn one_corner(grid: &Grid, first: Position, second: Position) -> Option<Position> {
    let candidates = [
        Position::new(first.row, second.col),
        Position::new(second.row, first.col),
    ];

    candidates.into_iter().find(|&corner| {
        grid.is_open(corner)
            && clear_straight(grid, first, corner)
            && clear_straight(grid, corner, second)
    })
}

// A detour through either endpoint's own row or column is a one-corner case
// and is skipped here.
fn two_corner(grid: &Grid, first: Position, second: Position) -> Option<(Position, Position)> {
    for row in 0..grid.rows() {
        if row == first.row || row == second.row {
            continue;
        }

        let corner1 = Position::new(row, first.col);
        let corner2 = Position::new(row, second.col);
        if grid.is_open(corner1)
            && grid.is_open(corner2)
            && clear_straight(grid, first, corner1)
            && clear_straight(grid, corner1, corner2)
            && clear_straight(grid, corner2, second)
        {
            return Some((corner1, corner2));
        }
    }

    for col in 0..grid.cols() {
        if col == first.col || col == second.col {
            continue;
        }

        let corner1 = Position::new(first.row, col);
        let corner2 = Position::new(second.row, col);
        if grid.is_open(corner1)
            && grid.is_open(corner2)
            && clear_straight(grid, first, corner1)
            && clear_straight(grid, corner1, corner2)
            && clear_straight(grid, corner2, second)
        {
            return Some((corner1, corner2));
        }
    }

    None
}
