use crate::types::{PatternId, Position};

// Slots start out matched with no pattern, so path scans treat them as open.
// A matched cell keeps its last pattern id but counts as empty from then on.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub pattern: Option<PatternId>,
    pub visible: bool,
    pub matched: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            pattern: None,
            visible: false,
            matched: true,
        }
    }

    pub fn filled(pattern: PatternId) -> Self {
        Self {
            pattern: Some(pattern),
            visible: true,
            matched: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.visible && !self.matched
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        }
    }

    // 0 leaves the slot empty; the literal is padded up to whole rows.
    #[cfg(test)]
    pub fn from_patterns(cols: usize, values: &[u32]) -> Self {
        let rows = values.len().div_ceil(cols);
        let mut grid = Self::new(rows, cols);
        for (i, &value) in values.iter().enumerate() {
            if value > 0 {
                grid.cells[i] = Cell::filled(PatternId(value));
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index_of(pos).map(|index| &mut self.cells[index])
    }

    // Out-of-bounds positions are not open.
    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| !cell.is_active())
    }

    pub fn active_cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_active())
            .map(|(index, cell)| (Position::new(index / self.cols, index % self.cols), cell))
    }

    pub fn active_cell_count(&self) -> usize {
        self.active_cells().count()
    }

    pub(crate) fn fill_row_major(&mut self, bag: &[PatternId]) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = match bag.get(index) {
                Some(&pattern) => Cell::filled(pattern),
                None => Cell::empty(),
            };
        }
    }
}
