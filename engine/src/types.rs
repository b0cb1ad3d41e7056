pub const MAX_GENERATION_ATTEMPTS: u32 = 100;
pub const DEEP_RESHUFFLE_PASSES: usize = 5;
pub const SIMULATION_STEPS_PER_CELL: usize = 2;

// Two tiles match when their pattern ids are equal; how a pattern looks on
// screen is the presentation layer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    Cleared,
    Stuck,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintResult {
    Pair(Position, Position),
    NoMoves,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Deselected,
    Matched { path: Vec<Position> },
    NoPath,
}

#[derive(Clone, Debug)]
pub enum GameEvent {
    CellSelected {
        pos: Position,
    },
    SelectionCleared,
    PairMatched {
        first: Position,
        second: Position,
        path: Vec<Position>,
    },
    HintShown {
        first: Position,
        second: Position,
    },
    BoardCleared,
    NoMovesLeft,
}
