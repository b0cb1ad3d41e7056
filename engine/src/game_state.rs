use crate::generator::{GenerationReport, generate_board};
use crate::grid::Grid;
use crate::hint::find_hint;
use crate::pairs::has_connectable_pair;
use crate::path::connection_path;
use crate::rng::SessionRng;
use crate::settings::LevelSettings;
use crate::types::{GameEvent, GameStatus, HintResult, PatternId, Position, SelectOutcome};

pub struct LinkGameState {
    grid: Grid,
    selected: Option<Position>,
    status: GameStatus,
    pairs_total: u32,
    pairs_matched: u32,
    hints_used: u32,
    generation: GenerationReport,
    pending_events: Vec<GameEvent>,
}

impl LinkGameState {
    pub fn new(
        settings: &LevelSettings,
        patterns: &[PatternId],
        rng: &mut SessionRng,
    ) -> Result<Self, String> {
        settings.validate()?;

        let mut grid = Grid::new(settings.rows, settings.cols);
        let generation = generate_board(&mut grid, patterns, settings.pattern_count, rng)?;

        Ok(Self {
            grid,
            selected: None,
            status: GameStatus::InProgress,
            pairs_total: settings.pattern_count as u32,
            pairs_matched: 0,
            hints_used: 0,
            generation,
            pending_events: Vec::new(),
        })
    }

    // First tap selects, tapping the selection clears it, a second tap
    // attempts the connection. When no route exists the selection moves to
    // the tapped tile.
    pub fn select_cell(&mut self, pos: Position) -> Result<SelectOutcome, String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is not in progress".to_string());
        }

        let tile_active = self.grid.get(pos).is_some_and(|cell| cell.is_active());
        if !tile_active {
            return Err(format!(
                "No selectable tile at row {}, col {}",
                pos.row, pos.col
            ));
        }

        let Some(previous) = self.selected else {
            self.selected = Some(pos);
            self.pending_events.push(GameEvent::CellSelected { pos });
            return Ok(SelectOutcome::Selected);
        };

        if previous == pos {
            self.selected = None;
            self.pending_events.push(GameEvent::SelectionCleared);
            return Ok(SelectOutcome::Deselected);
        }

        match connection_path(&self.grid, previous, pos) {
            Some(path) => {
                if let Some(cell) = self.grid.get_mut(previous) {
                    cell.matched = true;
                }
                if let Some(cell) = self.grid.get_mut(pos) {
                    cell.matched = true;
                }

                self.selected = None;
                self.pairs_matched += 1;
                self.pending_events.push(GameEvent::PairMatched {
                    first: previous,
                    second: pos,
                    path: path.clone(),
                });

                self.check_board_state();

                Ok(SelectOutcome::Matched { path })
            }
            None => {
                self.selected = Some(pos);
                self.pending_events.push(GameEvent::CellSelected { pos });
                Ok(SelectOutcome::NoPath)
            }
        }
    }

    pub fn request_hint(&mut self, rng: &mut SessionRng) -> Result<HintResult, String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is not in progress".to_string());
        }

        match find_hint(&self.grid, rng) {
            Some((first, second)) => {
                self.hints_used += 1;
                self.pending_events.push(GameEvent::HintShown { first, second });
                Ok(HintResult::Pair(first, second))
            }
            None => {
                self.status = GameStatus::Stuck;
                self.pending_events.push(GameEvent::NoMovesLeft);
                Ok(HintResult::NoMoves)
            }
        }
    }

    fn check_board_state(&mut self) {
        if self.grid.active_cell_count() == 0 {
            self.status = GameStatus::Cleared;
            self.pending_events.push(GameEvent::BoardCleared);
            return;
        }

        if !has_connectable_pair(&self.grid) {
            self.status = GameStatus::Stuck;
            self.pending_events.push(GameEvent::NoMovesLeft);
        }
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn pairs_matched(&self) -> u32 {
        self.pairs_matched
    }

    pub fn pairs_total(&self) -> u32 {
        self.pairs_total
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn generation(&self) -> GenerationReport {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::first_connectable_pair;

    // One pattern, one pair, 2x2 board: the two tiles always land on
    // (0,0) and (0,1) because the fill is row-major.
    fn single_pair_state() -> LinkGameState {
        let settings = LevelSettings {
            rows: 2,
            cols: 2,
            pattern_kinds: 1,
            pattern_count: 1,
        };
        let mut rng = SessionRng::new(12345);
        LinkGameState::new(&settings, &settings.pattern_list(), &mut rng).unwrap()
    }

    #[test]
    fn test_new_state_counts() {
        let state = single_pair_state();

        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.grid().active_cell_count(), 2);
        assert_eq!(state.pairs_total(), 1);
        assert_eq!(state.pairs_matched(), 0);
        assert_eq!(state.generation().attempts, 1);
        assert!(state.generation().solvable);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = LevelSettings {
            rows: 1,
            cols: 2,
            pattern_kinds: 1,
            pattern_count: 1,
        };
        let mut rng = SessionRng::new(1);

        let result = LinkGameState::new(&settings, &settings.pattern_list(), &mut rng);

        assert!(result.is_err());
    }

    #[test]
    fn test_first_tap_selects() {
        let mut state = single_pair_state();

        let outcome = state.select_cell(Position::new(0, 0)).unwrap();

        assert_eq!(outcome, SelectOutcome::Selected);
        assert_eq!(state.selected(), Some(Position::new(0, 0)));
        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::CellSelected { .. })));
    }

    #[test]
    fn test_tapping_selection_deselects() {
        let mut state = single_pair_state();
        state.select_cell(Position::new(0, 0)).unwrap();

        let outcome = state.select_cell(Position::new(0, 0)).unwrap();

        assert_eq!(outcome, SelectOutcome::Deselected);
        assert_eq!(state.selected(), None);
        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::SelectionCleared)));
    }

    #[test]
    fn test_matching_pair_clears_board() {
        let mut state = single_pair_state();
        state.select_cell(Position::new(0, 0)).unwrap();

        let outcome = state.select_cell(Position::new(0, 1)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                path: vec![Position::new(0, 0), Position::new(0, 1)],
            }
        );
        assert_eq!(state.status(), GameStatus::Cleared);
        assert_eq!(state.pairs_matched(), 1);
        assert_eq!(state.grid().active_cell_count(), 0);

        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::PairMatched { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::BoardCleared)));
    }

    #[test]
    fn test_selecting_empty_cell_errors() {
        let mut state = single_pair_state();

        assert!(state.select_cell(Position::new(1, 1)).is_err());
    }

    #[test]
    fn test_selecting_out_of_bounds_errors() {
        let mut state = single_pair_state();

        assert!(state.select_cell(Position::new(9, 9)).is_err());
    }

    #[test]
    fn test_selecting_after_game_over_errors() {
        let mut state = single_pair_state();
        state.select_cell(Position::new(0, 0)).unwrap();
        state.select_cell(Position::new(0, 1)).unwrap();

        let result = state.select_cell(Position::new(0, 0));

        assert_eq!(result, Err("Game is not in progress".to_string()));
    }

    #[test]
    fn test_no_path_moves_selection() {
        // A full 2x2 board never connects its diagonal: either the patterns
        // differ, or both one-corner candidates are occupied.
        let settings = LevelSettings {
            rows: 2,
            cols: 2,
            pattern_kinds: 2,
            pattern_count: 2,
        };
        let mut rng = SessionRng::new(4242);
        let mut state = LinkGameState::new(&settings, &settings.pattern_list(), &mut rng).unwrap();

        state.select_cell(Position::new(0, 0)).unwrap();
        let outcome = state.select_cell(Position::new(1, 1)).unwrap();

        assert_eq!(outcome, SelectOutcome::NoPath);
        assert_eq!(state.selected(), Some(Position::new(1, 1)));
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_hint_then_play_clears_board() {
        let mut state = single_pair_state();
        let mut rng = SessionRng::new(7);

        let hint = state.request_hint(&mut rng).unwrap();
        let HintResult::Pair(first, second) = hint else {
            panic!("Expected a pair hint");
        };
        state.select_cell(first).unwrap();
        state.select_cell(second).unwrap();

        assert_eq!(state.status(), GameStatus::Cleared);
        assert_eq!(state.hints_used(), 1);
        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::HintShown { .. })));
    }

    #[test]
    fn test_hint_after_game_over_errors() {
        let mut state = single_pair_state();
        state.select_cell(Position::new(0, 0)).unwrap();
        state.select_cell(Position::new(0, 1)).unwrap();

        let result = state.request_hint(&mut SessionRng::new(7));

        assert!(result.is_err());
    }

    #[test]
    fn test_events_cleared_after_take() {
        let mut state = single_pair_state();
        state.select_cell(Position::new(0, 0)).unwrap();
        state.select_cell(Position::new(0, 1)).unwrap();

        let first_drain = state.take_events();
        let second_drain = state.take_events();

        assert!(!first_drain.is_empty());
        assert!(second_drain.is_empty());
    }

    #[test]
    fn test_same_seed_builds_identical_boards() {
        let settings = LevelSettings {
            rows: 4,
            cols: 4,
            pattern_kinds: 4,
            pattern_count: 8,
        };
        let patterns = settings.pattern_list();

        let first = LinkGameState::new(&settings, &patterns, &mut SessionRng::new(63)).unwrap();
        let second = LinkGameState::new(&settings, &patterns, &mut SessionRng::new(63)).unwrap();

        for row in 0..settings.rows {
            for col in 0..settings.cols {
                let pos = Position::new(row, col);
                assert_eq!(
                    first.grid().get(pos).unwrap().pattern,
                    second.grid().get(pos).unwrap().pattern
                );
            }
        }
    }

    #[test]
    fn test_fuzz_greedy_replay_clears_validated_boards() {
        for seed in 0..50u64 {
            let settings = LevelSettings {
                rows: 4,
                cols: 5,
                pattern_kinds: 5,
                pattern_count: 10,
            };
            let mut rng = SessionRng::new(seed);
            let mut state =
                LinkGameState::new(&settings, &settings.pattern_list(), &mut rng).unwrap();

            if !state.generation().solvable {
                continue;
            }

            // Replays the removal order the validation simulated, so the
            // board must clear.
            let mut steps = 0;
            while state.status() == GameStatus::InProgress {
                let (first, second) = first_connectable_pair(state.grid())
                    .expect("validated board must keep a move");
                state.select_cell(first).unwrap();
                state.select_cell(second).unwrap();

                steps += 1;
                assert!(steps <= 10, "Seed {}: too many removals", seed);
            }

            assert_eq!(state.status(), GameStatus::Cleared, "Seed {}", seed);
            assert_eq!(state.pairs_matched(), state.pairs_total(), "Seed {}", seed);
        }
    }
}
