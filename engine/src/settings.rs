use serde::{Deserialize, Serialize};

use crate::types::PatternId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    pub rows: usize,
    pub cols: usize,
    // Distinct ids the entry list cycles through.
    pub pattern_kinds: usize,
    // Pair slots; each slot contributes two tiles.
    pub pattern_count: usize,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 10,
            pattern_kinds: 20,
            pattern_count: 40,
        }
    }
}

impl LevelSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.rows < 2 || self.rows > 16 {
            return Err(format!("Rows must be between 2 and 16, got {}", self.rows));
        }
        if self.cols < 2 || self.cols > 16 {
            return Err(format!("Cols must be between 2 and 16, got {}", self.cols));
        }
        if self.pattern_count == 0 {
            return Err("Pattern count must be at least 1".to_string());
        }
        // Deserialized counts are unbounded until here; keep them out of any multiply.
        if self.pattern_count > self.rows * self.cols / 2 {
            return Err(format!(
                "{} pattern pairs do not fit a {}x{} board",
                self.pattern_count, self.rows, self.cols
            ));
        }
        if self.pattern_kinds == 0 || self.pattern_kinds > self.pattern_count {
            return Err(format!(
                "Pattern kinds must be between 1 and {}, got {}",
                self.pattern_count, self.pattern_kinds
            ));
        }
        Ok(())
    }

    pub fn pattern_list(&self) -> Vec<PatternId> {
        (0..self.pattern_count)
            .map(|i| PatternId((i % self.pattern_kinds) as u32 + 1))
            .collect()
    }
}
