//! High score leaderboard
//!
//! Persisted as `{"high_scores": [a, b, c]}`, tracks the top 3 scores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_SLOTS;
use crate::persistence;

/// Top scores, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub high_scores: [u64; HIGH_SCORE_SLOTS],
}

impl HighScores {
    pub fn new(mut scores: [u64; HIGH_SCORE_SLOTS]) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self {
            high_scores: scores,
        }
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        self.high_scores
            .iter()
            .position(|&s| score > s)
            .map(|i| i + 1)
    }

    /// Insert a score in order, dropping the lowest entry.
    /// Returns the rank achieved (1-indexed) or None if the table is unchanged.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        let i = rank - 1;
        self.high_scores.copy_within(i..HIGH_SCORE_SLOTS - 1, i + 1);
        self.high_scores[i] = score;
        Some(rank)
    }

    /// Load the table; anything missing or malformed yields all zeros
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<HighScores>(path) {
            Ok(table) => {
                log::info!("Loaded high scores {:?}", table.high_scores);
                Self::new(table.high_scores)
            }
            Err(e) => {
                log::info!(
                    "No usable high scores at {} ({}), starting fresh",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write the table; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        match persistence::write_json(path, self) {
            Ok(()) => log::info!("High scores saved {:?}", self.high_scores),
            Err(e) => log::warn!("Failed to save high scores to {}: {}", path.display(), e),
        }
    }
}

/// The leaderboard plus the file it is persisted to
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    table: HighScores,
}

impl HighScoreStore {
    /// Load from `path`; never fails
    pub fn open(path: PathBuf) -> Self {
        let table = HighScores::load(&path);
        Self {
            path: Some(path),
            table,
        }
    }

    /// Not backed by a file
    pub fn in_memory(table: HighScores) -> Self {
        Self { path: None, table }
    }

    pub fn scores(&self) -> &HighScores {
        &self.table
    }

    /// Record a finished run's score, persisting once if the table changed.
    /// Returns the rank achieved.
    pub fn report_final_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.table.add_score(score)?;
        log::info!("New high score {} at rank {}", score, rank);
        if let Some(path) = &self.path {
            self.table.save(path);
        }
        Some(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_path;

    fn table() -> HighScores {
        HighScores::new([500, 300, 100])
    }

    #[test]
    fn test_insert_between_entries() {
        let mut t = table();
        assert_eq!(t.add_score(400), Some(2));
        assert_eq!(t.high_scores, [500, 400, 300]);
    }

    #[test]
    fn test_low_score_leaves_table_unchanged() {
        let mut t = table();
        assert_eq!(t.add_score(50), None);
        assert_eq!(t.high_scores, [500, 300, 100]);
    }

    #[test]
    fn test_new_top_score() {
        let mut t = table();
        assert_eq!(t.add_score(900), Some(1));
        assert_eq!(t.high_scores, [900, 500, 300]);
    }

    #[test]
    fn test_last_slot_and_ties() {
        let mut t = table();
        assert_eq!(t.add_score(200), Some(3));
        assert_eq!(t.high_scores, [500, 300, 200]);

        // Ties land below the existing entry
        assert_eq!(t.add_score(300), Some(3));
        assert_eq!(t.high_scores, [500, 300, 300]);
        assert_eq!(t.add_score(300), None);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let t = HighScores::default();
        assert_eq!(t.potential_rank(0), None);
        assert_eq!(t.potential_rank(1), Some(1));
    }

    #[test]
    fn test_load_sorts_unsorted_file() {
        let path = test_path("unsorted.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"high_scores": [100, 900, 300]}"#).unwrap();
        assert_eq!(HighScores::load(&path).high_scores, [900, 300, 100]);
    }

    #[test]
    fn test_load_failures_give_zeros() {
        let dir = test_path("bad");
        std::fs::create_dir_all(&dir).unwrap();
        let cases = [
            ("corrupt.json", "{{{"),
            ("wrong_key.json", r#"{"scores": [1, 2, 3]}"#),
            ("short.json", r#"{"high_scores": [1, 2]}"#),
            ("negative.json", r#"{"high_scores": [-1, 2, 3]}"#),
        ];
        for (name, body) in cases {
            let path = dir.join(name);
            std::fs::write(&path, body).unwrap();
            assert_eq!(HighScores::load(&path), HighScores::default(), "{name}");
        }
        assert_eq!(HighScores::load(&dir.join("missing.json")), HighScores::default());
    }

    #[test]
    fn test_store_persists_only_on_change() {
        let path = test_path("store.json");
        let mut store = HighScoreStore::open(path.clone());
        assert_eq!(store.scores().high_scores, [0, 0, 0]);

        assert_eq!(store.report_final_score(0), None);
        assert!(!path.exists());

        assert_eq!(store.report_final_score(1200), Some(1));
        assert_eq!(HighScores::load(&path).high_scores, [1200, 0, 0]);

        let reopened = HighScoreStore::open(path);
        assert_eq!(reopened.scores().high_scores[0], 1200);
    }

    #[test]
    fn test_file_format() {
        let json = serde_json::to_string(&HighScores::new([3, 2, 1])).unwrap();
        assert_eq!(json, r#"{"high_scores":[3,2,1]}"#);
    }
}
