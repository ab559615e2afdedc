//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs by final score.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player nickname as entered at run start
    pub nickname: String,
    /// Final score (run score scaled by level)
    pub score: u32,
    /// Kibble collected during the run
    pub kibble: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pet_rescue_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or
    /// None if the score didn't make the cut.
    pub fn record(
        &mut self,
        nickname: &str,
        score: u32,
        kibble: u32,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            nickname: nickname.to_string(),
            score,
            kibble,
            timestamp,
        };

        // Insertion point keeps entries sorted descending by score
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("Rex", 50, 3, 0.0), Some(1));
        assert_eq!(scores.record("Mia", 80, 1, 1.0), Some(1));
        assert_eq!(scores.record("Bo", 20, 0, 2.0), Some(3));

        let ordered: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![80, 50, 20]);
        assert_eq!(scores.top_score(), Some(80));
    }

    #[test]
    fn keeps_only_the_top_ten() {
        let mut scores = HighScores::new();
        for i in 1..=15u32 {
            scores.record("P", i * 10, 0, i as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(150));
        assert_eq!(scores.entries.last().unwrap().score, 60);
    }

    #[test]
    fn zero_scores_never_qualify() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.record("Rex", 0, 5, 0.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn low_score_bounces_off_a_full_board() {
        let mut scores = HighScores::new();
        for i in 1..=10u32 {
            scores.record("P", i * 10 + 50, 0, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.record("Bo", 10, 0, 0.0), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }
}
