//! Leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs sorted by score,
//! then distance. Malformed or missing stored data reads as an empty
//! board rather than an error.

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries to keep
pub const MAX_ENTRIES: usize = 10;

/// Longest player name stored
pub const MAX_NAME_LEN: usize = 16;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Player name, truncated to [`MAX_NAME_LEN`] characters
    pub name: String,
    pub score: u64,
    /// Distance flown, rounded down to whole units
    pub distance: u64,
}

/// Top-10 leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "windy_glider_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the board
    pub fn qualifies(&self, score: u64, distance: u64) -> bool {
        if score == 0 && distance == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries
            .last()
            .map(|e| (score, distance) > (e.score, e.distance))
            .unwrap_or(true)
    }

    /// Add a run to the board if it qualifies. The name is truncated to
    /// [`MAX_NAME_LEN`] characters. Returns the rank achieved
    /// (1-indexed) or None.
    pub fn add_entry(&mut self, name: &str, score: u64, distance: u64) -> Option<usize> {
        if !self.qualifies(score, distance) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
            distance,
        };

        // Insertion point: sorted by score desc, then distance desc
        let pos = self
            .entries
            .iter()
            .position(|e| (score, distance) > (e.score, e.distance));
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

        // Truncated to top 10 on every write
        self.entries.truncate(MAX_ENTRIES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                    log::info!("Loaded {} leaderboard entries", board.entries.len());
                    return board;
                }
                log::warn!("Leaderboard data was malformed, starting fresh");
            }
        }

        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Leaderboard saved ({} entries)", self.entries.len());
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
    fn test_sorted_by_score_then_distance() {
        let mut board = Leaderboard::new();
        board.add_entry("a", 100, 50);
        board.add_entry("b", 200, 10);
        board.add_entry("c", 100, 80);

        let order: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_truncated_to_top_ten() {
        let mut board = Leaderboard::new();
        for i in 0..15u64 {
            board.add_entry("p", i + 1, 0);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(15));
        // The weakest surviving entry is 15 - 9 = 6
        assert_eq!(board.entries.last().map(|e| e.score), Some(6));
    }

    #[test]
    fn test_rank_reported() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("a", 50, 0), Some(1));
        assert_eq!(board.add_entry("b", 100, 0), Some(1));
        assert_eq!(board.add_entry("c", 75, 0), Some(2));
    }

    #[test]
    fn test_zero_run_does_not_qualify() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("a", 0, 0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_weak_run_rejected_when_full() {
        let mut board = Leaderboard::new();
        for i in 0..10u64 {
            board.add_entry("p", 100 + i, 0);
        }
        assert_eq!(board.add_entry("weak", 10, 5), None);
        assert_eq!(board.entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_name_truncated() {
        let mut board = Leaderboard::new();
        board.add_entry("abcdefghijklmnopqrstuvwxyz", 10, 1);
        assert_eq!(board.entries[0].name.len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_malformed_json_reads_empty() {
        // Fail-soft: bad data deserializes to an error, caller falls
        // back to an empty board
        let parsed = serde_json::from_str::<Leaderboard>("{not json");
        assert!(parsed.is_err());
    }
}
