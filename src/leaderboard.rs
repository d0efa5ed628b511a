//! Local leaderboard of shooting rounds
//!
//! Persisted to LocalStorage, tracks the top 10 rounds.

use serde::{Deserialize, Serialize};

use crate::platform::{self, StorageError};
use crate::session::RoundSummary;

/// Maximum number of rounds to keep
pub const MAX_ENTRIES: usize = 10;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub makes: u32,
    pub best_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top rounds, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    const STORAGE_KEY: &'static str = "hoop_hub_leaderboard";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would take (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a finished round if it qualifies. Returns the rank achieved.
    ///
    /// Ties keep the earlier round ahead.
    pub fn add_result(&mut self, summary: &RoundSummary, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(summary.score)?;
        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                score: summary.score,
                makes: summary.makes,
                best_combo: summary.best_combo,
                timestamp,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        log::info!("New leaderboard entry at rank {}", rank);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        let mut board: Self = platform::load_or_default(Self::STORAGE_KEY);
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_ENTRIES);
        board
    }

    pub fn save(&self) -> Result<(), StorageError> {
        platform::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Relative age of an entry ("Just now", "3 mins ago", "Yesterday", ...)
pub fn format_age(timestamp: f64, now: f64) -> String {
    let mins = ((now - timestamp) / 60_000.0).max(0.0);
    let hours = mins / 60.0;
    let days = hours / 24.0;

    if days >= 1.0 {
        match days.floor() as u32 {
            1 => "Yesterday".to_string(),
            n => format!("{} days ago", n),
        }
    } else if hours >= 1.0 {
        match hours.floor() as u32 {
            1 => "1 hour ago".to_string(),
            n => format!("{} hours ago", n),
        }
    } else if mins >= 1.0 {
        match mins.floor() as u32 {
            1 => "1 min ago".to_string(),
            n => format!("{} mins ago", n),
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(score: u32) -> RoundSummary {
        RoundSummary {
            score,
            makes: score / 2,
            attempts: score,
            best_combo: 1,
            accuracy: 50.0,
            completed_tasks: Vec::new(),
        }
    }

    #[test]
    fn test_sorted_and_capped() {
        let mut board = Leaderboard::new();
        for (i, score) in [10, 40, 20, 30, 2, 8, 16, 12, 6, 4, 14].iter().enumerate() {
            board.add_result(&round(*score), i as f64);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(40));
        assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
        // 2 fell off the bottom
        assert_eq!(board.entries.last().map(|e| e.score), Some(4));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.add_result(&round(0), 0.0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_rank_and_ties() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_result(&round(10), 1.0), Some(1));
        assert_eq!(board.add_result(&round(20), 2.0), Some(1));
        assert_eq!(board.potential_rank(10), Some(3));
        assert_eq!(board.add_result(&round(10), 3.0), Some(3));
        assert_eq!(board.entries[1].timestamp, 1.0);
    }

    #[test]
    fn test_full_table_rejects_low_score() {
        let mut board = Leaderboard::new();
        for i in 1..=MAX_ENTRIES as u32 {
            board.add_result(&round(i * 10), 0.0);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(11), Some(10));
    }

    #[test]
    fn test_format_age() {
        let now = 10.0 * 86_400_000.0;
        assert_eq!(format_age(now - 5_000.0, now), "Just now");
        assert_eq!(format_age(now - 180_000.0, now), "3 mins ago");
        assert_eq!(format_age(now - 3_600_000.0, now), "1 hour ago");
        assert_eq!(format_age(now - 86_400_000.0, now), "Yesterday");
        assert_eq!(format_age(now - 3.0 * 86_400_000.0, now), "3 days ago");
    }
}
