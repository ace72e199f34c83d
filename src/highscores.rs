//! High score leaderboard
//!
//! Tracks the top 10 finished runs for the lifetime of the process. The
//! embedder may serialize it; nothing is written to disk here.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Snake length when the run ended
    pub length: usize,
    /// Internal clock when the run ended
    pub tick: u64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<RunSummary>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rank a score would take (1-indexed). Zero scores and scores that tie
    /// or trail a full board get no rank.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let index = self.entries.partition_point(|e| e.score >= score);
        (score > 0 && index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Record a run. Returns the rank achieved, or None if it didn't qualify.
    /// Ties keep the earlier run ahead.
    pub fn add_run(&mut self, run: RunSummary) -> Option<usize> {
        let rank = self.potential_rank(run.score)?;
        self.entries.insert(rank - 1, run);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
