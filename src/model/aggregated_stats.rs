use serde::{Deserialize, Serialize};

use super::by_guess_count::GuessDistribution;

/// Running totals for one stats key, maintained one record at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatedStats {
    pub total_games: u32,
    pub solved_games: u32,
    pub total_guesses: u64,
    pub guess_distribution: GuessDistribution,
    pub total_time_ms: u64,
    pub fastest_time_ms: Option<u64>,
    pub slowest_time_ms: Option<u64>,
    pub last_updated: i64,
}

impl AggregatedStats {
    pub fn average_guesses(&self) -> Option<f64> {
        if self.solved_games == 0 {
            None
        } else {
            Some(self.total_guesses as f64 / self.solved_games as f64)
        }
    }
}
