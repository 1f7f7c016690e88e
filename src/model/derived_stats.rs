use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::by_guess_count::{ByGuessCount, GuessDistribution};

/// Report-time statistics, recomputed from the full record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub total_games: u32,
    pub solved_games: u32,
    pub win_rate: f64,
    pub average_guesses: f64,
    pub median_guesses: f64,
    pub guess_distribution: GuessDistribution,
    pub best_performance: Option<u32>,
    pub worst_performance: Option<u32>,
    pub perfect_games: u32,
    pub perfect_games_percentage: f64,
    #[serde(rename = "gamesSolvedIn3OrFewer")]
    pub games_solved_in_3_or_fewer: u32,
    #[serde(rename = "gamesSolvedIn3OrFewerPercentage")]
    pub games_solved_in_3_or_fewer_percentage: f64,
    #[serde(rename = "gamesSolvedIn4OrFewer")]
    pub games_solved_in_4_or_fewer: u32,
    #[serde(rename = "gamesSolvedIn4OrFewerPercentage")]
    pub games_solved_in_4_or_fewer_percentage: f64,
    pub average_time_ms: Option<f64>,
    pub median_time_ms: Option<f64>,
    pub fastest_time_ms: Option<u64>,
    pub slowest_time_ms: Option<u64>,
    pub average_time_per_guess: Option<f64>,
    #[serde(rename = "sub30Count")]
    pub sub_30_count: u32,
    #[serde(rename = "sub60Count")]
    pub sub_60_count: u32,
    #[serde(rename = "sub120Count")]
    pub sub_120_count: u32,
    #[serde(rename = "sub30Percentage")]
    pub sub_30_percentage: f64,
    #[serde(rename = "sub60Percentage")]
    pub sub_60_percentage: f64,
    #[serde(rename = "sub120Percentage")]
    pub sub_120_percentage: f64,
    pub avg_time_ms_by_guesses: ByGuessCount<Option<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StageTotals {
    pub total_stages: u32,
}

/// Per-stage breakdown of marathon play, keyed by board count 1..=4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarathonStageStats {
    pub by_stage: BTreeMap<u8, DerivedStats>,
    pub totals: StageTotals,
}

impl MarathonStageStats {
    pub fn stage(&self, stage_boards: u8) -> Option<&DerivedStats> {
        self.by_stage.get(&stage_boards)
    }
}

/// Whole-run marathon results; guesses and times are totals across stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarathonSummary {
    pub total_runs: u32,
    pub average_guesses: f64,
    pub best_guesses: Option<u32>,
    pub worst_guesses: Option<u32>,
    pub average_time_ms: Option<f64>,
    pub median_time_ms: Option<f64>,
    pub fastest_time_ms: Option<u64>,
    pub slowest_time_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_solved_date: Option<NaiveDate>,
}
