use itertools::Itertools;

use super::calculator::calculate_advanced_stats;
use super::numbers::{mean, median, min_max, round2};
use crate::model::{GameRecord, MarathonStageStats, MarathonSummary, MAX_STAGE_BOARDS};

/// Per-stage statistics, one bucket per board count. Without speedrun the
/// time fields are dropped before computing.
pub fn calculate_marathon_stage_stats(
    stage_records: &[GameRecord],
    speedrun_enabled: bool,
) -> MarathonStageStats {
    let mut stats = MarathonStageStats::default();

    for boards in 1..=MAX_STAGE_BOARDS {
        let bucket = stage_records
            .iter()
            .filter(|r| r.stage_boards == Some(boards))
            .map(|r| strip_times(r, speedrun_enabled))
            .collect_vec();

        let stage = calculate_advanced_stats(&bucket);
        stats.totals.total_stages += bucket
            .iter()
            .filter(|r| r.solved && r.guesses.is_some_and(|g| g > 0))
            .count() as u32;
        stats.by_stage.insert(boards, stage);
    }

    stats
}

/// Whole-run summary over full-marathon records. Guesses and times are
/// run totals, so there is no distribution.
pub fn calculate_marathon_summary(
    full_marathon_records: &[GameRecord],
    speedrun_enabled: bool,
) -> MarathonSummary {
    let runs = full_marathon_records
        .iter()
        .filter(|r| r.is_full_marathon && r.solved)
        .collect_vec();

    let guesses = runs
        .iter()
        .filter_map(|r| r.guesses)
        .filter(|g| *g > 0)
        .collect_vec();
    let (best_guesses, worst_guesses) = min_max(guesses.iter().copied());

    let mut summary = MarathonSummary {
        total_runs: runs.len() as u32,
        average_guesses: mean(guesses.iter().map(|g| *g as f64)).map_or(0.0, round2),
        best_guesses,
        worst_guesses,
        ..Default::default()
    };

    if speedrun_enabled {
        let times = runs.iter().filter_map(|r| r.valid_solve_time()).collect_vec();
        let (fastest, slowest) = min_max(times.iter().copied());
        summary.average_time_ms = mean(times.iter().map(|ms| *ms as f64));
        summary.median_time_ms = median(times.iter().map(|ms| *ms as f64));
        summary.fastest_time_ms = fastest;
        summary.slowest_time_ms = slowest;
    }

    summary
}

fn strip_times(record: &GameRecord, speedrun_enabled: bool) -> GameRecord {
    let mut record = record.clone();
    if !speedrun_enabled {
        record.solve_time_ms = None;
    }
    record
}
