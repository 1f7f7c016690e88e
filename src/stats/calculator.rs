use itertools::Itertools;

use super::numbers::{mean, median, min_max, percentage, round2};
use crate::model::{ByGuessCount, DerivedStats, GameRecord, GuessDistribution};

const SUB_30_MS: u64 = 30_000;
const SUB_60_MS: u64 = 60_000;
const SUB_120_MS: u64 = 120_000;

/// Recomputes the full statistics object from raw records. Pure; an empty
/// list yields `DerivedStats::default()`.
pub fn calculate_advanced_stats(records: &[GameRecord]) -> DerivedStats {
    let total_games = records.len() as u32;
    let solved = records.iter().filter(|r| r.solved).collect_vec();
    let solved_games = solved.len() as u32;

    let win_rate = if total_games == 0 {
        0.0
    } else {
        round2(solved_games as f64 / total_games as f64 * 100.0)
    };

    let guesses = solved
        .iter()
        .filter_map(|r| r.guesses)
        .filter(|g| *g > 0)
        .collect_vec();

    let average_guesses = mean(guesses.iter().map(|g| *g as f64)).map_or(0.0, round2);
    let median_guesses = median(guesses.iter().map(|g| *g as f64)).unwrap_or(0.0);
    let (best_performance, worst_performance) = min_max(guesses.iter().copied());

    let mut guess_distribution = GuessDistribution::default();
    for g in &guesses {
        guess_distribution.record(*g);
    }

    let perfect_games = guess_distribution.count(1);
    let in_3 = guess_distribution.at_most(3);
    let in_4 = guess_distribution.at_most(4);

    let timed = solved
        .iter()
        .filter_map(|r| r.valid_solve_time().map(|ms| (*r, ms)))
        .collect_vec();
    let times = timed.iter().map(|(_, ms)| *ms).collect_vec();

    let average_time_ms = mean(times.iter().map(|ms| *ms as f64));
    let median_time_ms = median(times.iter().map(|ms| *ms as f64));
    let (fastest_time_ms, slowest_time_ms) = min_max(times.iter().copied());

    let average_time_per_guess = match average_time_ms {
        Some(time) if average_guesses > 0.0 => Some(round2(time / average_guesses)),
        _ => None,
    };

    let under = |limit: u64| times.iter().filter(|ms| **ms < limit).count() as u32;
    let sub_30_count = under(SUB_30_MS);
    let sub_60_count = under(SUB_60_MS);
    let sub_120_count = under(SUB_120_MS);

    let avg_time_ms_by_guesses = ByGuessCount::from_fn(|g| {
        mean(
            timed
                .iter()
                .filter(|(r, _)| r.guesses == Some(g))
                .map(|(_, ms)| *ms as f64),
        )
        .map(|avg| avg.round() as u64)
    });

    DerivedStats {
        total_games,
        solved_games,
        win_rate,
        average_guesses,
        median_guesses,
        guess_distribution,
        best_performance,
        worst_performance,
        perfect_games,
        perfect_games_percentage: percentage_of_solved(perfect_games, solved_games),
        games_solved_in_3_or_fewer: in_3,
        games_solved_in_3_or_fewer_percentage: percentage_of_solved(in_3, solved_games),
        games_solved_in_4_or_fewer: in_4,
        games_solved_in_4_or_fewer_percentage: percentage_of_solved(in_4, solved_games),
        average_time_ms,
        median_time_ms,
        fastest_time_ms,
        slowest_time_ms,
        average_time_per_guess,
        sub_30_count,
        sub_60_count,
        sub_120_count,
        sub_30_percentage: percentage(sub_30_count, solved_games),
        sub_60_percentage: percentage(sub_60_count, solved_games),
        sub_120_percentage: percentage(sub_120_count, solved_games),
        avg_time_ms_by_guesses,
    }
}

fn percentage_of_solved(count: u32, solved_games: u32) -> f64 {
    if solved_games == 0 {
        0.0
    } else {
        round2(count as f64 / solved_games as f64 * 100.0)
    }
}
