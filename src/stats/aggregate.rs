use crate::model::{AggregatedStats, GameRecord};

/// Folds one record into the running aggregate for its stats key.
///
/// A missing `previous` starts from the zero aggregate. Every record bumps
/// `total_games`; only solved records with 1..=6 guesses touch the guess
/// totals, and only positive solve times touch the time totals.
pub fn update(previous: Option<AggregatedStats>, record: &GameRecord, now_ms: i64) -> AggregatedStats {
    let mut stats = previous.unwrap_or_default();

    stats.total_games += 1;

    if let Some(guesses) = record.tracked_guesses() {
        stats.solved_games += 1;
        stats.total_guesses += guesses as u64;
        stats.guess_distribution.record(guesses);
    }

    if let Some(solve_time_ms) = record.valid_solve_time() {
        stats.total_time_ms += solve_time_ms;
        stats.fastest_time_ms = Some(
            stats
                .fastest_time_ms
                .map_or(solve_time_ms, |fastest| fastest.min(solve_time_ms)),
        );
        stats.slowest_time_ms = Some(
            stats
                .slowest_time_ms
                .map_or(solve_time_ms, |slowest| slowest.max(solve_time_ms)),
        );
    }

    stats.last_updated = now_ms;
    stats
}

/// Folds a whole list, oldest first.
pub fn fold_all<'a, I>(records: I, now_ms: i64) -> Option<AggregatedStats>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    records
        .into_iter()
        .fold(None, |stats, record| Some(update(stats, record, now_ms)))
}
