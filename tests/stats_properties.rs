use chrono::NaiveDate;
use wuzzle_stats::model::GameRecord;
use wuzzle_stats::stats::{aggregate, calculate_advanced_stats, calculate_marathon_stage_stats};
use wuzzle_stats::store::MemoryPersistence;
use wuzzle_stats::{format_time, GameMode, StatsStore};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
}

fn mixed_records() -> Vec<GameRecord> {
    vec![
        GameRecord::solved(date(1), 1, 1).with_solve_time(12_000),
        GameRecord::solved(date(2), 3, 2).with_solve_time(45_500),
        GameRecord::failed(date(3), 3),
        GameRecord::solved(date(4), 5, 4),
        GameRecord::solved(date(5), 3, 5).with_solve_time(119_999),
        GameRecord::solved(date(6), 6, 6).with_solve_time(250_000),
    ]
}

#[test]
fn distribution_sums_to_solved_games_both_ways() {
    let records = mixed_records();
    let derived = calculate_advanced_stats(&records);
    assert_eq!(derived.guess_distribution.total(), derived.solved_games);

    let folded = aggregate::fold_all(&records, 0).unwrap();
    assert_eq!(folded.guess_distribution.total(), folded.solved_games);
}

#[test]
fn incremental_and_batch_agree() {
    let records = mixed_records();
    let derived = calculate_advanced_stats(&records);
    let folded = aggregate::fold_all(&records, 0).unwrap();

    assert_eq!(folded.total_games, derived.total_games);
    assert_eq!(folded.solved_games, derived.solved_games);
    assert_eq!(folded.guess_distribution, derived.guess_distribution);
    assert_eq!(folded.total_guesses, 18);
    assert_eq!(derived.average_guesses, 3.6);
    assert_eq!(folded.average_guesses(), Some(3.6));
}

#[test]
fn mixed_report() {
    let stats = calculate_advanced_stats(&mixed_records());
    assert_eq!(stats.total_games, 6);
    assert_eq!(stats.solved_games, 5);
    assert_eq!(stats.win_rate, 83.33);
    assert_eq!(stats.median_guesses, 3.0);
    assert_eq!(stats.perfect_games, 1);
    assert_eq!(stats.perfect_games_percentage, 20.0);
    assert_eq!(stats.games_solved_in_3_or_fewer, 3);
    assert_eq!(stats.games_solved_in_4_or_fewer_percentage, 60.0);
    assert_eq!(stats.sub_30_count, 1);
    assert_eq!(stats.sub_60_count, 2);
    assert_eq!(stats.sub_120_count, 3);
    assert_eq!(stats.fastest_time_ms, Some(12_000));
    assert_eq!(stats.slowest_time_ms, Some(250_000));
    assert_eq!(stats.avg_time_ms_by_guesses.get(3), Some(&Some(82_750)));
    assert_eq!(stats.avg_time_ms_by_guesses.get(5), Some(&None));
}

#[test]
fn stage_bucketing_scenario() {
    let stage = |boards: u8, guesses: u32| {
        GameRecord::solved(date(1), guesses, 0).with_stage(boards - 1, boards)
    };
    let stats =
        calculate_marathon_stage_stats(&[stage(1, 3), stage(2, 5), stage(1, 2)], false);
    assert_eq!(stats.stage(1).unwrap().solved_games, 2);
    assert_eq!(stats.stage(1).unwrap().average_guesses, 2.5);
    assert_eq!(stats.stage(2).unwrap().solved_games, 1);
}

#[test]
fn format_time_scenarios() {
    assert_eq!(format_time(Some(45_000)), "45s");
    assert_eq!(format_time(Some(83_000)), "1m 23s");
    assert_eq!(format_time(None), "N/A");
}

#[test]
fn store_reports_match_pure_calculation() {
    let mut store = StatsStore::with_user(MemoryPersistence::new(), "u-42");
    for record in mixed_records() {
        store.save(GameMode::Daily, true, 1, record);
    }

    let from_store = store.calculate_advanced_stats(GameMode::Daily, true).unwrap();
    assert_eq!(from_store, calculate_advanced_stats(&mixed_records()));

    let aggregate = store.load_aggregate(GameMode::Daily, true).unwrap();
    assert_eq!(aggregate.total_games, 6);
    assert_eq!(aggregate.total_time_ms, 12_000 + 45_500 + 119_999 + 250_000);
}
