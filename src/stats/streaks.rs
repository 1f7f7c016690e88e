use chrono::{Days, NaiveDate};
use itertools::Itertools;
use log::warn;
use std::collections::BTreeSet;

use crate::model::{GameRecord, StreakStats};

/// Consecutive-day streaks over solved daily records. The current streak
/// only survives while the last solve was today or yesterday.
pub fn calculate_streaks(records: &[GameRecord], today: NaiveDate) -> StreakStats {
    let solved_dates: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| r.solved)
        .filter_map(|r| {
            let date = r.date();
            if date.is_none() {
                warn!(target: "streaks", "Skipping record with bad date {:?}", r.date_string);
            }
            date
        })
        .collect();

    // (first day, last day) of each run of consecutive dates
    let runs = solved_dates
        .iter()
        .map(|date| (*date, *date))
        .coalesce(|(start, end), (next_start, next_end)| {
            if end.checked_add_days(Days::new(1)) == Some(next_start) {
                Ok((start, next_end))
            } else {
                Err(((start, end), (next_start, next_end)))
            }
        })
        .collect_vec();

    let run_length = |(start, end): (NaiveDate, NaiveDate)| (end - start).num_days() as u32 + 1;

    let max_streak = runs.iter().map(|run| run_length(*run)).max().unwrap_or(0);
    let current_streak = match runs.last() {
        Some(&(start, end)) if end == today || end.checked_add_days(Days::new(1)) == Some(today) => {
            run_length((start, end))
        }
        _ => 0,
    };

    StreakStats {
        current_streak,
        max_streak,
        last_solved_date: solved_dates.last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::UsingLogger;
    use test_context::test_context;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn solved_on(d: u32) -> GameRecord {
        GameRecord::solved(day(d), 3, d as i64)
    }

    #[test]
    fn test_no_records() {
        assert_eq!(calculate_streaks(&[], day(1)), StreakStats::default());
    }

    #[test]
    fn test_current_and_max() {
        let records = [
            solved_on(1),
            solved_on(2),
            solved_on(3),
            solved_on(4),
            solved_on(7),
            solved_on(8),
            GameRecord::failed(day(9), 9),
        ];

        let stats = calculate_streaks(&records, day(9));
        assert_eq!(stats.max_streak, 4);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.last_solved_date, Some(day(8)));

        let later = calculate_streaks(&records, day(10));
        assert_eq!(later.current_streak, 0);
        assert_eq!(later.max_streak, 4);
    }

    #[test]
    fn test_duplicate_days_count_once() {
        let records = [solved_on(5), solved_on(5), solved_on(6)];
        let stats = calculate_streaks(&records, day(6));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.max_streak, 2);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let records = [
            GameRecord::solved(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(), 4, 0),
            solved_on(1),
        ];
        let stats = calculate_streaks(&records, day(1));
        assert_eq!(stats.current_streak, 2);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_bad_dates_are_skipped(_: &mut UsingLogger) {
        let mut broken = solved_on(2);
        broken.date_string = "04/02/2025".to_string();
        let stats = calculate_streaks(&[solved_on(1), broken], day(1));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
    }
}
