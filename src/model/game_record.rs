use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::by_guess_count::is_valid_guess_count;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_STAGE_BOARDS: u8 = 4;

/// One completed or attempted puzzle, as stored under a stats key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub date_string: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guesses: Option<u32>,

    #[serde(default)]
    pub solved: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solve_time_ms: Option<u64>,

    #[serde(default)]
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_index: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_boards: Option<u8>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_full_marathon: bool,
}

impl GameRecord {
    pub fn solved(date: NaiveDate, guesses: u32, timestamp: i64) -> Self {
        GameRecord {
            date_string: date.format(DATE_FORMAT).to_string(),
            guesses: Some(guesses),
            solved: true,
            timestamp,
            ..Default::default()
        }
    }

    pub fn failed(date: NaiveDate, timestamp: i64) -> Self {
        GameRecord {
            date_string: date.format(DATE_FORMAT).to_string(),
            solved: false,
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_solve_time(mut self, solve_time_ms: u64) -> Self {
        self.solve_time_ms = Some(solve_time_ms);
        self
    }

    pub fn with_stage(mut self, stage_index: u8, stage_boards: u8) -> Self {
        self.stage_index = Some(stage_index);
        self.stage_boards = Some(stage_boards);
        self
    }

    pub fn as_full_marathon(mut self) -> Self {
        self.is_full_marathon = true;
        self
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_string, DATE_FORMAT).ok()
    }

    /// Guess count when the record counts as a solve for distribution math.
    pub fn tracked_guesses(&self) -> Option<u32> {
        match self.guesses {
            Some(guesses) if self.solved && is_valid_guess_count(guesses) => Some(guesses),
            _ => None,
        }
    }

    pub fn is_tracked_solve(&self) -> bool {
        self.tracked_guesses().is_some()
    }

    pub fn valid_solve_time(&self) -> Option<u64> {
        self.solve_time_ms.filter(|ms| *ms > 0)
    }

    /// A per-puzzle record claiming a solve without a 1..=6 guess count.
    /// Full-marathon summaries carry run totals and are exempt.
    pub fn is_malformed_solve(&self) -> bool {
        self.solved && !self.is_full_marathon && !self.is_tracked_solve()
    }

    pub fn is_stage(&self) -> bool {
        !self.is_full_marathon && self.stage_boards.is_some()
    }

    /// Coerces loosely shaped stored data into something the calculators
    /// can trust. Full-marathon summaries keep guess totals above six.
    pub fn sanitized(mut self) -> Self {
        self.guesses = self.guesses.filter(|g| *g > 0);
        if !self.is_full_marathon {
            self.guesses = self.guesses.filter(|g| is_valid_guess_count(*g));
        }
        self.solve_time_ms = self.valid_solve_time();
        self.stage_boards = self
            .stage_boards
            .filter(|boards| (1..=MAX_STAGE_BOARDS).contains(boards));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let record = GameRecord::solved(date(), 3, 1_700_000_000_000).with_solve_time(42_000);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "dateString": "2025-03-14",
                "guesses": 3,
                "solved": true,
                "solveTimeMs": 42000,
                "timestamp": 1_700_000_000_000i64,
            })
        );
    }

    #[test]
    fn test_loose_record_deserializes() {
        let record: GameRecord = serde_json::from_value(json!({
            "dateString": "2025-03-14",
            "solved": false,
            "timestamp": 5,
        }))
        .unwrap();
        assert_eq!(record.guesses, None);
        assert_eq!(record.solve_time_ms, None);
        assert!(!record.is_full_marathon);
        assert_eq!(record.date(), Some(date()));
    }

    #[test]
    fn test_tracked_guesses_requires_solved_and_range() {
        assert_eq!(GameRecord::solved(date(), 6, 0).tracked_guesses(), Some(6));
        assert_eq!(GameRecord::solved(date(), 7, 0).tracked_guesses(), None);
        assert_eq!(GameRecord::solved(date(), 0, 0).tracked_guesses(), None);

        let mut unsolved = GameRecord::solved(date(), 4, 0);
        unsolved.solved = false;
        assert_eq!(unsolved.tracked_guesses(), None);
    }

    #[test]
    fn test_sanitized_per_puzzle_record() {
        let mut record = GameRecord::solved(date(), 9, 0)
            .with_solve_time(0)
            .with_stage(0, 7);
        record = record.sanitized();
        assert_eq!(record.guesses, None);
        assert_eq!(record.solve_time_ms, None);
        assert_eq!(record.stage_boards, None);
        assert!(record.solved);
    }

    #[test]
    fn test_malformed_solve() {
        assert!(GameRecord::solved(date(), 9, 0).is_malformed_solve());
        assert!(GameRecord::solved(date(), 9, 0).sanitized().is_malformed_solve());
        assert!(!GameRecord::solved(date(), 4, 0).is_malformed_solve());
        assert!(!GameRecord::failed(date(), 0).is_malformed_solve());
        assert!(!GameRecord::solved(date(), 22, 0)
            .as_full_marathon()
            .is_malformed_solve());
    }

    #[test]
    fn test_sanitized_keeps_marathon_totals() {
        let record = GameRecord::solved(date(), 23, 0)
            .with_solve_time(310_000)
            .as_full_marathon()
            .sanitized();
        assert_eq!(record.guesses, Some(23));
        assert_eq!(record.solve_time_ms, Some(310_000));
    }
}
