mod aggregated_stats;
mod by_guess_count;
mod derived_stats;
mod game_mode;
mod game_record;

pub use aggregated_stats::AggregatedStats;
pub use by_guess_count::{is_valid_guess_count, ByGuessCount, GuessDistribution, MAX_GUESSES};
pub use derived_stats::{DerivedStats, MarathonStageStats, MarathonSummary, StageTotals, StreakStats};
pub use game_mode::{GameMode, ParseModeError, StatsKey, Variant};
pub use game_record::{GameRecord, DATE_FORMAT, MAX_STAGE_BOARDS};
