pub mod aggregate;
pub mod calculator;
pub mod marathon;
pub mod numbers;
pub mod streaks;

pub use aggregate::update;
pub use calculator::calculate_advanced_stats;
pub use marathon::{calculate_marathon_stage_stats, calculate_marathon_summary};
pub use streaks::calculate_streaks;
