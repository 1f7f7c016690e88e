pub mod helpers;
pub mod model;
pub mod settings;
pub mod stats;
pub mod store;

pub use helpers::format_time;
pub use model::{AggregatedStats, DerivedStats, GameMode, GameRecord, StatsKey};
pub use store::{should_track, StatsStore};
