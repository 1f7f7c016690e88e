mod error;
mod persistence;
mod stats_store;

pub use error::StoreError;
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
pub use stats_store::{should_track, StatsStore, TrackOutcome};
