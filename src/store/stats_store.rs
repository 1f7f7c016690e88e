use chrono::Utc;
use log::{debug, error, trace, warn};
use serde_json::Value;

use super::error::StoreError;
use super::persistence::Persistence;
use crate::model::{
    AggregatedStats, DerivedStats, GameMode, GameRecord, MarathonStageStats, MarathonSummary,
    StatsKey,
};
use crate::stats;

const GAMES: &str = "games";
const STAGES: &str = "stages";
const AGGREGATED: &str = "aggregated";

/// Daily games only count toward stats when played on a single board.
pub fn should_track(mode: GameMode, num_boards: u8) -> bool {
    match mode {
        GameMode::Daily => num_boards == 1,
        GameMode::Marathon | GameMode::SolutionHunt => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Recorded,
    Untracked,
    NoUser,
    /// Claims a solve without a 1..=6 guess count; nothing is written.
    Rejected,
    Failed,
}

/// Reads and writes game records and per-key aggregates for the signed-in
/// user. Tracking failures are logged and swallowed; read failures come
/// back as `None` so callers can tell them apart from "no games yet".
///
/// The aggregate is rewritten whole on every save, so two writers racing on
/// the same key can lose an update.
pub struct StatsStore<P: Persistence> {
    persistence: P,
    user_id: Option<String>,
}

impl<P: Persistence> StatsStore<P> {
    pub fn new(persistence: P) -> Self {
        StatsStore {
            persistence,
            user_id: None,
        }
    }

    pub fn with_user(persistence: P, user_id: impl Into<String>) -> Self {
        StatsStore {
            persistence,
            user_id: Some(user_id.into()),
        }
    }

    pub fn set_user(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    fn path(&self, key: StatsKey, leaf: &str) -> Option<String> {
        self.user_id
            .as_ref()
            .map(|user| format!("users/{}/stats/{}/{}", user, key, leaf))
    }

    /// Stores one finished game and folds it into the key's aggregate.
    /// Marathon per-stage records go to the stage list; everything else,
    /// including full-marathon summaries, goes to the game list.
    ///
    /// A record that fails [`should_track`] is neither appended nor folded
    /// into the aggregate, so the list and the aggregate always describe the
    /// same games. A per-puzzle solve without a valid guess count is
    /// rejected the same way.
    pub fn save(
        &mut self,
        mode: GameMode,
        speedrun_enabled: bool,
        num_boards: u8,
        record: GameRecord,
    ) -> TrackOutcome {
        let key = StatsKey::for_mode(mode, speedrun_enabled);
        let record = record.sanitized();
        let leaf = if mode == GameMode::Marathon && record.is_stage() {
            STAGES
        } else {
            GAMES
        };

        let Some(path) = self.path(key, leaf) else {
            trace!(target: "stats_store", "No user, not tracking {} game", key);
            return TrackOutcome::NoUser;
        };

        if !should_track(mode, num_boards) {
            debug!(target: "stats_store", "Not tracking {} game on {} boards", key, num_boards);
            return TrackOutcome::Untracked;
        }

        if record.is_malformed_solve() {
            warn!(target: "stats_store", "Rejecting {} solve with guesses {:?}", key, record.guesses);
            return TrackOutcome::Rejected;
        }

        let pushed = serde_json::to_value(&record)
            .map_err(StoreError::from)
            .and_then(|value| self.persistence.push(&path, value));
        if let Err(e) = pushed {
            error!(target: "stats_store", "Failed to save {} record: {}", key, e);
            return TrackOutcome::Failed;
        }

        if let Err(e) = self.update_aggregate(key, &record) {
            error!(target: "stats_store", "Failed to update {} aggregate: {}", key, e);
        }

        TrackOutcome::Recorded
    }

    fn update_aggregate(&mut self, key: StatsKey, record: &GameRecord) -> Result<(), StoreError> {
        let Some(path) = self.path(key, AGGREGATED) else {
            return Ok(());
        };
        let previous = match self.persistence.get(&path)? {
            Some(Value::Null) | None => None,
            Some(value) => Some(serde_json::from_value::<AggregatedStats>(value)?),
        };
        let next = stats::update(previous, record, Utc::now().timestamp_millis());
        self.persistence.set(&path, serde_json::to_value(&next)?)
    }

    fn load_list(&self, key: StatsKey, leaf: &str) -> Option<Vec<GameRecord>> {
        let Some(path) = self.path(key, leaf) else {
            return Some(Vec::new());
        };

        let value = match self.persistence.get(&path) {
            Ok(value) => value,
            Err(e) => {
                error!(target: "stats_store", "Failed to load {}: {}", path, e);
                return None;
            }
        };

        let entries: Vec<Value> = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                error!(target: "stats_store", "Expected a record list at {}, found {}", path, other);
                return None;
            }
        };

        let mut records: Vec<GameRecord> = entries
            .into_iter()
            .filter(|entry| !entry.is_null())
            .filter_map(|entry| match serde_json::from_value::<GameRecord>(entry) {
                Ok(record) => Some(record.sanitized()),
                Err(e) => {
                    warn!(target: "stats_store", "Skipping malformed record under {}: {}", path, e);
                    None
                }
            })
            .filter(|record| {
                if record.is_malformed_solve() {
                    warn!(target: "stats_store", "Skipping solve without a guess count under {}", path);
                }
                !record.is_malformed_solve()
            })
            .collect();
        records.sort_by_key(|record| record.timestamp);
        Some(records)
    }

    /// All game records for a key, oldest first. `None` means the read failed.
    pub fn load_all(&self, mode: GameMode, speedrun_enabled: bool) -> Option<Vec<GameRecord>> {
        self.load_list(StatsKey::for_mode(mode, speedrun_enabled), GAMES)
    }

    pub fn load_marathon_stages(&self, speedrun_enabled: bool) -> Option<Vec<GameRecord>> {
        self.load_list(StatsKey::for_mode(GameMode::Marathon, speedrun_enabled), STAGES)
    }

    pub fn load_aggregate(&self, mode: GameMode, speedrun_enabled: bool) -> Option<AggregatedStats> {
        let key = StatsKey::for_mode(mode, speedrun_enabled);
        let path = self.path(key, AGGREGATED)?;
        match self.persistence.get(&path) {
            Ok(None) | Ok(Some(Value::Null)) => None,
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(aggregate) => Some(aggregate),
                Err(e) => {
                    error!(target: "stats_store", "Malformed aggregate at {}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                error!(target: "stats_store", "Failed to load aggregate at {}: {}", path, e);
                None
            }
        }
    }

    pub fn calculate_advanced_stats(
        &self,
        mode: GameMode,
        speedrun_enabled: bool,
    ) -> Option<DerivedStats> {
        self.load_all(mode, speedrun_enabled)
            .map(|records| stats::calculate_advanced_stats(&records))
    }

    pub fn calculate_marathon_stage_stats(&self, speedrun_enabled: bool) -> Option<MarathonStageStats> {
        self.load_marathon_stages(speedrun_enabled)
            .map(|records| stats::calculate_marathon_stage_stats(&records, speedrun_enabled))
    }

    pub fn calculate_marathon_summary_from_games(
        &self,
        speedrun_enabled: bool,
    ) -> Option<MarathonSummary> {
        self.load_all(GameMode::Marathon, speedrun_enabled)
            .map(|records| stats::calculate_marathon_summary(&records, speedrun_enabled))
    }
}
