use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Daily,
    Marathon,
    SolutionHunt,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Daily
    }
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Daily => "daily",
            GameMode::Marathon => "marathon",
            GameMode::SolutionHunt => "solutionhunt",
        }
    }

    /// Solution hunt has no timed variant.
    pub fn supports_speedrun(&self) -> bool {
        !matches!(self, GameMode::SolutionHunt)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode '{0}' (expected daily, marathon or solutionhunt)")]
pub struct ParseModeError(pub String);

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(GameMode::Daily),
            "marathon" => Ok(GameMode::Marathon),
            "solutionhunt" => Ok(GameMode::SolutionHunt),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Standard,
    Speedrun,
}

impl Variant {
    pub fn from_speedrun(speedrun_enabled: bool) -> Variant {
        if speedrun_enabled {
            Variant::Speedrun
        } else {
            Variant::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Speedrun => "speedrun",
        }
    }
}

/// Storage key for one (mode, variant) pair, e.g. `daily_speedrun`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsKey {
    pub mode: GameMode,
    pub variant: Variant,
}

impl StatsKey {
    pub fn for_mode(mode: GameMode, speedrun_enabled: bool) -> StatsKey {
        let variant = if mode.supports_speedrun() {
            Variant::from_speedrun(speedrun_enabled)
        } else {
            Variant::Standard
        };
        StatsKey { mode, variant }
    }

    pub fn is_speedrun(&self) -> bool {
        self.variant == Variant::Speedrun
    }
}

impl fmt::Display for StatsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.mode.as_str(), self.variant.as_str())
    }
}
