use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "WUZZLE_DATA_DIR";
pub const USER_ENV: &str = "WUZZLE_USER";

const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default, alias = "user")]
    pub user_id: Option<String>,

    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: CURRENT_VERSION,
            user_id: None,
            data_dir: None,
            pretty_json: true,
        }
    }
}

impl Settings {
    /// Loads from the default location, then applies environment overrides.
    pub fn load() -> Self {
        let mut settings = Self::load_from(&Self::settings_path());
        settings.apply_env();
        settings
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(e) => {
                    warn!(target: "settings", "Ignoring unreadable settings at {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                debug!(target: "settings", "No settings at {}: {}", path.display(), e);
            }
        }
        Settings::default()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn apply_env(&mut self) {
        if let Some(user) = std::env::var(USER_ENV).ok().filter(|v| !v.is_empty()) {
            self.user_id = Some(user);
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Directory holding `settings.json`.
    pub fn config_dir() -> PathBuf {
        match std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wuzzle"),
        }
    }

    fn settings_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::config_dir)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join("stats.json")
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn migrate(&mut self) {
        match self.version {
            // v1 stored the user under "user"; the alias above reads it
            0 | 1 => {
                self.version = CURRENT_VERSION;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }
}
