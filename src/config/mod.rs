//! Optional workspace configuration: file locations and backup retention.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storage::json_backend::DEFAULT_RETENTION;

/// Well-known configuration file name, resolved in the working directory.
pub const CONFIG_FILE: &str = "expense_core.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_file: PathBuf,
    pub csv_file: PathBuf,
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("expenses.json"),
            csv_file: PathBuf::from("expenses.csv"),
            backup_retention: DEFAULT_RETENTION,
        }
    }
}

/// Loads and saves the optional configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration, falling back to defaults when the file is
    /// absent.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join(CONFIG_FILE));
        let config = manager.load().unwrap();
        assert_eq!(config.data_file, PathBuf::from("expenses.json"));
        assert_eq!(config.csv_file, PathBuf::from("expenses.csv"));
        assert_eq!(config.backup_retention, DEFAULT_RETENTION);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join(CONFIG_FILE));
        let config = Config {
            data_file: PathBuf::from("ledger.json"),
            csv_file: PathBuf::from("ledger.csv"),
            backup_retention: 2,
        };
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.data_file, PathBuf::from("ledger.json"));
        assert_eq!(loaded.backup_retention, 2);
    }
}
