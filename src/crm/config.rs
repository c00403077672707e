use crate::error::{CrmError, Result};
use crate::model::{STATUS_EXISTING, STATUS_NEW, STATUS_PROSPECT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXPORT_FILENAME: &str = "crm_data.txt";

/// Configuration for crm, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrmConfig {
    /// Status given to new customers when none is specified
    #[serde(default = "default_status")]
    pub default_status: String,

    /// File name used by `export` when no path is given
    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    /// Well-known statuses, in display order
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
}

fn default_status() -> String {
    STATUS_NEW.to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

fn default_statuses() -> Vec<String> {
    vec![
        STATUS_NEW.to_string(),
        STATUS_PROSPECT.to_string(),
        STATUS_EXISTING.to_string(),
    ]
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            default_status: default_status(),
            export_filename: default_export_filename(),
            statuses: default_statuses(),
        }
    }
}

impl CrmConfig {
    pub const KEYS: [&'static str; 3] = ["default-status", "export-filename", "statuses"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CrmError::Io)?;
        let config: CrmConfig = serde_json::from_str(&content).map_err(CrmError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CrmError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CrmError::Serialization)?;
        fs::write(config_path, content).map_err(CrmError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-status" => Some(self.default_status.clone()),
            "export-filename" => Some(self.export_filename.clone()),
            "statuses" => Some(self.statuses.join(", ")),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-status" => {
                self.default_status = value.trim().to_string();
            }
            "export-filename" => {
                let name = value.trim();
                if name.is_empty() {
                    return Err("export-filename cannot be empty".to_string());
                }
                self.export_filename = name.to_string();
            }
            "statuses" => {
                self.statuses = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// Position of `status` among the well-known statuses.
    pub fn status_rank(&self, status: &str) -> Option<usize> {
        self.statuses.iter().position(|s| s == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CrmConfig::default();
        assert_eq!(config.default_status, "New");
        assert_eq!(config.export_filename, "crm_data.txt");
        assert_eq!(config.statuses.len(), 3);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = CrmConfig::load(dir.path()).unwrap();
        assert_eq!(config, CrmConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("fresh");

        let mut config = CrmConfig::default();
        config.set("default-status", "Prospect").unwrap();
        config.save(&target).unwrap();

        let loaded = CrmConfig::load(&target).unwrap();
        assert_eq!(loaded.default_status, "Prospect");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"export_filename": "backup.txt"}"#,
        )
        .unwrap();

        let config = CrmConfig::load(dir.path()).unwrap();
        assert_eq!(config.export_filename, "backup.txt");
        assert_eq!(config.default_status, "New");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "not json").unwrap();
        assert!(matches!(
            CrmConfig::load(dir.path()),
            Err(CrmError::Serialization(_))
        ));
    }

    #[test]
    fn test_set_statuses_splits_on_commas() {
        let mut config = CrmConfig::default();
        config.set("statuses", "Lead, Won ,,Lost").unwrap();
        assert_eq!(config.statuses, vec!["Lead", "Won", "Lost"]);
        assert_eq!(config.get("statuses").unwrap(), "Lead, Won, Lost");
        assert_eq!(config.status_rank("Won"), Some(1));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = CrmConfig::default();
        assert!(config.get("colour").is_none());
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("export-filename", "  ").is_err());
    }
}
