use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides `database_path`
pub const DB_ENV_VAR: &str = "CLINIC_TUI_DB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding patients, visits and followups
    pub database_path: String,
    /// Pre-filled path for the import/export prompt
    pub export_path: String,
    /// Pre-filled output file for reports
    pub report_path: String,
    /// `tracing` filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "clinic_data.db".to_string(),
            export_path: "patients.csv".to_string(),
            report_path: "visit_report.csv".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".clinic-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Log file next to the config, or in the working directory without HOME
    pub fn log_path() -> PathBuf {
        Self::config_dir()
            .map(|dir| dir.join("clinic-tui.log"))
            .unwrap_or_else(|| PathBuf::from("clinic-tui.log"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Load the saved config or the defaults.
    ///
    /// `CLINIC_TUI_DB` replaces the database path either way.
    pub fn load_or_default() -> Config {
        let mut config = Self::load().unwrap_or_default();
        config.apply_env(env::var(DB_ENV_VAR).ok());
        config
    }

    /// Write the defaults if no config file exists yet, so there is one to edit
    pub fn ensure_saved() -> anyhow::Result<()> {
        match Self::config_path() {
            Some(path) if !path.exists() => Config::default().save(),
            _ => Ok(()),
        }
    }

    fn apply_env(&mut self, db_override: Option<String>) {
        if let Some(path) = db_override.filter(|p| !p.trim().is_empty()) {
            self.database_path = path;
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"database_path": "/tmp/x.db"}"#).unwrap();
        assert_eq!(config.database_path, "/tmp/x.db");
        assert_eq!(config.export_path, "patients.csv");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env(Some("  ".to_string()));
        assert_eq!(config.database_path, "clinic_data.db");

        config.apply_env(Some("/data/clinic.db".to_string()));
        assert_eq!(config.database_path, "/data/clinic.db");
    }
}
