//! Configuration loading and management
//!
//! Handles parsing of `.teamdesk.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file at the project root
pub const CONFIG_FILE: &str = ".teamdesk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the record files live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Admin credentials
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory, relative to the project root
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Roster file name
    #[serde(default = "default_players")]
    pub players: String,

    /// Task list file name
    #[serde(default = "default_tasks")]
    pub tasks: String,

    /// Match results file name
    #[serde(default = "default_matches")]
    pub matches: String,

    /// Give records without an `id` their line index when loading
    #[serde(default = "default_true")]
    pub auto_id: bool,
}

fn default_dir() -> String {
    ".teamdesk".to_string()
}

fn default_players() -> String {
    "players.jsonl".to_string()
}

fn default_tasks() -> String {
    "tasks.jsonl".to_string()
}

fn default_matches() -> String {
    "matches.jsonl".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            players: default_players(),
            tasks: default_tasks(),
            matches: default_matches(),
            auto_id: true,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_admin")]
    pub username: String,

    #[serde(default = "default_admin")]
    pub password: String,
}

fn default_admin() -> String {
    "admin".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_admin(),
            password: default_admin(),
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.dir.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "storage.dir cannot be empty".to_string(),
            ));
        }

        let files = [
            ("storage.players", &self.players),
            ("storage.tasks", &self.tasks),
            ("storage.matches", &self.matches),
        ];
        let mut seen = std::collections::HashSet::new();
        for (field, name) in files {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "{field} cannot be empty"
                )));
            }
            if trimmed.contains('/') || trimmed.contains('\\') {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "{field} must be a file name, not a path: '{trimmed}'"
                )));
            }
            if !seen.insert(trimmed) {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "{field} reuses file '{trimmed}'"
                )));
            }
        }
        Ok(())
    }
}

impl AuthConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.username.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "auth.username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `.teamdesk.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the project root, or return defaults when the
    /// file is absent
    pub fn load_from_root(root: &Path) -> crate::error::Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Absolute data directory for a project root
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.storage.dir)
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.storage.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.storage.dir, ".teamdesk");
        assert_eq!(cfg.storage.players, "players.jsonl");
        assert_eq!(cfg.storage.tasks, "tasks.jsonl");
        assert_eq!(cfg.storage.matches, "matches.jsonl");
        assert!(cfg.storage.auto_id);
        assert_eq!(cfg.auth.username, "admin");
        assert_eq!(cfg.auth.password, "admin");
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
[storage]
dir = "data"
players = "team_roster.txt"
auto_id = false

[auth]
username = "coach"
password = "hunter2"
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.storage.dir, "data");
        assert_eq!(cfg.storage.players, "team_roster.txt");
        assert_eq!(cfg.storage.tasks, "tasks.jsonl");
        assert!(!cfg.storage.auto_id);
        assert_eq!(cfg.auth.username, "coach");
        assert_eq!(cfg.auth.password, "hunter2");
        assert_eq!(cfg.data_dir(dir.path()), dir.path().join("data"));
    }

    #[test]
    fn duplicate_file_names_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[storage]\ntasks = \"players.jsonl\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(message) => {
                assert!(message.contains("storage.tasks"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_username_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[auth]\nusername = \"  \"").expect("write config");

        assert!(matches!(
            Config::load(&path),
            Err(crate::error::Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn load_from_root_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_root(dir.path()).expect("defaults");
        assert_eq!(cfg.storage.dir, ".teamdesk");
    }
}
