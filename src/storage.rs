//! On-disk layout for teamdesk
//!
//! # Directory Structure
//!
//! ```text
//! <root>/
//!   .teamdesk.toml              # Optional configuration
//!   .teamdesk/                  # Data directory (storage.dir)
//!     players.jsonl             # Roster, one player per line
//!     tasks.jsonl               # Task list, one task per line
//!     matches.jsonl             # Match results, one match per line
//!     session.json              # Present while an admin is logged in
//!     team.lock                 # Advisory lock for mutating commands
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::Result;

const SESSION_FILE: &str = "session.json";
const LOCK_FILE: &str = "team.lock";

/// Resolved paths for one project
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    players: PathBuf,
    tasks: PathBuf,
    matches: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf, config: &Config) -> Self {
        let data_dir = config.data_dir(&root);
        Self {
            players: data_dir.join(&config.storage.players),
            tasks: data_dir.join(&config.storage.tasks),
            matches: data_dir.join(&config.storage.matches),
            data_dir,
        }
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn players_file(&self) -> &Path {
        &self.players
    }

    pub fn tasks_file(&self) -> &Path {
        &self.tasks
    }

    pub fn matches_file(&self) -> &Path {
        &self.matches
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE)
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Create the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Write JSON data atomically (write to temp, then rename)
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(path, json.as_bytes())
    }

    /// Read JSON data from a file, `None` when the file is absent
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Remove a file, ignoring a file that is already gone
    pub fn remove_file(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Write data using temp file + rename
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}
