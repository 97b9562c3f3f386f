//! Admin login and the authorization gate.
//!
//! Only one account exists, configured under `[auth]`. A successful login
//! produces a [`Session`]; the CLI keeps it in `session.json` until logout.
//! Listing and mutating commands go through [`AuthGate::guard`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Check credentials against the configured admin account.
pub fn login(auth: &AuthConfig, username: &str, password: &str) -> Result<Session> {
    if username != auth.username || password != auth.password {
        tracing::warn!(username, "rejected login");
        return Err(Error::InvalidCredentials);
    }
    Ok(Session {
        username: username.to_string(),
        logged_in_at: Utc::now(),
    })
}

pub fn load_session(storage: &Storage) -> Result<Option<Session>> {
    storage.read_json(&storage.session_file())
}

pub fn persist_session(storage: &Storage, session: &Session) -> Result<()> {
    storage.write_json(&storage.session_file(), session)
}

/// Remove the stored session. Returns whether one existed.
pub fn clear_session(storage: &Storage) -> Result<bool> {
    storage.remove_file(&storage.session_file())
}

/// Guard in front of every protected operation.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    session: Option<Session>,
}

impl AuthGate {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    /// Gate built from the session stored on disk. A session for any account
    /// other than the configured one is ignored.
    pub fn from_storage(storage: &Storage, auth: &AuthConfig) -> Result<Self> {
        let session = load_session(storage)?.filter(|session| {
            let current = session.username == auth.username;
            if !current {
                tracing::debug!(username = %session.username, "ignoring stale session");
            }
            current
        });
        Ok(Self::new(session))
    }

    pub fn is_authorized(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn require(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::Unauthorized)
    }

    /// Run `operation` only when a session is present.
    pub fn guard<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&Session) -> Result<T>,
    {
        let session = self.require()?;
        operation(session)
    }
}
