//! Record types persisted by teamdesk.
//!
//! Every record is a flat JSON object with an integer `id`. Players carry an
//! ordered list of availability windows; tasks point at a player by name.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Player,
    Task,
    Match,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Player => "player",
            RecordKind::Task => "task",
            RecordKind::Match => "match",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Player => "Player",
            RecordKind::Task => "Task",
            RecordKind::Match => "Match",
        };
        f.write_str(label)
    }
}

/// A record stored one-per-line by [`crate::store::RecordStore`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: RecordKind;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// A declared window during which a player is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub start: String,
    pub end: String,
}

impl Availability {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
}

impl Record for Player {
    const KIND: RecordKind = RecordKind::Player;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: u64,
    pub task: String,
    pub assigned_to: String,
    pub due_date: String,
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// A played match. `result` is free text, usually "Win" or "Loss".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: u64,
    pub opponent: String,
    pub result: String,
    #[serde(default)]
    pub stats: String,
    #[serde(default)]
    pub description: String,
}

impl Match {
    pub fn is_win(&self) -> bool {
        self.result.eq_ignore_ascii_case("win")
    }
}

impl Record for Match {
    const KIND: RecordKind = RecordKind::Match;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Calendar entry derived from an availability window or a task due date.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start: String,
    pub end: String,
}

/// Submitted fields for creating or editing a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub name: String,
    pub role: String,
    pub availabilities: Vec<Availability>,
}

impl PlayerForm {
    pub(crate) fn into_player(self, id: u64) -> Player {
        Player {
            id,
            name: self.name,
            role: self.role,
            availabilities: self.availabilities,
        }
    }
}

/// Submitted fields for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub task: String,
    pub assigned_to: String,
    pub due_date: String,
}

impl TaskForm {
    pub(crate) fn into_task(self, id: u64) -> Task {
        Task {
            id,
            task: self.task,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
        }
    }
}

/// Submitted fields for creating or editing a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchForm {
    pub opponent: String,
    pub result: String,
    pub stats: String,
    pub description: String,
}

impl MatchForm {
    pub(crate) fn into_match(self, id: u64) -> Match {
        Match {
            id,
            opponent: self.opponent,
            result: self.result,
            stats: self.stats,
            description: self.description,
        }
    }
}
