//! The team working set: roster, task list and match results.
//!
//! `Team` owns one [`RecordStore`] per collection. Create and edit validate
//! the submitted form before anything is touched, so a rejected form never
//! leaves a partial change behind. Unknown ids surface as
//! [`Error::NotFound`](crate::error::Error::NotFound).

use serde::Serialize;

use crate::analytics::{self, Dashboard, ResultCount};
use crate::calendar;
use crate::error::Result;
use crate::model::{
    Availability, Event, Match, MatchForm, Player, PlayerForm, Task, TaskForm,
};
use crate::storage::Storage;
use crate::store::RecordStore;
use crate::validate;

#[derive(Debug, Clone)]
pub struct Team {
    players: RecordStore<Player>,
    tasks: RecordStore<Task>,
    matches: RecordStore<Match>,
}

/// How many records `seed_defaults` wrote per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub players: usize,
    pub tasks: usize,
    pub matches: usize,
}

impl Team {
    /// Load all three collections from the storage layout.
    pub fn open(storage: &Storage, auto_id: bool) -> Result<Self> {
        Ok(Self {
            players: RecordStore::open(storage.players_file(), auto_id)?,
            tasks: RecordStore::open(storage.tasks_file(), auto_id)?,
            matches: RecordStore::open(storage.matches_file(), auto_id)?,
        })
    }

    // =========================================================================
    // Players
    // =========================================================================

    pub fn players(&self) -> &[Player] {
        self.players.all()
    }

    pub fn player(&self, id: u64) -> Result<&Player> {
        self.players.get(id)
    }

    pub fn add_player(&mut self, form: PlayerForm) -> Result<Player> {
        validate::validate_player(&form)?;
        let player = self.players.insert(form.into_player(0))?;
        tracing::info!(id = player.id, name = %player.name, "added player");
        Ok(player)
    }

    pub fn edit_player(&mut self, id: u64, form: PlayerForm) -> Result<Player> {
        self.players.get(id)?;
        validate::validate_player(&form)?;
        self.players.update(id, |player| *player = form.into_player(id))
    }

    /// Remove a player. Tasks assigned to them are left as they are.
    pub fn delete_player(&mut self, id: u64) -> Result<Player> {
        self.players.remove(id)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub fn tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    pub fn task(&self, id: u64) -> Result<&Task> {
        self.tasks.get(id)
    }

    pub fn add_task(&mut self, form: TaskForm) -> Result<Task> {
        validate::validate_task(&form, self.players.all())?;
        let task = self.tasks.insert(form.into_task(0))?;
        tracing::info!(id = task.id, assigned_to = %task.assigned_to, "added task");
        Ok(task)
    }

    pub fn edit_task(&mut self, id: u64, form: TaskForm) -> Result<Task> {
        self.tasks.get(id)?;
        validate::validate_task(&form, self.players.all())?;
        self.tasks.update(id, |task| *task = form.into_task(id))
    }

    pub fn delete_task(&mut self, id: u64) -> Result<Task> {
        self.tasks.remove(id)
    }

    // =========================================================================
    // Matches
    // =========================================================================

    pub fn matches(&self) -> &[Match] {
        self.matches.all()
    }

    pub fn match_result(&self, id: u64) -> Result<&Match> {
        self.matches.get(id)
    }

    /// Record a match. Match fields are stored as submitted.
    pub fn add_match(&mut self, form: MatchForm) -> Result<Match> {
        let recorded = self.matches.insert(form.into_match(0))?;
        tracing::info!(id = recorded.id, opponent = %recorded.opponent, "added match");
        Ok(recorded)
    }

    pub fn edit_match(&mut self, id: u64, form: MatchForm) -> Result<Match> {
        self.matches.update(id, |recorded| *recorded = form.into_match(id))
    }

    pub fn delete_match(&mut self, id: u64) -> Result<Match> {
        self.matches.remove(id)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(self.players.len(), self.tasks.len(), self.matches.all())
    }

    pub fn win_percentage(&self) -> f64 {
        analytics::win_percentage(self.matches.all())
    }

    pub fn result_counts(&self) -> Vec<ResultCount> {
        analytics::result_counts(self.matches.all())
    }

    pub fn events(&self) -> Vec<Event> {
        calendar::project_events(self.players.all(), self.tasks.all())
    }

    // =========================================================================
    // Sample data
    // =========================================================================

    /// Fill empty collections with the sample roster, tasks and matches.
    /// Collections that already hold records are left alone, and a sample task
    /// is skipped when its assignee is not on the roster.
    pub fn seed_defaults(&mut self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.players.is_empty() {
            for form in sample_players() {
                self.add_player(form)?;
                report.players += 1;
            }
        }
        if self.tasks.is_empty() {
            for form in sample_tasks() {
                if !self.players.all().iter().any(|p| p.name == form.assigned_to) {
                    tracing::debug!(assigned_to = %form.assigned_to, "skipping sample task");
                    continue;
                }
                self.add_task(form)?;
                report.tasks += 1;
            }
        }
        if self.matches.is_empty() {
            for form in sample_matches() {
                self.add_match(form)?;
                report.matches += 1;
            }
        }

        Ok(report)
    }
}

fn sample_players() -> Vec<PlayerForm> {
    vec![
        PlayerForm {
            name: "Player1".to_string(),
            role: "DPS".to_string(),
            availabilities: vec![Availability::new("2023-05-10 10:00", "2023-05-10 12:00")],
        },
        PlayerForm {
            name: "Player2".to_string(),
            role: "Support".to_string(),
            availabilities: vec![Availability::new("2023-05-10 13:00", "2023-05-10 15:00")],
        },
    ]
}

fn sample_tasks() -> Vec<TaskForm> {
    vec![
        TaskForm {
            task: "Review strategy".to_string(),
            assigned_to: "Player1".to_string(),
            due_date: "2023-05-10".to_string(),
        },
        TaskForm {
            task: "Practice session".to_string(),
            assigned_to: "Player2".to_string(),
            due_date: "2023-05-11".to_string(),
        },
    ]
}

fn sample_matches() -> Vec<MatchForm> {
    [("Team A", "Win"), ("Team B", "Loss"), ("Team C", "Win")]
        .into_iter()
        .map(|(opponent, result)| MatchForm {
            opponent: opponent.to_string(),
            result: result.to_string(),
            ..MatchForm::default()
        })
        .collect()
}
