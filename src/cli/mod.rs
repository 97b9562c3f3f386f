//! Command-line interface for teamdesk
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::auth::AuthGate;
use crate::config::Config;
use crate::error::Result;
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::output::OutputOptions;
use crate::storage::Storage;
use crate::team::Team;

mod matches;
mod player;
mod session;
mod task;
mod views;

/// teamdesk - esports team desk
///
/// Keeps the team roster, task list and match results for an esports team,
/// with a dashboard, match analytics and a calendar feed.
#[derive(Parser, Debug)]
#[command(name = "teamdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root holding .teamdesk.toml and the data directory
    #[arg(long, global = true, env = "TEAMDESK_ROOT")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory
    Init {
        /// Write the sample roster, tasks and matches into empty collections
        #[arg(long)]
        seed: bool,
    },

    /// Log in as the team admin
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// End the admin session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Roster management
    #[command(subcommand)]
    Player(PlayerCommands),

    /// Task list management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Match results management
    #[command(subcommand)]
    Match(MatchCommands),

    /// Team overview with win percentage
    Dashboard,

    /// Match result breakdown
    Analytics,

    /// Calendar events from availabilities and due dates
    Events {
        /// Only events starting in the Monday-Sunday week of this date (YYYY-MM-DD)
        #[arg(long)]
        week: Option<String>,
    },
}

/// Player subcommands
#[derive(Subcommand, Debug)]
pub enum PlayerCommands {
    /// List the roster
    List,

    /// Add a player
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        role: String,

        /// Availability window as "START,END" (repeatable)
        #[arg(long = "availability")]
        availabilities: Vec<String>,
    },

    /// Edit a player; omitted fields keep their current value
    Edit {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        /// Replacement availability windows as "START,END" (repeatable)
        #[arg(long = "availability")]
        availabilities: Vec<String>,
    },

    /// Remove a player
    Rm { id: u64 },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    List,

    /// Add a task
    Add {
        /// Task description
        #[arg(long)]
        task: String,

        /// Player name the task is assigned to
        #[arg(long)]
        assigned_to: String,

        /// Due date (YYYY-MM-DD or YYYY-MM-DD HH:MM)
        #[arg(long)]
        due_date: String,
    },

    /// Edit a task; omitted fields keep their current value
    Edit {
        id: u64,

        #[arg(long)]
        task: Option<String>,

        #[arg(long)]
        assigned_to: Option<String>,

        #[arg(long)]
        due_date: Option<String>,
    },

    /// Remove a task
    Rm { id: u64 },
}

/// Match subcommands
#[derive(Subcommand, Debug)]
pub enum MatchCommands {
    /// List match results
    List,

    /// Record a match
    Add {
        #[arg(long)]
        opponent: String,

        /// Result, usually Win or Loss
        #[arg(long)]
        result: String,

        #[arg(long, default_value = "")]
        stats: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a match; omitted fields keep their current value
    Edit {
        id: u64,

        #[arg(long)]
        opponent: Option<String>,

        #[arg(long)]
        result: Option<String>,

        #[arg(long)]
        stats: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a match
    Rm { id: u64 },
}

/// Resolved project, config and output settings shared by every command
pub(crate) struct Context {
    pub storage: Storage,
    pub config: Config,
    pub output: OutputOptions,
}

impl Context {
    fn resolve(root: Option<PathBuf>, json: bool, quiet: bool) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let config = Config::load_from_root(&root)?;
        let storage = Storage::new(root, &config);
        Ok(Self {
            storage,
            config,
            output: OutputOptions { json, quiet },
        })
    }

    /// Run a read-only operation on the team behind the auth gate.
    pub fn read_team<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Team) -> Result<T>,
    {
        AuthGate::from_storage(&self.storage, &self.config.auth)?.guard(|_| {
            let team = Team::open(&self.storage, self.config.storage.auto_id)?;
            f(&team)
        })
    }

    /// Run a mutation behind the auth gate while holding the team lock, so the
    /// load-mutate-save cycle cannot interleave with another process.
    pub fn mutate_team<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Team) -> Result<T>,
    {
        AuthGate::from_storage(&self.storage, &self.config.auth)?.guard(|_| {
            let _lock = FileLock::acquire(self.storage.lock_file(), DEFAULT_LOCK_TIMEOUT_MS)?;
            let mut team = Team::open(&self.storage, self.config.storage.auto_id)?;
            f(&mut team)
        })
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = Context::resolve(self.root, self.json, self.quiet)?;
        match self.command {
            Commands::Init { seed } => session::run_init(&ctx, seed),
            Commands::Login { username, password } => session::run_login(&ctx, &username, &password),
            Commands::Logout => session::run_logout(&ctx),
            Commands::Whoami => session::run_whoami(&ctx),
            Commands::Player(cmd) => match cmd {
                PlayerCommands::List => player::run_list(&ctx),
                PlayerCommands::Add { name, role, availabilities } => {
                    player::run_add(&ctx, player::AddOptions { name, role, availabilities })
                }
                PlayerCommands::Edit { id, name, role, availabilities } => {
                    player::run_edit(&ctx, player::EditOptions { id, name, role, availabilities })
                }
                PlayerCommands::Rm { id } => player::run_rm(&ctx, id),
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::List => task::run_list(&ctx),
                TaskCommands::Add { task, assigned_to, due_date } => {
                    task::run_add(&ctx, task::AddOptions { task, assigned_to, due_date })
                }
                TaskCommands::Edit { id, task, assigned_to, due_date } => {
                    task::run_edit(&ctx, task::EditOptions { id, task, assigned_to, due_date })
                }
                TaskCommands::Rm { id } => task::run_rm(&ctx, id),
            },
            Commands::Match(cmd) => match cmd {
                MatchCommands::List => matches::run_list(&ctx),
                MatchCommands::Add { opponent, result, stats, description } => {
                    matches::run_add(
                        &ctx,
                        matches::AddOptions { opponent, result, stats, description },
                    )
                }
                MatchCommands::Edit { id, opponent, result, stats, description } => {
                    matches::run_edit(
                        &ctx,
                        matches::EditOptions { id, opponent, result, stats, description },
                    )
                }
                MatchCommands::Rm { id } => matches::run_rm(&ctx, id),
            },
            Commands::Dashboard => views::run_dashboard(&ctx),
            Commands::Analytics => views::run_analytics(&ctx),
            Commands::Events { week } => views::run_events(&ctx, week),
        }
    }
}
