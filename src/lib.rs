//! teamdesk - esports team desk library
//!
//! Roster, task list and match results for an esports team, persisted as
//! line-delimited JSON, with validation, match analytics and a calendar feed.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.teamdesk.toml`
//! - `error`: Error types and result aliases
//! - `model`: Player, task, match and event records
//! - `store`: Line-delimited JSON record store
//! - `storage`: Data directory layout and JSON helpers
//! - `validate`: Player and task field validation
//! - `dates`: Date/time parsing for availabilities and due dates
//! - `analytics`: Win percentage, result tallies and the dashboard summary
//! - `calendar`: Event projection and week filtering
//! - `auth`: Admin login, sessions and the authorization gate
//! - `team`: The working set that ties stores, validation and views together
//! - `lock`: Advisory file lock serializing mutating commands

pub mod analytics;
pub mod auth;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod lock;
pub mod model;
pub mod output;
pub mod storage;
pub mod store;
pub mod team;
pub mod validate;

pub use error::{Error, Result};
