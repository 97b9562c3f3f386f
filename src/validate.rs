//! Field validation for submitted records.
//!
//! Each validator returns the first failing check. A failure is a value, not a
//! panic, so the front end can show its message and keep the input.

use thiserror::Error;

use crate::dates;
use crate::model::{Player, PlayerForm, TaskForm};

/// Minimum length, in characters, of names, roles and task descriptions.
pub const MIN_TEXT_LEN: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Name and Role must be at least 3 characters long.")]
    NameOrRoleTooShort,

    #[error("Invalid date format for availability.")]
    InvalidAvailability,

    #[error("Task must be at least 3 characters long.")]
    TaskTooShort,

    #[error("Invalid due date format.")]
    InvalidDueDate,

    #[error("Assigned player does not exist.")]
    UnknownAssignee,
}

fn too_short(value: &str) -> bool {
    value.chars().count() < MIN_TEXT_LEN
}

pub fn validate_player(form: &PlayerForm) -> Result<(), ValidationError> {
    if form.name.is_empty() || form.role.is_empty() || form.availabilities.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if too_short(&form.name) || too_short(&form.role) {
        return Err(ValidationError::NameOrRoleTooShort);
    }
    let all_parse = form
        .availabilities
        .iter()
        .all(|window| dates::is_valid(&window.start) && dates::is_valid(&window.end));
    if !all_parse {
        return Err(ValidationError::InvalidAvailability);
    }
    Ok(())
}

/// Validate a task against the current roster. The assignee must match a
/// player's name exactly.
pub fn validate_task(form: &TaskForm, roster: &[Player]) -> Result<(), ValidationError> {
    if form.task.is_empty() || form.assigned_to.is_empty() || form.due_date.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if too_short(&form.task) {
        return Err(ValidationError::TaskTooShort);
    }
    if !dates::is_valid(&form.due_date) {
        return Err(ValidationError::InvalidDueDate);
    }
    if !roster.iter().any(|player| player.name == form.assigned_to) {
        return Err(ValidationError::UnknownAssignee);
    }
    Ok(())
}
