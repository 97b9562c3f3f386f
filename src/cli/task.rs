//! teamdesk task command implementation

use crate::error::Result;
use crate::model::{Task, TaskForm};
use crate::output::{emit_success, HumanOutput};

use super::Context;

/// Options for `teamdesk task add`
pub struct AddOptions {
    pub task: String,
    pub assigned_to: String,
    pub due_date: String,
}

/// Options for `teamdesk task edit`
pub struct EditOptions {
    pub id: u64,
    pub task: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
}

fn describe(header: &str, task: &Task) -> HumanOutput {
    let mut human = HumanOutput::new(format!("{header}: {}", task.task));
    human.push_summary("id", task.id.to_string());
    human.push_summary("assigned to", task.assigned_to.clone());
    human.push_summary("due", task.due_date.clone());
    human
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let tasks = ctx.read_team(|team| Ok(team.tasks().to_vec()))?;

    let mut human = HumanOutput::new(format!("teamdesk task list: {} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(format!(
            "#{} {} -> {} (due {})",
            task.id, task.task, task.assigned_to, task.due_date
        ));
    }

    emit_success(ctx.output, "task list", &tasks, Some(&human))
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let form = TaskForm {
        task: options.task,
        assigned_to: options.assigned_to,
        due_date: options.due_date,
    };
    let task = ctx.mutate_team(|team| team.add_task(form))?;

    let mut human = describe("teamdesk task add", &task);
    human.push_next_step("teamdesk events");
    emit_success(ctx.output, "task add", &task, Some(&human))
}

pub fn run_edit(ctx: &Context, options: EditOptions) -> Result<()> {
    let task = ctx.mutate_team(|team| {
        let current = team.task(options.id)?;
        let form = TaskForm {
            task: options.task.unwrap_or_else(|| current.task.clone()),
            assigned_to: options
                .assigned_to
                .unwrap_or_else(|| current.assigned_to.clone()),
            due_date: options.due_date.unwrap_or_else(|| current.due_date.clone()),
        };
        team.edit_task(options.id, form)
    })?;

    let human = describe("teamdesk task edit", &task);
    emit_success(ctx.output, "task edit", &task, Some(&human))
}

pub fn run_rm(ctx: &Context, id: u64) -> Result<()> {
    let task = ctx.mutate_team(|team| team.delete_task(id))?;

    let human = describe("teamdesk task rm", &task);
    emit_success(ctx.output, "task rm", &task, Some(&human))
}
