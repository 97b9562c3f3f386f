//! teamdesk match command implementation
//!
//! Match fields are stored as given; there is no validation step for matches.

use crate::error::Result;
use crate::model::{Match, MatchForm};
use crate::output::{emit_success, HumanOutput};

use super::Context;

/// Options for `teamdesk match add`
pub struct AddOptions {
    pub opponent: String,
    pub result: String,
    pub stats: String,
    pub description: String,
}

/// Options for `teamdesk match edit`
pub struct EditOptions {
    pub id: u64,
    pub opponent: Option<String>,
    pub result: Option<String>,
    pub stats: Option<String>,
    pub description: Option<String>,
}

fn describe(header: &str, recorded: &Match) -> HumanOutput {
    let mut human = HumanOutput::new(format!("{header}: vs {}", recorded.opponent));
    human.push_summary("id", recorded.id.to_string());
    human.push_summary("result", recorded.result.clone());
    if !recorded.stats.is_empty() {
        human.push_summary("stats", recorded.stats.clone());
    }
    if !recorded.description.is_empty() {
        human.push_detail(recorded.description.clone());
    }
    human
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let matches = ctx.read_team(|team| Ok(team.matches().to_vec()))?;

    let mut human = HumanOutput::new(format!("teamdesk match list: {} match(es)", matches.len()));
    for recorded in &matches {
        human.push_detail(format!(
            "#{} vs {}: {}",
            recorded.id, recorded.opponent, recorded.result
        ));
    }

    emit_success(ctx.output, "match list", &matches, Some(&human))
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let form = MatchForm {
        opponent: options.opponent,
        result: options.result,
        stats: options.stats,
        description: options.description,
    };
    let recorded = ctx.mutate_team(|team| team.add_match(form))?;

    let mut human = describe("teamdesk match add", &recorded);
    human.push_next_step("teamdesk analytics");
    emit_success(ctx.output, "match add", &recorded, Some(&human))
}

pub fn run_edit(ctx: &Context, options: EditOptions) -> Result<()> {
    let recorded = ctx.mutate_team(|team| {
        let current = team.match_result(options.id)?;
        let form = MatchForm {
            opponent: options
                .opponent
                .unwrap_or_else(|| current.opponent.clone()),
            result: options.result.unwrap_or_else(|| current.result.clone()),
            stats: options.stats.unwrap_or_else(|| current.stats.clone()),
            description: options
                .description
                .unwrap_or_else(|| current.description.clone()),
        };
        team.edit_match(options.id, form)
    })?;

    let human = describe("teamdesk match edit", &recorded);
    emit_success(ctx.output, "match edit", &recorded, Some(&human))
}

pub fn run_rm(ctx: &Context, id: u64) -> Result<()> {
    let recorded = ctx.mutate_team(|team| team.delete_match(id))?;

    let human = describe("teamdesk match rm", &recorded);
    emit_success(ctx.output, "match rm", &recorded, Some(&human))
}
