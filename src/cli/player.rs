//! teamdesk player command implementation

use crate::error::{Error, Result};
use crate::model::{Availability, Player, PlayerForm};
use crate::output::{emit_success, HumanOutput};

use super::Context;

/// Options for `teamdesk player add`
pub struct AddOptions {
    pub name: String,
    pub role: String,
    pub availabilities: Vec<String>,
}

/// Options for `teamdesk player edit`
pub struct EditOptions {
    pub id: u64,
    pub name: Option<String>,
    pub role: Option<String>,
    pub availabilities: Vec<String>,
}

/// Parse a `START,END` availability argument.
pub(crate) fn parse_availability(raw: &str) -> Result<Availability> {
    let (start, end) = raw.split_once(',').ok_or_else(|| {
        Error::InvalidArgument(format!(
            "availability '{raw}' must look like \"START,END\""
        ))
    })?;
    Ok(Availability::new(start.trim(), end.trim()))
}

fn parse_availabilities(raw: &[String]) -> Result<Vec<Availability>> {
    raw.iter().map(|value| parse_availability(value)).collect()
}

fn describe(player: &Player) -> HumanOutput {
    let mut human = HumanOutput::new(format!("{} ({})", player.name, player.role));
    human.push_summary("id", player.id.to_string());
    for window in &player.availabilities {
        human.push_detail(format!("{} -> {}", window.start, window.end));
    }
    human
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let players = ctx.read_team(|team| Ok(team.players().to_vec()))?;

    let mut human = HumanOutput::new(format!("teamdesk player list: {} player(s)", players.len()));
    for player in &players {
        human.push_detail(format!(
            "#{} {} - {} ({} window(s))",
            player.id,
            player.name,
            player.role,
            player.availabilities.len()
        ));
    }
    if players.is_empty() {
        human.push_next_step("teamdesk player add --name <name> --role <role> --availability \"START,END\"");
    }

    emit_success(ctx.output, "player list", &players, Some(&human))
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let form = PlayerForm {
        name: options.name,
        role: options.role,
        availabilities: parse_availabilities(&options.availabilities)?,
    };
    let player = ctx.mutate_team(|team| team.add_player(form))?;

    let mut human = describe(&player);
    human.push_next_step("teamdesk player list");
    emit_success(ctx.output, "player add", &player, Some(&human))
}

pub fn run_edit(ctx: &Context, options: EditOptions) -> Result<()> {
    let replacement = parse_availabilities(&options.availabilities)?;
    let player = ctx.mutate_team(|team| {
        let current = team.player(options.id)?;
        let form = PlayerForm {
            name: options.name.unwrap_or_else(|| current.name.clone()),
            role: options.role.unwrap_or_else(|| current.role.clone()),
            availabilities: if replacement.is_empty() {
                current.availabilities.clone()
            } else {
                replacement
            },
        };
        team.edit_player(options.id, form)
    })?;

    let human = describe(&player);
    emit_success(ctx.output, "player edit", &player, Some(&human))
}

pub fn run_rm(ctx: &Context, id: u64) -> Result<()> {
    let player = ctx.mutate_team(|team| team.delete_player(id))?;

    let mut human = HumanOutput::new(format!("teamdesk player rm: {}", player.name));
    human.push_summary("id", player.id.to_string());
    emit_success(ctx.output, "player rm", &player, Some(&human))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_argument_splits_on_comma() {
        let window = parse_availability("2023-05-10 09:00, 2023-05-10 11:00").unwrap();
        assert_eq!(window, Availability::new("2023-05-10 09:00", "2023-05-10 11:00"));
    }

    #[test]
    fn availability_argument_needs_comma() {
        assert!(matches!(
            parse_availability("2023-05-10 09:00"),
            Err(Error::InvalidArgument(_))
        ));
    }
}
