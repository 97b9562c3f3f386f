//! teamdesk init/login/logout/whoami
//!
//! These commands are open, except `init --seed` which writes records and so
//! goes through the auth gate like every other mutation.

use serde::Serialize;

use crate::auth::{self, AuthGate, Session};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::team::{SeedReport, Team};

use super::Context;

#[derive(Serialize)]
struct InitReport {
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seeded: Option<SeedReport>,
}

#[derive(Serialize)]
struct LogoutReport {
    logged_out: bool,
}

pub fn run_init(ctx: &Context, seed: bool) -> Result<()> {
    ctx.storage.init()?;

    let seeded = if seed {
        Some(ctx.mutate_team(Team::seed_defaults)?)
    } else {
        None
    };

    let data_dir = ctx.storage.data_dir().display().to_string();
    let mut human = HumanOutput::new(format!("teamdesk init: {data_dir}"));
    if let Some(report) = &seeded {
        human.push_summary("players seeded", report.players.to_string());
        human.push_summary("tasks seeded", report.tasks.to_string());
        human.push_summary("matches seeded", report.matches.to_string());
    }
    human.push_next_step("teamdesk login --username <name> --password <password>");

    emit_success(
        ctx.output,
        "init",
        &InitReport { data_dir, seeded },
        Some(&human),
    )
}

pub fn run_login(ctx: &Context, username: &str, password: &str) -> Result<()> {
    let session = auth::login(&ctx.config.auth, username, password)?;
    auth::persist_session(&ctx.storage, &session)?;

    let mut human = HumanOutput::new(format!("teamdesk login: {}", session.username));
    human.push_next_step("teamdesk dashboard");

    emit_success(ctx.output, "login", &session, Some(&human))
}

pub fn run_logout(ctx: &Context) -> Result<()> {
    let logged_out = auth::clear_session(&ctx.storage)?;

    let header = if logged_out {
        "teamdesk logout: session ended"
    } else {
        "teamdesk logout: no active session"
    };
    let human = HumanOutput::new(header);

    emit_success(ctx.output, "logout", &LogoutReport { logged_out }, Some(&human))
}

pub fn run_whoami(ctx: &Context) -> Result<()> {
    let gate = AuthGate::from_storage(&ctx.storage, &ctx.config.auth)?;
    let session: Option<&Session> = gate.session();

    let human = match session {
        Some(session) => {
            let mut human = HumanOutput::new(format!("teamdesk whoami: {}", session.username));
            human.push_summary("logged in at", session.logged_in_at.to_rfc3339());
            human
        }
        None => {
            let mut human = HumanOutput::new("teamdesk whoami: not logged in");
            human.push_warning("protected commands will be refused");
            human.push_next_step("teamdesk login --username <name> --password <password>");
            human
        }
    };

    emit_success(ctx.output, "whoami", &session, Some(&human))
}
