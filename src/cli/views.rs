//! teamdesk dashboard/analytics/events

use serde::Serialize;

use crate::analytics::{Dashboard, ResultCount};
use crate::calendar;
use crate::dates;
use crate::error::{Error, Result};
use crate::model::{Match, Player};
use crate::output::{emit_success, HumanOutput};

use super::Context;

#[derive(Serialize)]
struct DashboardReport {
    #[serde(flatten)]
    summary: Dashboard,
    team: Vec<Player>,
    recent_matches: Vec<Match>,
}

#[derive(Serialize)]
struct AnalyticsReport {
    win_percentage: f64,
    results: Vec<ResultCount>,
    matches: Vec<Match>,
}

const RECENT_MATCHES: usize = 5;

pub fn run_dashboard(ctx: &Context) -> Result<()> {
    let report = ctx.read_team(|team| {
        let matches = team.matches();
        let recent = matches.len().saturating_sub(RECENT_MATCHES);
        Ok(DashboardReport {
            summary: team.dashboard(),
            team: team.players().to_vec(),
            recent_matches: matches[recent..].to_vec(),
        })
    })?;

    let summary = &report.summary;
    let mut human = HumanOutput::new("teamdesk dashboard");
    human.push_summary("players", summary.players.to_string());
    human.push_summary("tasks", summary.tasks.to_string());
    human.push_summary("matches", summary.matches.to_string());
    human.push_summary("win percentage", format!("{:.1}%", summary.win_percentage));
    for recorded in &report.recent_matches {
        human.push_detail(format!("vs {}: {}", recorded.opponent, recorded.result));
    }

    emit_success(ctx.output, "dashboard", &report, Some(&human))
}

pub fn run_analytics(ctx: &Context) -> Result<()> {
    let report = ctx.read_team(|team| {
        Ok(AnalyticsReport {
            win_percentage: team.win_percentage(),
            results: team.result_counts(),
            matches: team.matches().to_vec(),
        })
    })?;

    let mut human = HumanOutput::new("teamdesk analytics");
    human.push_summary("win percentage", format!("{:.1}%", report.win_percentage));
    for entry in &report.results {
        human.push_detail(format!(
            "{:<8} {} {}",
            entry.result,
            "#".repeat(entry.count),
            entry.count
        ));
    }
    if report.matches.is_empty() {
        human.push_warning("no matches recorded yet");
    }

    emit_success(ctx.output, "analytics", &report, Some(&human))
}

/// The event feed. The JSON payload under `data` is the plain array of
/// `{title, start, end}` objects the calendar widget consumes.
pub fn run_events(ctx: &Context, week: Option<String>) -> Result<()> {
    let day = week
        .as_deref()
        .map(|raw| {
            dates::parse_day(raw).ok_or_else(|| {
                Error::InvalidArgument(format!("--week expects YYYY-MM-DD, got '{raw}'"))
            })
        })
        .transpose()?;

    let mut events = ctx.read_team(|team| Ok(team.events()))?;
    if let Some(day) = day {
        events = calendar::events_in_week(&events, day);
    }

    let header = match day {
        Some(day) => format!(
            "teamdesk events: week of {}",
            calendar::week_start(day).format("%Y-%m-%d")
        ),
        None => "teamdesk events".to_string(),
    };
    let mut human = HumanOutput::new(header);
    for event in &events {
        if event.start == event.end {
            human.push_detail(format!("{} {}", event.start, event.title));
        } else {
            human.push_detail(format!("{} -> {} {}", event.start, event.end, event.title));
        }
    }

    emit_success(ctx.output, "events", &events, Some(&human))
}
