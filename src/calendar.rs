//! Calendar projection.
//!
//! Builds the event feed shown by the calendar view: one event per player
//! availability window, then one point event per task due date.

use chrono::{Datelike, Duration, NaiveDate};

use crate::dates;
use crate::model::{Event, Player, Task};

/// Project players' availability windows and tasks' due dates into events.
///
/// Entries whose dates do not parse are left out. Availability events come
/// first in roster order, then task events in task order.
pub fn project_events(players: &[Player], tasks: &[Task]) -> Vec<Event> {
    let mut events = Vec::new();

    for player in players {
        for window in &player.availabilities {
            if dates::is_valid(&window.start) && dates::is_valid(&window.end) {
                events.push(Event {
                    title: format!("{} - {}", player.name, player.role),
                    start: window.start.clone(),
                    end: window.end.clone(),
                });
            }
        }
    }

    for task in tasks {
        if dates::is_valid(&task.due_date) {
            events.push(Event {
                title: task.task.clone(),
                start: task.due_date.clone(),
                end: task.due_date.clone(),
            });
        }
    }

    events
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Keep the events that start in the Monday-to-Sunday week containing `day`.
pub fn events_in_week(events: &[Event], day: NaiveDate) -> Vec<Event> {
    let monday = week_start(day);
    let next_monday = monday + Duration::days(7);
    events
        .iter()
        .filter(|event| {
            dates::parse_day(&event.start)
                .map(|start| start >= monday && start < next_monday)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Availability;

    fn player(name: &str, role: &str, windows: Vec<Availability>) -> Player {
        Player {
            id: 1,
            name: name.to_string(),
            role: role.to_string(),
            availabilities: windows,
        }
    }

    fn task(name: &str, due_date: &str) -> Task {
        Task {
            id: 1,
            task: name.to_string(),
            assigned_to: "Player1".to_string(),
            due_date: due_date.to_string(),
        }
    }

    #[test]
    fn availability_then_task() {
        let players = vec![player(
            "Player1",
            "DPS",
            vec![Availability::new("2023-05-10 09:00", "2023-05-10 11:00")],
        )];
        let tasks = vec![task("Review strategy", "2023-05-11")];

        let events = project_events(&players, &tasks);
        assert_eq!(
            events,
            vec![
                Event {
                    title: "Player1 - DPS".to_string(),
                    start: "2023-05-10 09:00".to_string(),
                    end: "2023-05-10 11:00".to_string(),
                },
                Event {
                    title: "Review strategy".to_string(),
                    start: "2023-05-11".to_string(),
                    end: "2023-05-11".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unparsable_entries_are_omitted() {
        let players = vec![player(
            "Player2",
            "Support",
            vec![
                Availability::new("1pm", "3pm"),
                Availability::new("2023-05-10", "2023-05-10 15:00"),
                Availability::new("2023-05-11 13:00", "later"),
            ],
        )];
        let tasks = vec![task("Drill", "someday"), task("Scout", "2023-05-12")];

        let titles: Vec<String> = project_events(&players, &tasks)
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(titles, vec!["Player2 - Support", "Scout"]);
    }

    #[test]
    fn events_serialize_for_calendar_widget() {
        let events = project_events(&[], &[task("Scout", "2023-05-12")]);
        let json = serde_json::to_value(&events).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "title": "Scout", "start": "2023-05-12", "end": "2023-05-12" }])
        );
    }

    #[test]
    fn week_filter_is_monday_to_sunday() {
        // 2023-05-10 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2023, 5, 8).unwrap());

        let tasks = vec![
            task("Sunday before", "2023-05-07 23:00"),
            task("Monday", "2023-05-08"),
            task("Sunday", "2023-05-14 22:00"),
            task("Next Monday", "2023-05-15"),
        ];
        let events = project_events(&[], &tasks);
        let titles: Vec<String> = events_in_week(&events, wednesday)
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(titles, vec!["Monday", "Sunday"]);
    }
}
