//! Match analytics and the dashboard summary.

use serde::Serialize;

use crate::model::Match;

/// Percentage of matches won, in `0..=100`. An empty slice gives `0`.
pub fn win_percentage(matches: &[Match]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    let wins = matches.iter().filter(|m| m.is_win()).count();
    100.0 * wins as f64 / matches.len() as f64
}

/// How many matches ended with a given result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCount {
    pub result: String,
    pub count: usize,
}

/// Tally matches by their `result` text, most frequent first. Ties keep the
/// order in which each result first appears.
pub fn result_counts(matches: &[Match]) -> Vec<ResultCount> {
    let mut counts: Vec<ResultCount> = Vec::new();
    for m in matches {
        match counts.iter_mut().find(|entry| entry.result == m.result) {
            Some(entry) => entry.count += 1,
            None => counts.push(ResultCount {
                result: m.result.clone(),
                count: 1,
            }),
        }
    }
    // stable sort keeps first-appearance order within equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub players: usize,
    pub tasks: usize,
    pub matches: usize,
    pub wins: usize,
    pub win_percentage: f64,
}

impl Dashboard {
    pub fn build(players: usize, tasks: usize, matches: &[Match]) -> Self {
        Self {
            players,
            tasks,
            matches: matches.len(),
            wins: matches.iter().filter(|m| m.is_win()).count(),
            win_percentage: win_percentage(matches),
        }
    }
}
