// Next-pick distribution: who a team takes right after a given player.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::draft::board::DraftBoard;

/// One row of the next-pick frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextPickShare {
    pub next_player: String,
    pub count: usize,
    /// Share of all observed next picks, 0-100.
    pub pct: f64,
}

/// Distribution of the player each team selected immediately after `player`,
/// across every draft the player appears in.
///
/// An occurrence that was its team's final pick contributes nothing. Rows are
/// sorted by descending count, then by name; the name tie-break is this
/// crate's choice and not part of the contract. An unknown player, or one who
/// was always a team's last pick, yields an empty table.
pub fn next_pick_distribution(board: &DraftBoard, player: &str) -> Vec<NextPickShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut observations = 0usize;
    let mut occurrences = 0usize;

    for occurrence in board.occurrences(player) {
        occurrences += 1;
        if let Some(next) = board.next_team_pick(occurrence) {
            *counts.entry(next.player_name.as_str()).or_default() += 1;
            observations += 1;
        }
    }

    debug!(
        "next-pick for '{}': {} occurrences, {} with a following pick",
        player, occurrences, observations
    );
    if observations == 0 {
        return Vec::new();
    }

    let total = observations as f64;
    let mut dist: Vec<NextPickShare> = counts
        .into_iter()
        .map(|(name, count)| NextPickShare {
            next_player: name.to_string(),
            count,
            pct: count as f64 / total * 100.0,
        })
        .collect();
    dist.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.next_player.cmp(&b.next_player))
    });
    dist
}
