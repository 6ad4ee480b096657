// Co-draft rate: how often a group of players ends up on one team.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::draft::board::DraftBoard;
use crate::draft::pick::{DraftPick, TeamDraftKey};
use crate::error::DraftError;

/// Result of a co-draft query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoDraftSummary {
    /// The players as passed in; the first one is the conditioning player.
    pub players: Vec<String>,
    /// Team-drafts that selected `players[0]`.
    pub num_first: usize,
    /// Team-drafts that selected every listed player.
    pub num_all: usize,
    /// `num_all / num_first * 100`, or 0.0 when the first player never appears.
    pub pct_together: f64,
    /// The team-drafts counted in `num_all`.
    pub common_keys: BTreeSet<TeamDraftKey>,
}

/// One team's full draft, in pick order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRoster {
    pub key: TeamDraftKey,
    pub picks: Vec<DraftPick>,
}

impl TeamRoster {
    pub fn player_names(&self) -> Vec<&str> {
        self.picks.iter().map(|p| p.player_name.as_str()).collect()
    }

    /// Comma-joined player names, as shown in roster tables.
    pub fn display_roster(&self) -> String {
        self.player_names().join(", ")
    }

    /// Like `display_roster`, with "(position, team)" after each player the
    /// reference join matched. Missing fields show as `?`.
    pub fn display_roster_with_info(&self) -> String {
        self.picks
            .iter()
            .map(|p| match &p.info {
                Some(info) => format!(
                    "{} ({}, {})",
                    p.player_name,
                    info.position.as_deref().unwrap_or("?"),
                    info.team.as_deref().unwrap_or("?")
                ),
                None => p.player_name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// How often all `players` were drafted by the same team in the same draft,
/// conditioned on the first player being drafted.
///
/// Fails with `DraftError::InvalidArgument` for an empty list. Unknown names
/// simply contribute empty key sets.
pub fn co_draft_multiple<S: AsRef<str>>(
    board: &DraftBoard,
    players: &[S],
) -> Result<CoDraftSummary, DraftError> {
    let Some((first, rest)) = players.split_first() else {
        return Err(DraftError::InvalidArgument {
            message: "supply at least one player name".into(),
        });
    };

    let first_set = board.team_keys_for(first.as_ref());
    let mut common = first_set.clone();
    for player in rest {
        if common.is_empty() {
            break;
        }
        let keys = board.team_keys_for(player.as_ref());
        common.retain(|k| keys.contains(k));
    }

    let num_first = first_set.len();
    let num_all = common.len();
    let pct_together = if num_first > 0 {
        num_all as f64 / num_first as f64 * 100.0
    } else {
        0.0
    };

    debug!(
        "co-draft for {} players: {}/{} team-drafts",
        players.len(),
        num_all,
        num_first
    );

    Ok(CoDraftSummary {
        players: players.iter().map(|p| p.as_ref().to_string()).collect(),
        num_first,
        num_all,
        pct_together,
        common_keys: common,
    })
}

/// Full rosters for every team-draft in `summary.common_keys`, in key order.
pub fn co_draft_rosters(board: &DraftBoard, summary: &CoDraftSummary) -> Vec<TeamRoster> {
    summary
        .common_keys
        .iter()
        .map(|key| TeamRoster {
            key: key.clone(),
            picks: board.team_roster(key).into_iter().cloned().collect(),
        })
        .collect()
}
