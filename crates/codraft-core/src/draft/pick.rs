// Individual pick representation and snake-draft slot assignment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DraftError;

/// Number of teams per round when the configuration does not say otherwise.
pub const DEFAULT_TEAM_COUNT: u32 = 12;

/// A raw pick as supplied by the dataset, before any derived columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    /// Identifier of one complete draft run.
    pub draft_id: String,
    /// 1-based pick number across the whole draft.
    pub overall_pick: i64,
    /// Name of the drafted player.
    pub player_name: String,
}

impl PickRecord {
    pub fn new(
        draft_id: impl Into<String>,
        overall_pick: i64,
        player_name: impl Into<String>,
    ) -> Self {
        PickRecord {
            draft_id: draft_id.into(),
            overall_pick,
            player_name: player_name.into(),
        }
    }
}

/// Reference metadata joined onto picks by player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub id: Option<String>,
}

/// One team's roster-building sequence within one draft instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamDraftKey {
    pub draft_id: String,
    pub draft_slot: u32,
}

impl TeamDraftKey {
    pub fn new(draft_id: impl Into<String>, draft_slot: u32) -> Self {
        TeamDraftKey {
            draft_id: draft_id.into(),
            draft_slot,
        }
    }
}

impl fmt::Display for TeamDraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft {} / slot {}", self.draft_id, self.draft_slot)
    }
}

/// Round, position within the round, and owning slot for one pick number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    pub overall_pick: u32,
    pub round: u32,
    pub pick_in_round: u32,
    pub draft_slot: u32,
}

/// A pick enriched with its derived snake-draft columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub draft_id: String,
    pub overall_pick: u32,
    pub player_name: String,
    /// 1-based round number.
    pub round: u32,
    /// 1-based position within the round, in pick order.
    pub pick_in_round: u32,
    /// Stable team identity across rounds.
    pub draft_slot: u32,
    /// Left-joined reference data; `None` when the name had no match.
    #[serde(default)]
    pub info: Option<PlayerInfo>,
}

impl DraftPick {
    pub fn team_key(&self) -> TeamDraftKey {
        TeamDraftKey::new(self.draft_id.clone(), self.draft_slot)
    }
}

/// Map an overall pick number onto its round and snake-draft slot.
///
/// Odd rounds run forward (slot == pick_in_round); even rounds run in
/// reverse, so the last picker of round r is the first picker of round r+1.
/// A partial final round uses the same formula.
pub fn snake_slot(
    draft_id: &str,
    overall_pick: i64,
    team_count: u32,
) -> Result<SlotAssignment, DraftError> {
    if team_count == 0 {
        return Err(DraftError::integrity(
            draft_id,
            Some(overall_pick),
            "team count must be greater than 0",
        ));
    }
    let pick = u32::try_from(overall_pick)
        .ok()
        .filter(|&p| p > 0)
        .ok_or_else(|| {
            DraftError::integrity(
                draft_id,
                Some(overall_pick),
                "overall pick number must be a positive integer",
            )
        })?;

    let round = pick.div_ceil(team_count);
    let pick_in_round = pick - (round - 1) * team_count;
    if !(1..=team_count).contains(&pick_in_round) {
        return Err(DraftError::integrity(
            draft_id,
            Some(overall_pick),
            format!("pick_in_round {pick_in_round} outside 1..={team_count}"),
        ));
    }

    let draft_slot = if round % 2 == 1 {
        pick_in_round
    } else {
        team_count - pick_in_round + 1
    };

    Ok(SlotAssignment {
        overall_pick: pick,
        round,
        pick_in_round,
        draft_slot,
    })
}
