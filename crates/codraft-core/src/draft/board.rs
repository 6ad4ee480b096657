// Draft board: the enriched pick table plus its team-draft and player indexes.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use super::pick::{snake_slot, DraftPick, PickRecord, TeamDraftKey};
use crate::config::DraftConfig;
use crate::dataset::PlayerDirectory;
use crate::error::DraftError;

/// Headline counts for a built board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub picks: usize,
    pub drafts: usize,
    pub teams: usize,
    pub rounds: u32,
}

/// Immutable, enriched view of every pick in a dataset.
///
/// Built once per session. Picks keep their input order; the team index holds,
/// for every `(draft_id, draft_slot)`, the pick indices sorted by overall pick
/// number, which both analyzers use for lookups.
#[derive(Debug, Clone)]
pub struct DraftBoard {
    team_count: u32,
    picks: Vec<DraftPick>,
    teams: HashMap<TeamDraftKey, Vec<usize>>,
    occurrences: HashMap<String, Vec<usize>>,
}

impl DraftBoard {
    /// Build a board with strict pick-number validation and no reference data.
    pub fn build(records: &[PickRecord], team_count: u32) -> Result<Self, DraftError> {
        let settings = DraftConfig {
            team_count,
            ..DraftConfig::default()
        };
        Self::build_with(records, &settings, None)
    }

    /// Build a board using explicit draft settings, optionally left-joining
    /// reference metadata by player name.
    ///
    /// Fails with `DraftError::DataIntegrity` when the team count is zero, a
    /// pick number is non-positive, a pick number repeats within a draft, or
    /// (when `require_contiguous_picks` is set) a draft's picks are not
    /// exactly `1..=N`. The input records are never modified.
    pub fn build_with(
        records: &[PickRecord],
        settings: &DraftConfig,
        directory: Option<&PlayerDirectory>,
    ) -> Result<Self, DraftError> {
        let team_count = settings.team_count;
        if team_count == 0 {
            return Err(DraftError::dataset_integrity(
                "team count must be greater than 0",
            ));
        }

        let mut picks = Vec::with_capacity(records.len());
        let mut seen: HashSet<(&str, i64)> = HashSet::with_capacity(records.len());

        for record in records {
            let slot = snake_slot(&record.draft_id, record.overall_pick, team_count)?;
            if !seen.insert((record.draft_id.as_str(), record.overall_pick)) {
                return Err(DraftError::integrity(
                    record.draft_id.clone(),
                    Some(record.overall_pick),
                    "pick number appears more than once",
                ));
            }
            picks.push(DraftPick {
                draft_id: record.draft_id.clone(),
                overall_pick: slot.overall_pick,
                player_name: record.player_name.clone(),
                round: slot.round,
                pick_in_round: slot.pick_in_round,
                draft_slot: slot.draft_slot,
                info: directory.and_then(|d| d.get(&record.player_name)).cloned(),
            });
        }

        if settings.require_contiguous_picks {
            check_contiguous(&picks)?;
        }

        let mut teams: HashMap<TeamDraftKey, Vec<usize>> = HashMap::new();
        let mut occurrences: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, pick) in picks.iter().enumerate() {
            teams.entry(pick.team_key()).or_default().push(idx);
            occurrences
                .entry(pick.player_name.clone())
                .or_default()
                .push(idx);
        }
        for indices in teams.values_mut() {
            indices.sort_by_key(|&i| picks[i].overall_pick);
        }

        let board = DraftBoard {
            team_count,
            picks,
            teams,
            occurrences,
        };

        let summary = board.summary();
        info!(
            "Draft board built: {} picks, {} drafts, {} team-drafts, {} rounds ({} teams per round)",
            summary.picks, summary.drafts, summary.teams, summary.rounds, team_count
        );
        if let Some(dir) = directory {
            let matched = board.picks.iter().filter(|p| p.info.is_some()).count();
            debug!(
                "Player reference matched {}/{} picks ({} reference rows)",
                matched,
                board.picks.len(),
                dir.len()
            );
        }

        Ok(board)
    }

    pub fn team_count(&self) -> u32 {
        self.team_count
    }

    /// All enriched picks, in input order.
    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Every pick of the named player across all drafts, in input order.
    pub fn occurrences<'a>(&'a self, player: &str) -> impl Iterator<Item = &'a DraftPick> + 'a {
        self.occurrences
            .get(player)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.picks[i])
    }

    /// Set of team-draft keys at which the player was ever selected.
    pub fn team_keys_for(&self, player: &str) -> BTreeSet<TeamDraftKey> {
        self.occurrences(player).map(DraftPick::team_key).collect()
    }

    /// The same team's next pick after `pick` in the same draft, if any.
    pub fn next_team_pick(&self, pick: &DraftPick) -> Option<&DraftPick> {
        let key = pick.team_key();
        let indices = self.teams.get(&key)?;
        let pos = indices.partition_point(|&i| self.picks[i].overall_pick <= pick.overall_pick);
        indices.get(pos).map(|&i| &self.picks[i])
    }

    /// Full roster of one team in one draft, ordered by pick number.
    /// Empty for a key the board does not contain.
    pub fn team_roster(&self, key: &TeamDraftKey) -> Vec<&DraftPick> {
        self.teams
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.picks[i]).collect())
            .unwrap_or_default()
    }

    /// Distinct player names, sorted.
    pub fn player_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.occurrences.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn summary(&self) -> BoardSummary {
        let drafts: HashSet<&str> = self.picks.iter().map(|p| p.draft_id.as_str()).collect();
        BoardSummary {
            picks: self.picks.len(),
            drafts: drafts.len(),
            teams: self.teams.len(),
            rounds: self.picks.iter().map(|p| p.round).max().unwrap_or(0),
        }
    }
}

/// Each draft's pick numbers must be exactly 1..=N.
fn check_contiguous(picks: &[DraftPick]) -> Result<(), DraftError> {
    let mut by_draft: HashMap<&str, Vec<u32>> = HashMap::new();
    for pick in picks {
        by_draft
            .entry(pick.draft_id.as_str())
            .or_default()
            .push(pick.overall_pick);
    }
    for (draft_id, mut numbers) in by_draft {
        numbers.sort_unstable();
        if let Some((expected, _)) = numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| (i as u32 + 1, n))
            .find(|&(expected, n)| expected != n)
        {
            return Err(DraftError::integrity(
                draft_id,
                Some(i64::from(expected)),
                "pick number missing; picks must run 1..=N without gaps",
            ));
        }
    }
    Ok(())
}
