// Integration tests for the co-draft explorer library.
//
// These exercise the public API end-to-end: CSV ingestion, the reference
// join, board construction, and both analyzers, over the fixture exports in
// tests/fixtures (three 4-team, 4-round drafts) plus a few synthetic boards.

use std::collections::BTreeSet;

use codraft_core::config::{Config, DataPaths, DraftConfig, ReportConfig};
use codraft_core::dataset::{self, LoadError};
use codraft_core::{
    co_draft_multiple, co_draft_rosters, next_pick_distribution, DraftBoard, DraftError,
    PickRecord, TeamDraftKey,
};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture_config(with_info: bool) -> Config {
    Config {
        draft: DraftConfig {
            team_count: 4,
            require_contiguous_picks: true,
        },
        data: DataPaths {
            drafts: format!("{FIXTURES}/drafts.csv"),
            player_info: with_info.then(|| format!("{FIXTURES}/player_info.csv")),
        },
        report: ReportConfig::default(),
    }
}

fn fixture_board() -> DraftBoard {
    dataset::load_board(&fixture_config(true)).expect("fixture board should load")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// One draft of `total` picks where the listed picks get the given names and
/// every other pick gets a filler name.
fn draft_with(draft_id: &str, total: i64, named: &[(i64, &str)]) -> Vec<PickRecord> {
    (1..=total)
        .map(|p| {
            let name = named
                .iter()
                .find(|(pick, _)| *pick == p)
                .map(|(_, n)| n.to_string())
                .unwrap_or_else(|| format!("{draft_id}-filler-{p}"));
            PickRecord::new(draft_id, p, name)
        })
        .collect()
}

// ===========================================================================
// Loading and the draft model
// ===========================================================================

#[test]
fn fixture_loads_with_expected_shape() {
    let board = fixture_board();
    let summary = board.summary();
    assert_eq!(summary.picks, 48);
    assert_eq!(summary.drafts, 3);
    assert_eq!(summary.teams, 12);
    assert_eq!(summary.rounds, 4);
    assert_eq!(board.team_count(), 4);
}

#[test]
fn fixture_player_list_is_sorted_and_distinct() {
    let board = fixture_board();
    let names = board.player_names();
    assert_eq!(names.len(), 17);
    assert_eq!(names.first(), Some(&"A.J. Brown"));
    assert!(names.contains(&"Drake London"));
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn reference_join_is_left_join() {
    let board = fixture_board();

    let cmc = board.occurrences("Christian McCaffrey").next().unwrap();
    let info = cmc.info.as_ref().expect("McCaffrey has reference data");
    assert_eq!(info.team.as_deref(), Some("SF"));
    assert_eq!(info.position.as_deref(), Some("RB"));
    assert_eq!(info.id.as_deref(), Some("3117251"));

    // Unmatched name is retained with no metadata.
    let london: Vec<_> = board.occurrences("Drake London").collect();
    assert_eq!(london.len(), 1);
    assert!(london[0].info.is_none());

    // Duplicate reference rows never duplicate picks; the latest row wins.
    let saquon: Vec<_> = board.occurrences("Saquon Barkley").collect();
    assert_eq!(saquon.len(), 3);
    assert_eq!(saquon[0].info.as_ref().unwrap().team.as_deref(), Some("PHI"));

    // Reference-only players do not become picks.
    assert_eq!(board.occurrences("Jonathan Taylor").count(), 0);
}

#[test]
fn board_without_reference_has_no_metadata() {
    let board = dataset::load_board(&fixture_config(false)).unwrap();
    assert!(board.picks().iter().all(|p| p.info.is_none()));
}

#[test]
fn every_round_is_a_permutation_of_slots() {
    let board = fixture_board();
    for draft in ["1001", "1002", "1003"] {
        for round in 1..=4 {
            let mut in_round: Vec<_> = board
                .picks()
                .iter()
                .filter(|p| p.draft_id == draft && p.round == round)
                .collect();
            in_round.sort_by_key(|p| p.overall_pick);
            let pir: Vec<u32> = in_round.iter().map(|p| p.pick_in_round).collect();
            assert_eq!(pir, vec![1, 2, 3, 4]);
            let mut slots: Vec<u32> = in_round.iter().map(|p| p.draft_slot).collect();
            slots.sort_unstable();
            assert_eq!(slots, vec![1, 2, 3, 4]);
        }
    }
}

#[test]
fn twelve_team_round_turn() {
    let records = draft_with("D", 24, &[]);
    let board = DraftBoard::build(&records, 12).unwrap();
    let slot = |pick: u32| {
        board
            .picks()
            .iter()
            .find(|p| p.overall_pick == pick)
            .unwrap()
            .draft_slot
    };
    for pick in 1..=12 {
        assert_eq!(slot(pick), pick);
    }
    assert_eq!(slot(13), 12);
    assert_eq!(slot(24), 1);
    assert_eq!(slot(12), slot(13));
}

#[test]
fn team_count_mismatch_still_builds() {
    // Slots are only meaningful when the team count matches the data, but a
    // mismatch alone is not detectable and never fails the build.
    let mut config = fixture_config(false);
    config.draft.team_count = 12;
    let board = dataset::load_board(&config).unwrap();
    assert_eq!(board.summary().rounds, 2);
    assert_eq!(board.summary().teams, 36);
}

#[test]
fn malformed_pick_file_surfaces_integrity_error() {
    let csv_data = "\
PLAYERNAME,SNAKEDRAFTNUM,OVERALLPICKNUM
Puka Nacua,77,1
Drake London,77,two";
    let err = dataset::load_drafts_from_reader(csv_data.as_bytes(), "inline").unwrap_err();
    match err {
        LoadError::Integrity(DraftError::DataIntegrity { draft_id, .. }) => {
            assert_eq!(draft_id.as_deref(), Some("77"));
        }
        other => panic!("expected Integrity, got: {other}"),
    }
}

#[test]
fn missing_drafts_file_is_io_error() {
    let mut config = fixture_config(false);
    config.data.drafts = format!("{FIXTURES}/does_not_exist.csv");
    let err = dataset::load_board(&config).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got: {err}");
}

#[test]
fn zero_team_count_surfaces_from_load() {
    let mut config = fixture_config(false);
    config.draft.team_count = 0;
    let err = dataset::load_board(&config).unwrap_err();
    assert!(
        matches!(err, LoadError::Integrity(DraftError::DataIntegrity { .. })),
        "got: {err}"
    );
}

// ===========================================================================
// Next-pick distribution
// ===========================================================================

#[test]
fn next_pick_always_same_player() {
    let board = fixture_board();
    let dist = next_pick_distribution(&board, "Christian McCaffrey");
    assert_eq!(dist.len(), 1);
    assert_eq!(dist[0].next_player, "Amon-Ra St. Brown");
    assert_eq!(dist[0].count, 3);
    assert_close(dist[0].pct, 100.0);
}

#[test]
fn next_pick_split_distribution() {
    let board = fixture_board();
    let dist = next_pick_distribution(&board, "Bijan Robinson");
    assert_eq!(dist.len(), 2);
    assert_eq!(dist[0].next_player, "Jahmyr Gibbs");
    assert_eq!(dist[0].count, 2);
    assert_close(dist[0].pct, 200.0 / 3.0);
    assert_eq!(dist[1].next_player, "Breece Hall");
    assert_eq!(dist[1].count, 1);
    let pct_sum: f64 = dist.iter().map(|r| r.pct).sum();
    assert_close(pct_sum, 100.0);
}

#[test]
fn next_pick_empty_when_always_final_pick() {
    let board = fixture_board();
    assert!(next_pick_distribution(&board, "Travis Kelce").is_empty());
    assert!(next_pick_distribution(&board, "Drake London").is_empty());
}

#[test]
fn next_pick_unknown_player_is_empty() {
    let board = fixture_board();
    assert!(next_pick_distribution(&board, "Jonathan Taylor").is_empty());
    assert!(next_pick_distribution(&board, "").is_empty());
}

#[test]
fn next_pick_scenario_across_two_drafts() {
    // Six teams: slot 5 picks 5, 8, 17, 20, 29. In draft X, A goes 5th and
    // the same team takes B at 8. In draft Y (30 picks), A goes 29th, that
    // team's last pick.
    let mut records = draft_with("X", 30, &[(5, "A"), (8, "B")]);
    records.extend(draft_with("Y", 30, &[(29, "A")]));
    let board = DraftBoard::build(&records, 6).unwrap();

    let dist = next_pick_distribution(&board, "A");
    assert_eq!(dist.len(), 1);
    assert_eq!(dist[0].next_player, "B");
    assert_eq!(dist[0].count, 1);
    assert_close(dist[0].pct, 100.0);
}

#[test]
fn next_pick_is_idempotent() {
    let board = fixture_board();
    let first = next_pick_distribution(&board, "Bijan Robinson");
    let second = next_pick_distribution(&board, "Bijan Robinson");
    assert_eq!(first, second);
}

// ===========================================================================
// Co-draft analysis
// ===========================================================================

#[test]
fn co_draft_always_together() {
    let board = fixture_board();
    let summary = co_draft_multiple(&board, &["Christian McCaffrey", "Amon-Ra St. Brown"]).unwrap();
    assert_eq!(summary.num_first, 3);
    assert_eq!(summary.num_all, 3);
    assert_close(summary.pct_together, 100.0);
}

#[test]
fn co_draft_partial_overlap_and_rosters() {
    let board = fixture_board();
    let summary = co_draft_multiple(&board, &["Breece Hall", "Bijan Robinson"]).unwrap();
    assert_eq!(summary.num_first, 3);
    assert_eq!(summary.num_all, 2);
    assert_close(summary.pct_together, 200.0 / 3.0);

    let expected: BTreeSet<TeamDraftKey> =
        [TeamDraftKey::new("1001", 4), TeamDraftKey::new("1003", 4)].into();
    assert_eq!(summary.common_keys, expected);

    let rosters = co_draft_rosters(&board, &summary);
    assert_eq!(rosters.len(), 2);
    assert_eq!(
        rosters[0].display_roster(),
        "Breece Hall, Bijan Robinson, Jahmyr Gibbs, Saquon Barkley"
    );
    assert_eq!(
        rosters[1].player_names(),
        vec!["Bijan Robinson", "Breece Hall", "Saquon Barkley", "Jahmyr Gibbs"]
    );
}

#[test]
fn roster_with_info_shows_joined_metadata() {
    let board = fixture_board();
    let summary = co_draft_multiple(&board, &["Breece Hall", "Bijan Robinson"]).unwrap();
    let rosters = co_draft_rosters(&board, &summary);
    // Saquon Barkley's reference row appears twice; the later (PHI) row wins.
    assert_eq!(
        rosters[0].display_roster_with_info(),
        "Breece Hall (RB, NYJ), Bijan Robinson (RB, ATL), Jahmyr Gibbs (RB, DET), \
         Saquon Barkley (RB, PHI)"
    );
}

#[test]
fn roster_with_info_leaves_unmatched_players_plain() {
    let board = fixture_board();
    let summary = co_draft_multiple(&board, &["Drake London"]).unwrap();
    let rosters = co_draft_rosters(&board, &summary);
    assert_eq!(rosters.len(), 1);
    let text = rosters[0].display_roster_with_info();
    assert!(text.ends_with(", Drake London"), "got: {text}");
}

#[test]
fn co_draft_three_players() {
    let board = fixture_board();
    let summary = co_draft_multiple(
        &board,
        &["Tyreek Hill", "Ja'Marr Chase", "Puka Nacua"],
    )
    .unwrap();
    assert_eq!(summary.num_first, 3);
    // 1001 slot 3 and 1003 slot 2 hold all three.
    assert_eq!(summary.num_all, 2);
    assert_eq!(summary.players.len(), 3);
}

#[test]
fn co_draft_common_set_is_order_independent() {
    let board = fixture_board();
    let a = co_draft_multiple(&board, &["Tyreek Hill", "Ja'Marr Chase", "Puka Nacua"]).unwrap();
    let b = co_draft_multiple(&board, &["Puka Nacua", "Tyreek Hill", "Ja'Marr Chase"]).unwrap();
    assert_eq!(a.common_keys, b.common_keys);
    assert_eq!(a.num_all, b.num_all);
}

#[test]
fn co_draft_single_player_matches_own_keys() {
    let board = fixture_board();
    let summary = co_draft_multiple(&board, &["Puka Nacua"]).unwrap();
    assert_close(summary.pct_together, 100.0);
    assert_eq!(summary.common_keys, board.team_keys_for("Puka Nacua"));
}

#[test]
fn co_draft_empty_list_is_invalid_argument() {
    let board = fixture_board();
    let none: Vec<String> = Vec::new();
    let err = co_draft_multiple(&board, &none[..]).unwrap_err();
    assert!(matches!(err, DraftError::InvalidArgument { .. }));

    // The board is still usable after a failed request.
    assert!(co_draft_multiple(&board, &["Puka Nacua"]).is_ok());
}

#[test]
fn co_draft_ten_and_four_scenario() {
    // Two teams, two rounds: slot 1 owns picks 1 and 4. A goes first in ten
    // drafts; B lands on A's team in four of them and on the other team in
    // the rest.
    let mut records = Vec::new();
    for d in 0..10 {
        let id = format!("D{d}");
        let b_pick = if d < 4 { 4 } else { 2 };
        records.extend(draft_with(&id, 4, &[(1, "A"), (b_pick, "B")]));
    }
    let board = DraftBoard::build(&records, 2).unwrap();

    let summary = co_draft_multiple(&board, &["A", "B"]).unwrap();
    assert_eq!(summary.num_first, 10);
    assert_eq!(summary.num_all, 4);
    assert_close(summary.pct_together, 40.0);
}
