// Co-draft explorer entry point.
//
// Startup sequence:
// 1. Parse arguments and initialize tracing (stderr; stdout carries results)
// 2. Load config, then apply command-line overrides
// 3. Load the draft export (and optional player reference) and build the board
// 4. Run the requested query and print a table or JSON

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tracing::info;

use codraft_core::config::{self, Config};
use codraft_core::dataset;
use codraft_core::{
    co_draft_multiple, co_draft_rosters, next_pick_distribution, CoDraftSummary, DraftBoard,
    NextPickShare, TeamRoster,
};

/// Explore snake-draft history: who gets drafted next, and who gets drafted together.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Draft export CSV (PLAYERNAME, SNAKEDRAFTNUM, OVERALLPICKNUM).
    #[arg(long, global = true, value_name = "CSV")]
    drafts: Option<PathBuf>,

    /// Player reference CSV (Name, Team, Position, ID).
    #[arg(long, global = true, value_name = "CSV", conflicts_with = "no_player_info")]
    player_info: Option<PathBuf>,

    /// Skip the player reference join even if the config names a file.
    #[arg(long, global = true)]
    no_player_info: bool,

    /// Teams per round; must match the drafts in the export.
    #[arg(long, global = true, value_name = "N")]
    teams: Option<u32>,

    /// Directory searched for config/codraft.toml and defaults/codraft.toml.
    /// Relative data paths from that config resolve against this directory;
    /// `--drafts` and `--player-info` still resolve against the current one.
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every drafted player, sorted.
    Players,

    /// Show who the same team drafted immediately after a player.
    NextPick {
        /// Player name exactly as it appears in the export.
        player: String,
    },

    /// Show how often players were all drafted by the same team.
    CoDraft {
        /// Player names; the first one is the player the rate is conditioned on.
        #[arg(required = true)]
        players: Vec<String>,

        /// Also list the full roster of every team that drafted them all.
        #[arg(long)]
        rosters: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = resolve_config(&cli)?;
    info!(
        "Using {} teams per round, drafts from {}",
        config.draft.team_count, config.data.drafts
    );

    let board = dataset::load_board(&config).context("failed to load dataset")?;

    match &cli.command {
        Commands::Players => print_players(&board, cli.json),
        Commands::NextPick { player } => {
            let dist = next_pick_distribution(&board, player);
            print_next_pick(player, &dist, config.report.max_rows, cli.json)
        }
        Commands::CoDraft { players, rosters } => {
            let summary =
                co_draft_multiple(&board, players.as_slice()).context("co-draft analysis failed")?;
            let roster_rows = if *rosters {
                co_draft_rosters(&board, &summary)
            } else {
                Vec::new()
            };
            print_co_draft(&summary, &roster_rows, cli.json)
        }
    }
}

/// Load the config file for the chosen base directory, then layer the
/// command-line overrides on top and re-validate.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config_dir {
        Some(dir) => {
            let mut config =
                config::load_config_from(dir).context("failed to load configuration")?;
            config.data.rebase(dir);
            config
        }
        None => config::load_config().context("failed to load configuration")?,
    };

    if let Some(path) = &cli.drafts {
        config.data.drafts = path.display().to_string();
    }
    if let Some(path) = &cli.player_info {
        config.data.player_info = Some(path.display().to_string());
    }
    if cli.no_player_info {
        config.data.player_info = None;
    }
    if let Some(teams) = cli.teams {
        config.draft.team_count = teams;
    }

    config::validate(&config).context("invalid command-line override")?;
    Ok(config)
}

/// Initialize tracing to stderr so result tables on stdout stay clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("codraft=info,codraft_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn print_players(board: &DraftBoard, json: bool) -> anyhow::Result<()> {
    let names = board.player_names();
    if json {
        return print_json(&names);
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn print_next_pick(
    player: &str,
    dist: &[NextPickShare],
    max_rows: usize,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(dist);
    }
    if dist.is_empty() {
        println!("No subsequent picks found for {player}.");
        return Ok(());
    }

    println!("Next-pick distribution after {player}");
    let mut table = new_table(&["Next player", "Count", "Pct"]);
    for row in dist.iter().take(max_rows) {
        table.add_row(vec![
            row.next_player.clone(),
            row.count.to_string(),
            format!("{:.1}%", row.pct),
        ]);
    }
    println!("{table}");
    if dist.len() > max_rows {
        println!("({} more not shown)", dist.len() - max_rows);
    }
    Ok(())
}

#[derive(Serialize)]
struct CoDraftOutput<'a> {
    #[serde(flatten)]
    summary: &'a CoDraftSummary,
    #[serde(skip_serializing_if = "no_rosters")]
    rosters: &'a [TeamRoster],
}

fn no_rosters(rosters: &&[TeamRoster]) -> bool {
    rosters.is_empty()
}

fn print_co_draft(
    summary: &CoDraftSummary,
    rosters: &[TeamRoster],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(&CoDraftOutput { summary, rosters });
    }

    println!("Analyzed players: {}", summary.players.join(", "));
    println!(
        "- Times {} was drafted: {}",
        summary.players[0], summary.num_first
    );
    println!("- Times all selected were drafted together: {}", summary.num_all);
    println!("- Percentage together: {:.1}%", summary.pct_together);

    if rosters.is_empty() {
        return Ok(());
    }
    let mut table = new_table(&["Draft", "Slot", "Team roster"]);
    for roster in rosters {
        table.add_row(vec![
            roster.key.draft_id.clone(),
            roster.key.draft_slot.to_string(),
            roster.display_roster_with_info(),
        ]);
    }
    println!("{table}");
    Ok(())
}
