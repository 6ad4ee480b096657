// Dataset loading: the draft export CSV and the optional player reference CSV.
//
// Draft export columns: PLAYERNAME, SNAKEDRAFTNUM, OVERALLPICKNUM (extra
// columns are ignored). Reference columns: Name, Team, Position, ID.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::draft::board::DraftBoard;
use crate::draft::pick::{PickRecord, PlayerInfo};
use crate::error::DraftError;

const COL_PLAYER: &str = "PLAYERNAME";
const COL_DRAFT: &str = "SNAKEDRAFTNUM";
const COL_PICK: &str = "OVERALLPICKNUM";
const COL_NAME: &str = "Name";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column {column}")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path} line {line}: {column} is empty")]
    MissingField {
        path: String,
        line: u64,
        column: &'static str,
    },

    #[error(transparent)]
    Integrity(#[from] DraftError),

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Player reference directory
// ---------------------------------------------------------------------------

/// Reference metadata keyed by player name, used for the left join onto picks.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    by_name: HashMap<String, PlayerInfo>,
}

impl PlayerDirectory {
    /// Later entries replace earlier ones with the same name, so the join can
    /// never duplicate a pick.
    pub fn new(entries: impl IntoIterator<Item = PlayerInfo>) -> Self {
        let mut by_name = HashMap::new();
        for entry in entries {
            if by_name.contains_key(&entry.name) {
                warn!("duplicate reference entry for '{}', using latest row", entry.name);
            }
            by_name.insert(entry.name.clone(), entry);
        }
        PlayerDirectory { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerInfo> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawDraftRow {
    PLAYERNAME: Option<String>,
    SNAKEDRAFTNUM: Option<String>,
    OVERALLPICKNUM: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerInfo {
    Name: Option<String>,
    #[serde(default)]
    Team: Option<String>,
    #[serde(default)]
    Position: Option<String>,
    #[serde(default)]
    ID: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a pick number. Whole-valued decimals such as `13.0` (common in
/// spreadsheet exports) are accepted; anything else is an integrity error.
fn parse_pick(draft_id: &str, line: u64, raw: &str) -> Result<i64, DraftError> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(DraftError::integrity(
            draft_id,
            None,
            format!("line {line}: {COL_PICK} value {raw:?} is not an integer"),
        )),
    }
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    source: &str,
    columns: &[&'static str],
) -> Result<(), LoadError> {
    let headers = reader.headers().map_err(|e| LoadError::Csv {
        path: source.to_string(),
        source: e,
    })?;
    for &column in columns {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(LoadError::MissingColumn {
                path: source.to_string(),
                column,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

/// Parse draft export rows. `source` labels errors (usually the file path).
///
/// Fully blank rows are skipped with a warning. A row with some values but a
/// missing draft id or player name is rejected, as is any pick number that is
/// missing or not an integer.
pub fn load_drafts_from_reader<R: Read>(rdr: R, source: &str) -> Result<Vec<PickRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    require_columns(&mut reader, source, &[COL_PLAYER, COL_DRAFT, COL_PICK])?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawDraftRow>().enumerate() {
        // Header is line 1.
        let line = idx as u64 + 2;
        let raw = result.map_err(|e| LoadError::Csv {
            path: source.to_string(),
            source: e,
        })?;

        let player = non_blank(raw.PLAYERNAME);
        let draft_id = non_blank(raw.SNAKEDRAFTNUM);
        let pick = non_blank(raw.OVERALLPICKNUM);

        if player.is_none() && draft_id.is_none() && pick.is_none() {
            warn!("skipping blank row at {} line {}", source, line);
            continue;
        }

        let draft_id = draft_id.ok_or_else(|| LoadError::MissingField {
            path: source.to_string(),
            line,
            column: COL_DRAFT,
        })?;
        let player_name = player.ok_or_else(|| LoadError::MissingField {
            path: source.to_string(),
            line,
            column: COL_PLAYER,
        })?;
        let pick = pick.ok_or_else(|| {
            DraftError::integrity(
                draft_id.clone(),
                None,
                format!("line {line}: {COL_PICK} is missing"),
            )
        })?;
        let overall_pick = parse_pick(&draft_id, line, &pick)?;

        records.push(PickRecord {
            draft_id,
            overall_pick,
            player_name,
        });
    }
    Ok(records)
}

/// Parse player reference rows. Rows without a name are skipped.
pub fn load_player_info_from_reader<R: Read>(
    rdr: R,
    source: &str,
) -> Result<PlayerDirectory, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    require_columns(&mut reader, source, &[COL_NAME])?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<RawPlayerInfo>() {
        let raw = result.map_err(|e| LoadError::Csv {
            path: source.to_string(),
            source: e,
        })?;
        let Some(name) = non_blank(raw.Name) else {
            warn!("skipping reference row without a name in {}", source);
            continue;
        };
        entries.push(PlayerInfo {
            name,
            team: non_blank(raw.Team),
            position: non_blank(raw.Position),
            id: non_blank(raw.ID),
        });
    }
    Ok(PlayerDirectory::new(entries))
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load pick records from a draft export CSV file.
pub fn load_drafts(path: &Path) -> Result<Vec<PickRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_drafts_from_reader(file, &path.display().to_string())
}

/// Load the player reference CSV file.
pub fn load_player_info(path: &Path) -> Result<PlayerDirectory, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_player_info_from_reader(file, &path.display().to_string())
}

/// Load the files named in the config and build the draft board.
pub fn load_board(config: &Config) -> Result<DraftBoard, LoadError> {
    let records = load_drafts(Path::new(&config.data.drafts))?;
    if records.is_empty() {
        return Err(LoadError::Validation(format!(
            "{} produced zero pick rows",
            config.data.drafts
        )));
    }
    info!("Loaded {} pick rows from {}", records.len(), config.data.drafts);

    let directory = match &config.data.player_info {
        Some(path) => {
            let dir = load_player_info(Path::new(path))?;
            info!("Loaded {} reference players from {}", dir.len(), path);
            Some(dir)
        }
        None => None,
    };

    Ok(DraftBoard::build_with(
        &records,
        &config.draft,
        directory.as_ref(),
    )?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
