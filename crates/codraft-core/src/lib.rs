// Library root: snake-draft model, co-draft analysis, and dataset loading.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod draft;
pub mod error;

pub use analysis::co_draft::{co_draft_multiple, co_draft_rosters, CoDraftSummary, TeamRoster};
pub use analysis::next_pick::{next_pick_distribution, NextPickShare};
pub use draft::board::DraftBoard;
pub use draft::pick::{DraftPick, PickRecord, PlayerInfo, TeamDraftKey};
pub use error::DraftError;
