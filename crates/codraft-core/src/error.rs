// Error types shared by the draft model and the analyzers.

use thiserror::Error;

/// Failure of a single model-building or analysis request.
///
/// Neither variant poisons a board that was already built; callers can keep
/// issuing queries after an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Malformed pick numbering or an impossible slot computation.
    #[error(
        "data integrity error{}{}: {message}",
        fmt_draft(.draft_id),
        fmt_pick(.pick)
    )]
    DataIntegrity {
        /// `None` when the problem is not tied to one draft, e.g. a zero team count.
        draft_id: Option<String>,
        pick: Option<i64>,
        message: String,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DraftError {
    pub(crate) fn integrity(
        draft_id: impl Into<String>,
        pick: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        DraftError::DataIntegrity {
            draft_id: Some(draft_id.into()),
            pick,
            message: message.into(),
        }
    }

    /// Integrity failure that applies to the whole dataset rather than one draft.
    pub(crate) fn dataset_integrity(message: impl Into<String>) -> Self {
        DraftError::DataIntegrity {
            draft_id: None,
            pick: None,
            message: message.into(),
        }
    }
}

fn fmt_draft(draft_id: &Option<String>) -> String {
    match draft_id {
        Some(id) => format!(" in draft {id}"),
        None => String::new(),
    }
}

fn fmt_pick(pick: &Option<i64>) -> String {
    match pick {
        Some(p) => format!(" at pick {p}"),
        None => String::new(),
    }
}
