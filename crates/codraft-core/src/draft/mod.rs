// Snake-draft model: per-pick slot assignment and the team-draft index.

pub mod board;
pub mod pick;
