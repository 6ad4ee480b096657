// Team co-occurrence queries over a built draft board.

pub mod co_draft;
pub mod next_pick;
