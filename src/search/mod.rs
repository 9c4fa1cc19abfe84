//! In-text search: literal matching, highlight rendering, cursor state.

pub mod highlight;
pub mod matcher;
pub mod state;

pub use matcher::{MatchSpan, compute_matches};
pub use state::SearchState;
