//! Bracket business logic: generation and result propagation.

mod builder;
mod propagator;

pub use builder::generate_bracket;
pub use propagator::{apply_match_result, clear_match_result, swap_participants, Propagation};
