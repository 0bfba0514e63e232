//! Adversarial search for the AI's reply.

mod cache;
mod minimax;

pub use cache::{Bound, CacheEntry, TranspositionCache};
pub use minimax::{ALPHA_INIT, BETA_INIT, SearchResult, immediate_win, minimax, score_terminal};
