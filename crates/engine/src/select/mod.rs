//! Choosing one outfit from scored candidates.
//!
//! Three paths, tried in order by [`crate::Recommender`]:
//! - [`LlmSelector`] when the LLM-assisted strategy is configured
//! - [`best_outfit`], an exhaustive search over the top-K pool
//! - [`random_outfit`] when neither produces an outfit with a base

mod candidates;
mod fallback;
mod llm;
mod rules;
mod search;

pub use candidates::{top_candidates, CandidatePool};
pub use fallback::random_outfit;
pub use llm::{parse_selection, LlmSelector, PromptContext, SelectionParseError};
pub use rules::OutfitRules;
pub use search::{best_outfit, SearchOutcome};
