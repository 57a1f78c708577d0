// Core algorithm exports
pub mod recommender;
pub mod scoring;
pub mod text;

pub use recommender::{JobRanker, JobStore, ProfileStore, Recommender, StoreError};
pub use scoring::match_score;
pub use text::{candidate_text, normalize, tokenize};
