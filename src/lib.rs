//! Rozgar Algo - Job recommendation service for the Rozgar job portal
//!
//! This library provides the job/candidate matching core used by the Rozgar
//! voice-first job portal: a deterministic match scorer (location similarity
//! plus free-text requirement overlap) and a recommender that ranks every
//! listing against one candidate profile.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{match_score, JobRanker, JobStore, ProfileStore, Recommender, StoreError};
pub use crate::models::{CandidateProfile, JobListing, JobMatch, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let job = JobListing {
            id: "job1".to_string(),
            title: "Cook".to_string(),
            location: "Mumbai".to_string(),
            requirements: "cooking".to_string(),
            status: "active".to_string(),
            employer_id: None,
            created_at: None,
        };
        let profile = CandidateProfile {
            user_id: "u1".to_string(),
            name: None,
            location: "Mumbai".to_string(),
            job_description: "cooking".to_string(),
            job_preference: String::new(),
            created_at: None,
        };

        let (score, _) = match_score(&job, &profile, &ScoringWeights::default());
        assert!((score - 1.0).abs() < 1e-9);
    }
}
