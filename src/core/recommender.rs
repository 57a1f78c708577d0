use crate::core::scoring::match_score;
use crate::models::{CandidateProfile, JobListing, JobMatch, ScoringWeights};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error surfaced when a backing store cannot serve a fetch
///
/// Retry/backoff is the caller's concern; the recommender propagates this
/// unchanged. "Profile not found" is not an error (see [`ProfileStore`]).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to candidate profiles
///
/// `Ok(None)` means the profile does not exist (a new user who has not
/// onboarded yet); errors are reserved for the store being unreachable.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, StoreError>;
}

/// Read access to the job listing collection
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError>;
}

#[async_trait]
impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, StoreError> {
        (**self).get_profile(user_id).await
    }
}

#[async_trait]
impl<T: JobStore + ?Sized> JobStore for Arc<T> {
    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        (**self).list_jobs().await
    }
}

/// Pure ranking stage: scores a job list against one profile and sorts it
#[derive(Debug, Clone)]
pub struct JobRanker {
    weights: ScoringWeights,
}

impl JobRanker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score every job against the profile and sort by score, highest first.
    ///
    /// No minimum-score filter and no truncation: "top N" is a presentation
    /// concern. `sort_by` is stable, so jobs with equal scores keep the order
    /// they were fetched in; that is the documented tie-break.
    pub fn rank(&self, profile: &CandidateProfile, jobs: Vec<JobListing>) -> Vec<JobMatch> {
        let mut matches: Vec<JobMatch> = jobs
            .into_iter()
            .map(|job| {
                let (score, matched_terms) = match_score(&job, profile, &self.weights);
                JobMatch {
                    job,
                    match_score: score,
                    matched_terms,
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        matches
    }
}

impl Default for JobRanker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Recommendation orchestrator
///
/// Fetches the candidate profile and the full job list from the injected
/// stores, then ranks. Owns nothing beyond the transient match list for the
/// duration of one call.
#[derive(Debug, Clone)]
pub struct Recommender<P, J> {
    profiles: P,
    jobs: J,
    ranker: JobRanker,
}

impl<P, J> Recommender<P, J>
where
    P: ProfileStore,
    J: JobStore,
{
    pub fn new(profiles: P, jobs: J, ranker: JobRanker) -> Self {
        Self {
            profiles,
            jobs,
            ranker,
        }
    }

    /// Compute ranked job recommendations for a candidate.
    ///
    /// An unknown `user_id` yields an empty list, not an error: new users
    /// without a profile are an expected, common case and the UI renders
    /// "no matches yet". Store failures propagate unchanged.
    pub async fn recommend(&self, user_id: &str) -> Result<Vec<JobMatch>, StoreError> {
        let Some(profile) = self.profiles.get_profile(user_id).await? else {
            tracing::info!("No candidate profile for user {}, returning no matches", user_id);
            return Ok(Vec::new());
        };

        let jobs = self.jobs.list_jobs().await?;
        tracing::debug!("Ranking {} job listings for user {}", jobs.len(), user_id);

        Ok(self.ranker.rank(&profile, jobs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_job(id: &str, location: &str, requirements: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: format!("Job {}", id),
            location: location.to_string(),
            requirements: requirements.to_string(),
            status: "active".to_string(),
            employer_id: None,
            created_at: None,
        }
    }

    fn create_profile(location: &str, description: &str, preference: &str) -> CandidateProfile {
        CandidateProfile {
            user_id: "user1".to_string(),
            name: None,
            location: location.to_string(),
            job_description: description.to_string(),
            job_preference: preference.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranker = JobRanker::with_default_weights();
        let profile = create_profile("Mumbai", "experienced cook", "cooking");

        let jobs = vec![
            create_job("1", "Delhi", "welding"),
            create_job("2", "Mumbai", "cooking"),
            create_job("3", "Navi Mumbai", "cooking cleaning"),
        ];

        let ranked = ranker.rank(&profile, jobs);

        assert_eq!(ranked.len(), 3);
        for pair in ranked.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        assert_eq!(ranked[0].job.id, "2");
    }

    #[test]
    fn test_rank_keeps_fetch_order_on_ties() {
        let ranker = JobRanker::with_default_weights();
        let profile = create_profile("Mumbai", "", "");

        // Identical jobs score identically; stable sort keeps input order.
        let jobs = vec![
            create_job("a", "Mumbai", "x"),
            create_job("b", "Mumbai", "x"),
            create_job("c", "Mumbai", "x"),
        ];

        let ranked = ranker.rank(&profile, jobs);
        let ids: Vec<&str> = ranked.iter().map(|m| m.job.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_empty_job_list() {
        let ranker = JobRanker::with_default_weights();
        let profile = create_profile("Mumbai", "cook", "");

        assert!(ranker.rank(&profile, Vec::new()).is_empty());
    }

    #[test]
    fn test_rank_does_not_truncate() {
        let ranker = JobRanker::with_default_weights();
        let profile = create_profile("Mumbai", "", "");

        let jobs: Vec<JobListing> = (0..250)
            .map(|i| create_job(&i.to_string(), "Mumbai", "work"))
            .collect();

        assert_eq!(ranker.rank(&profile, jobs).len(), 250);
    }
}
