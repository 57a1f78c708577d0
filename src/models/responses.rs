use crate::models::domain::{JobListing, JobMatch};
use serde::{Deserialize, Serialize};

/// One ranked job in a recommendations response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedJob {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub title: String,
    pub location: String,
    pub requirements: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchedTerms")]
    pub matched_terms: Vec<String>,
    /// Notification line shown in the candidate's inbox,
    /// e.g. `We found a match: House Cleaner (73.00% match)`.
    pub description: String,
}

impl From<JobMatch> for RecommendedJob {
    fn from(m: JobMatch) -> Self {
        let description = format!(
            "We found a match: {} ({:.2}% match)",
            m.job.title,
            m.match_score * 100.0
        );
        Self {
            job_id: m.job.id,
            title: m.job.title,
            location: m.job.location,
            requirements: m.job.requirements,
            match_score: m.match_score,
            matched_terms: m.matched_terms,
            description,
        }
    }
}

/// Response for the find recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendedJob>,
    #[serde(rename = "totalJobs")]
    pub total_jobs: usize,
}

/// Response for the create job endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub success: bool,
    #[serde(rename = "jobId")]
    pub job_id: String,
}

/// Response for the list jobs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobListing>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
