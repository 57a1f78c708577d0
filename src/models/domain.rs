use serde::{Deserialize, Serialize};

/// Job listing posted by an employer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "employerId", default)]
    pub employer_id: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_status() -> String {
    "active".to_string()
}

/// Candidate profile captured during onboarding (voice or typed input)
///
/// All matching fields are free text and may be empty. Voice-transcribed
/// input is noisy, so absent fields decode as empty strings at the store
/// boundary rather than failing the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "jobDescription", default)]
    pub job_description: String,
    #[serde(rename = "jobPreference", default)]
    pub job_preference: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A job listing paired with its match score for one candidate
///
/// Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job: JobListing,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchedTerms")]
    pub matched_terms: Vec<String>,
}

/// Scoring weights
///
/// Defaults reproduce the production algorithm: exact location match 0.4,
/// partial (substring) location match 0.2, requirement overlap up to 0.6.
/// `location_exact + requirements` must not exceed 1.0 if scores are to stay
/// in the [0, 1] range without clamping.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub location_exact: f64,
    pub location_partial: f64,
    pub requirements: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location_exact: 0.4,
            location_partial: 0.2,
            requirements: 0.6,
        }
    }
}
