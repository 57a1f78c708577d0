use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to fetch job recommendations for a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Optional cap on the number of recommendations returned. The ranking
    /// itself is always computed over the full job list.
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to create a job listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(alias = "employer_id", rename = "employerId", default)]
    pub employer_id: Option<String>,
}
