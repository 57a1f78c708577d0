// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateProfile, JobListing, JobMatch, ScoringWeights};
pub use requests::{CreateJobRequest, RecommendationsRequest};
pub use responses::{
    CreateJobResponse, ErrorResponse, HealthResponse, JobListResponse, RecommendationsResponse,
    RecommendedJob,
};
