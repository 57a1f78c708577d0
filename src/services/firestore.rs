use crate::core::{JobStore, ProfileStore, StoreError};
use crate::models::{CandidateProfile, CreateJobRequest, JobListing};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Firestore
#[derive(Debug, Error)]
pub enum FirestoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<FirestoreError> for StoreError {
    fn from(e: FirestoreError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Firestore REST API client
///
/// Handles all communication with the Firestore backend:
/// - Fetching candidate profiles (documents keyed by user id)
/// - Scanning the job listing collection
/// - Creating job listings for employers
pub struct FirestoreClient {
    endpoint: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: FirestoreCollections,
}

/// Collection names in Firestore
#[derive(Debug, Clone)]
pub struct FirestoreCollections {
    pub user_profiles: String,
    pub job_listings: String,
}

const LIST_PAGE_SIZE: usize = 300;

impl FirestoreClient {
    /// Create a new Firestore client
    pub fn new(
        endpoint: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: FirestoreCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.database_id,
            collection
        )
    }

    /// Fetch a candidate profile; the document id is the user id.
    pub async fn get_candidate_profile(
        &self,
        user_id: &str,
    ) -> Result<CandidateProfile, FirestoreError> {
        let url = format!(
            "{}/{}?key={}",
            self.collection_url(&self.collections.user_profiles),
            urlencoding::encode(user_id),
            self.api_key
        );

        tracing::debug!("Fetching candidate profile for user: {}", user_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FirestoreError::NotFound(format!(
                "Profile not found for user {}",
                user_id
            )));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FirestoreError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FirestoreError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let doc: Value = response.json().await?;
        parse_profile(&doc, user_id)
            .ok_or_else(|| FirestoreError::InvalidResponse("Missing fields object".into()))
    }

    /// Fetch every job listing, following page tokens until the collection
    /// is exhausted.
    pub async fn list_job_listings(&self) -> Result<Vec<JobListing>, FirestoreError> {
        let base_url = self.collection_url(&self.collections.job_listings);
        let mut jobs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}?pageSize={}&key={}",
                base_url, LIST_PAGE_SIZE, self.api_key
            );
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
            }

            let response = self.client.get(&url).send().await?;

            let status = response.status();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(FirestoreError::Unauthorized);
            }
            if !status.is_success() {
                return Err(FirestoreError::ApiError(format!(
                    "Failed to list job listings: {}",
                    status
                )));
            }

            let json: Value = response.json().await?;

            // An empty collection comes back as {} with no documents array.
            if let Some(documents) = json.get("documents").and_then(|d| d.as_array()) {
                jobs.extend(documents.iter().filter_map(parse_job));
            }

            match json.get("nextPageToken").and_then(Value::as_str) {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }

        tracing::debug!("Fetched {} job listings", jobs.len());

        Ok(jobs)
    }

    /// Create a job listing with a client-generated document id.
    ///
    /// New listings start with status "active" and a creation timestamp.
    pub async fn create_job_listing(
        &self,
        request: &CreateJobRequest,
    ) -> Result<JobListing, FirestoreError> {
        let job_id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let url = format!(
            "{}?documentId={}&key={}",
            self.collection_url(&self.collections.job_listings),
            job_id,
            self.api_key
        );

        let mut fields = json!({
            "title": string_value(&request.title),
            "location": string_value(&request.location),
            "requirements": string_value(&request.requirements),
            "status": string_value("active"),
            "createdAt": { "timestampValue": created_at.to_rfc3339() },
        });
        if let Some(employer_id) = &request.employer_id {
            fields["employerId"] = string_value(employer_id);
        }

        let response = self
            .client
            .post(&url)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FirestoreError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FirestoreError::ApiError(format!(
                "Failed to create job listing: {}",
                status
            )));
        }

        let doc: Value = response.json().await?;

        tracing::info!("Job listing created with id: {}", job_id);

        parse_job(&doc)
            .ok_or_else(|| FirestoreError::InvalidResponse("Missing fields object".into()))
    }
}

#[async_trait]
impl ProfileStore for FirestoreClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<CandidateProfile>, StoreError> {
        match self.get_candidate_profile(user_id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(FirestoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl JobStore for FirestoreClient {
    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        self.list_job_listings().await.map_err(Into::into)
    }
}

/// Extract the document id from a Firestore document resource name
/// (`projects/../databases/../documents/{collection}/{id}`).
fn document_id(doc: &Value) -> String {
    doc.get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .unwrap_or_default()
        .to_string()
}

/// Read a string field, defaulting to empty when absent or not a string.
///
/// Free-text fields from voice onboarding are frequently missing; a missing
/// field is an empty contribution to matching, never an error.
fn string_field(fields: &Value, key: &str) -> String {
    fields
        .get(key)
        .and_then(|v| v.get("stringValue"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamp_field(fields: &Value, key: &str) -> Option<DateTime<Utc>> {
    fields
        .get(key)
        .and_then(|v| v.get("timestampValue"))
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn parse_job(doc: &Value) -> Option<JobListing> {
    let fields = doc.get("fields")?;

    let status = match string_field(fields, "status") {
        s if s.is_empty() => "active".to_string(),
        s => s,
    };

    let employer_id = match string_field(fields, "employerId") {
        s if s.is_empty() => None,
        s => Some(s),
    };

    Some(JobListing {
        id: document_id(doc),
        title: string_field(fields, "title"),
        location: string_field(fields, "location"),
        requirements: string_field(fields, "requirements"),
        status,
        employer_id,
        created_at: timestamp_field(fields, "createdAt"),
    })
}

fn parse_profile(doc: &Value, user_id: &str) -> Option<CandidateProfile> {
    let fields = doc.get("fields")?;

    let name = match string_field(fields, "name") {
        s if s.is_empty() => None,
        s => Some(s),
    };

    Some(CandidateProfile {
        user_id: user_id.to_string(),
        name,
        location: string_field(fields, "location"),
        job_description: string_field(fields, "jobDescription"),
        job_preference: string_field(fields, "jobPreference"),
        created_at: timestamp_field(fields, "createdAt"),
    })
}
