use crate::core::{JobStore, Recommender};
use crate::models::{
    CreateJobRequest, CreateJobResponse, ErrorResponse, HealthResponse, JobListResponse,
    RecommendationsRequest, RecommendationsResponse, RecommendedJob,
};
use crate::services::{CachedJobStore, FirestoreClient};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub firestore: Arc<FirestoreClient>,
    pub jobs: CachedJobStore,
    pub recommender: Arc<Recommender<Arc<FirestoreClient>, CachedJobStore>>,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations))
        .route("/jobs", web::post().to(create_job))
        .route("/jobs", web::get().to(list_jobs));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find recommendations endpoint
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20
/// }
/// ```
///
/// A user without a profile gets an empty list with HTTP 200; the client
/// renders that as "no matches yet". Store failures surface as a retry-able
/// 500.
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;

    tracing::info!("Finding job recommendations for user: {}", user_id);

    let matches = match state.recommender.recommend(user_id).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Failed to compute recommendations for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to compute recommendations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let total_jobs = matches.len();

    // The ranking is computed over the full list; limit only trims the
    // response. Cap at 100 to bound payload size.
    let mut recommendations: Vec<RecommendedJob> =
        matches.into_iter().map(RecommendedJob::from).collect();
    if let Some(limit) = req.limit {
        recommendations.truncate(limit.min(100) as usize);
    }

    tracing::info!(
        "Returning {} recommendations for user {} (from {} job listings)",
        recommendations.len(),
        user_id,
        total_jobs
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations,
        total_jobs,
    })
}

/// Create job listing endpoint
///
/// POST /api/v1/jobs
///
/// Request body:
/// ```json
/// {
///   "title": "string",
///   "location": "string",
///   "requirements": "string",
///   "employerId": "string"
/// }
/// ```
async fn create_job(
    state: web::Data<AppState>,
    req: web::Json<CreateJobRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.firestore.create_job_listing(&req).await {
        Ok(job) => {
            // New listing must show up in the next recommendation request.
            state.jobs.invalidate().await;

            HttpResponse::Ok().json(CreateJobResponse {
                success: true,
                job_id: job.id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to create job listing: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to create job listing".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List job listings endpoint
///
/// GET /api/v1/jobs
async fn list_jobs(state: web::Data<AppState>) -> impl Responder {
    match state.jobs.list_jobs().await {
        Ok(jobs) => {
            let total = jobs.len();
            HttpResponse::Ok().json(JobListResponse { jobs, total })
        }
        Err(e) => {
            tracing::error!("Failed to list job listings: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list job listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
