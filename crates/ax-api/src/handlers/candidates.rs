use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use ax_core::api::SyncAck;
use ax_core::Job;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

fn validate_candidate(job: &Job) -> Result<(), ApiError> {
    let required = [
        (job.id.as_str(), "id"),
        (job.title.as_str(), "title"),
        (job.company.as_str(), "company"),
        (job.location.as_str(), "location"),
        (job.description.as_str(), "description"),
    ];

    for (value, field) in required {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "required field is empty: {field}"
            )));
        }
    }

    Ok(())
}

pub async fn list_candidates(
    State(state): State<SharedState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(state.jobs_read().all().to_vec()))
}

/// Create echoes success/failure; the client has already applied the record
/// locally and carries its own id.
pub async fn create_candidate(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(job): Json<Job>,
) -> Result<(StatusCode, Json<SyncAck>), ApiError> {
    validate_candidate(&job)?;
    state.jobs_write().insert(job)?;
    Ok((StatusCode::CREATED, Json(SyncAck { success: true })))
}

/// Whole-record replacement; no partial patches.
pub async fn update_candidate(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(job): Json<Job>,
) -> Result<Json<SyncAck>, ApiError> {
    if job.id != id {
        return Err(ApiError::BadRequest(format!(
            "body id {} does not match path id {id}",
            job.id
        )));
    }
    validate_candidate(&job)?;
    state.jobs_write().replace(job)?;
    Ok(Json(SyncAck { success: true }))
}
