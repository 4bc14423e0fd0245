use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};

use ax_core::api::RegisterRequest;
use ax_core::UserProfile;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

pub async fn list_users(
    State(state): State<SharedState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    Ok(Json(state.users_read().clone()))
}

pub async fn register(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let mut users = state.users_write();

    request.validate(users.iter().map(|user| user.email.as_str()))?;

    let profile = request.into_profile(Utc::now().year());
    users.push(profile.clone());

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Whole-profile replacement, keyed by the path id.
pub async fn update_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, ApiError> {
    if profile.id != id {
        return Err(ApiError::BadRequest(format!(
            "body id {} does not match path id {id}",
            profile.id
        )));
    }
    if profile.name.trim().is_empty() {
        return Err(ApiError::BadRequest("required field is empty: name".into()));
    }

    let mut users = state.users_write();
    match users.iter_mut().find(|user| user.id == id) {
        Some(slot) => {
            *slot = profile.clone();
            Ok(Json(profile))
        }
        None => Err(ApiError::NotFound(format!("user {id} not found"))),
    }
}
