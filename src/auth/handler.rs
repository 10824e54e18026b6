use std::sync::Arc;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crate::auth::auth_service::AuthService;
use crate::auth::extract::AuthUser;
use crate::auth::model::{AuthResponse, ChangePasswordRequest, LinkTalentRequest, LoginRequest, ProfilePatch, RegisterRequest, UserResponse, VerifyResponse};
use crate::core::AppState;
use crate::errors::AppError;

pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(state, payload).await?;
    Ok(Json(response))
}

pub async fn handle_get_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser
) -> Result<Json<UserResponse>, AppError> {
    let profile = AuthService::get_profile(state, &user.user_id).await?;
    Ok(Json(profile))
}

pub async fn handle_update_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(patch): Json<ProfilePatch>
) -> Result<Json<UserResponse>, AppError> {
    let profile = AuthService::update_profile(state, &user.user_id, patch).await?;
    Ok(Json(profile))
}

pub async fn handle_change_password(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>
) -> Result<Json<serde_json::Value>, AppError> {
    AuthService::change_password(state, &user.user_id, payload).await?;
    Ok(Json(serde_json::json!({ "message": "Password changed successfully." })))
}

pub async fn handle_link_talent(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<LinkTalentRequest>
) -> Result<Json<UserResponse>, AppError> {
    let profile = AuthService::link_talent(state, &user.user_id, &payload.talent_id).await?;
    Ok(Json(profile))
}

/// The extractor has already verified the token when this body runs.
pub async fn handle_verify_token(
    State(state): State<Arc<AppState>>,
    user: AuthUser
) -> Result<Json<VerifyResponse>, AppError> {
    let profile = AuthService::get_profile(state, &user.user_id).await?;
    Ok(Json(VerifyResponse { valid: true, user: profile }))
}
