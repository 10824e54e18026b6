use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::auth::handler::{handle_change_password, handle_get_profile, handle_link_talent, handle_login, handle_register, handle_update_profile, handle_verify_token};
use crate::core::AppState;

pub fn create_auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/profile", get(handle_get_profile).put(handle_update_profile))
        .route("/api/auth/change-password", post(handle_change_password))
        .route("/api/auth/link-talent", post(handle_link_talent))
        .route("/api/auth/verify", get(handle_verify_token))
}
