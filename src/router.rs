use std::sync::Arc;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use http::header::{CONNECTION, CONTENT_LENGTH, ORIGIN};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower::ServiceBuilder;
use crate::auth::routes::create_auth_routes;
use crate::chatbot::routes::create_chat_routes;
use crate::core::AppState;
use crate::messaging::routes::create_message_routes;
use crate::talents::routes::create_talent_routes;

/**
 * Initializing the api routes. Authentication is enforced per handler via the
 * bearer-token extractor, so every feature router is merged into one tree.
 */
pub fn init_router(app_state: AppState) -> Router {
    let origin = app_state.env.server.cors_origin.clone();
    let cors = CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>().unwrap())
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE, CONTENT_LENGTH, CONNECTION, ORIGIN])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS]);

    Router::new()
        .route("/", get(|| async { "Hello! This is the TalentCarte API. 🎴" }))
        .route("/health", get(|| async { (StatusCode::OK, "Healthy").into_response() }))
        .merge(create_auth_routes())
        .merge(create_talent_routes())
        .merge(create_message_routes())
        .merge(create_chat_routes())
        .layer(
            ServiceBuilder::new() //layering top to bottom middleware
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
        .with_state(Arc::new(app_state))
}
