use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::chatbot::handler::{handle_chat_info, handle_chat_message};
use crate::core::AppState;

pub fn create_chat_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chat", get(handle_chat_info))
        .route("/api/chat/message", post(handle_chat_message))
}
