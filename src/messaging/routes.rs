use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::core::AppState;
use crate::messaging::handler::{handle_conversation_messages, handle_list_conversations, handle_send_direct_message, handle_send_message, handle_unread_count};

pub fn create_message_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/messages/conversations", get(handle_list_conversations))
        .route("/api/messages/conversations/{conversation_id}", get(handle_conversation_messages))
        .route("/api/messages/send", post(handle_send_message))
        .route("/api/messages/direct", post(handle_send_direct_message))
        .route("/api/messages/unread-count", get(handle_unread_count))
}
