use std::sync::Arc;
use axum::extract::State;
use axum::Json;
use crate::chatbot::model::{ChatbotInfo, ChatMessageRequest, ChatResponse};
use crate::core::AppState;

pub async fn handle_chat_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatMessageRequest>
) -> Json<ChatResponse> {
    let response = state.chat_relay.reply(&payload.message).await;
    Json(response)
}

pub async fn handle_chat_info() -> Json<ChatbotInfo> {
    Json(ChatbotInfo {
        name: "Bruti",
        description: "Un chatbot complètement à côté de la plaque mais hilarant, persuadé d'être un philosophe du dimanche !",
    })
}
