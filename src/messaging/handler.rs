use std::sync::Arc;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use crate::auth::extract::AuthUser;
use crate::core::AppState;
use crate::errors::AppError;
use crate::messaging::message_service::MessageService;
use crate::messaging::model::{ConversationSummary, DirectMessageRequest, DirectMessageResponse, MessageEntity, SendMessageRequest, UnreadCountResponse};

pub async fn handle_list_conversations(
    State(state): State<Arc<AppState>>,
    user: AuthUser
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let conversations = MessageService::get_user_conversations(state, &user.user_id).await?;
    Ok(Json(conversations))
}

pub async fn handle_conversation_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(conversation_id): Path<Uuid>
) -> Result<Json<Vec<MessageEntity>>, AppError> {
    let messages = MessageService::get_conversation_messages(state, &user.user_id, &conversation_id).await?;
    Ok(Json(messages))
}

pub async fn handle_send_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<SendMessageRequest>
) -> Result<(StatusCode, Json<MessageEntity>), AppError> {
    let message = MessageService::send_message(state, &user.user_id, &payload.conversation_id, &payload.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn handle_send_direct_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<DirectMessageRequest>
) -> Result<(StatusCode, Json<DirectMessageResponse>), AppError> {
    let response = MessageService::send_direct_message(state, &user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn handle_unread_count(
    State(state): State<Arc<AppState>>,
    user: AuthUser
) -> Result<Json<UnreadCountResponse>, AppError> {
    let count = MessageService::get_unread_count(state, &user.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}
