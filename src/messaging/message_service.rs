use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use crate::auth::model::{UserEntity, DEFAULT_AVATAR_COLOR};
use crate::core::AppState;
use crate::errors::AppError;
use crate::messaging::model::{ConversationEntity, ConversationSummary, Counterpart, DirectMessageRequest, DirectMessageResponse, MessageEntity};

pub struct MessageService;

impl MessageService {

    /// Reuses an existing conversation when one already links the two sides,
    /// otherwise creates one. Talent-only counterparts are keyed by the
    /// talent id and carry a single participant.
    pub async fn get_or_create_conversation(
        state: Arc<AppState>,
        user_id: &Uuid,
        request: &DirectMessageRequest,
    ) -> Result<ConversationEntity, AppError> {
        let counterpart: Counterpart = request.to_user_id.parse()
            .map_err(|_| AppError::ValidationError("toUserId must be a user id or a talent_ identifier.".to_string()))?;

        match counterpart {
            Counterpart::TalentOnly(_) => {
                let talent_id = request.talent_id
                    .ok_or_else(|| AppError::ValidationError("talentId is required when messaging a talent without an account.".to_string()))?;
                state.talent_repository.find_by_id(&talent_id).await?
                    .ok_or_else(|| AppError::NotFound(format!("Talent with id {} not found.", talent_id)))?;
                // Reuse is scoped to the requester: another user messaging the
                // same talent gets their own conversation.
                if let Some(existing) = state.conversation_repository.find_by_talent_for_user(&talent_id, user_id).await? {
                    return Ok(existing);
                }
                let conversation = state.conversation_repository
                    .insert_conversation(Some(talent_id), &[*user_id])
                    .await?;
                Ok(conversation)
            }
            Counterpart::User(recipient_id) => {
                state.user_repository.find_by_id(&recipient_id).await?
                    .ok_or_else(|| AppError::NotFound(format!("User with id {} not found.", recipient_id)))?;

                // Linear scan over the sender's conversations; there is no
                // unique constraint on the participant pair.
                let ids = state.conversation_repository.conversation_ids_for_user(user_id).await?;
                for conversation_id in &ids {
                    if state.conversation_repository.is_participant(conversation_id, &recipient_id).await? {
                        let existing = state.conversation_repository
                            .conversations_by_ids(std::slice::from_ref(conversation_id))
                            .await?;
                        if let Some(conversation) = existing.into_iter().next() {
                            return Ok(conversation);
                        }
                    }
                }
                let conversation = state.conversation_repository
                    .insert_conversation(request.talent_id, &[*user_id, recipient_id])
                    .await?;
                Ok(conversation)
            }
        }
    }

    pub async fn send_message(
        state: Arc<AppState>,
        user_id: &Uuid,
        conversation_id: &Uuid,
        content: &str,
    ) -> Result<MessageEntity, AppError> {
        if !state.conversation_repository.is_participant(conversation_id, user_id).await? {
            return Err(AppError::Forbidden("You are not a participant of this conversation.".to_string()));
        }

        let sender = state.user_repository.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found.", user_id)))?;
        let (sender_name, sender_avatar_color) = Self::sender_snapshot(&sender);

        let message = state.conversation_repository
            .insert_message(conversation_id, user_id, &sender_name, &sender_avatar_color, content)
            .await?;

        // Ordering metadata only; the message itself is already committed.
        if let Err(error) = state.conversation_repository.touch_conversation(conversation_id).await {
            warn!("Failed to bump conversation {}: {}", conversation_id, error);
        }
        Ok(message)
    }

    pub async fn send_direct_message(
        state: Arc<AppState>,
        user_id: &Uuid,
        request: DirectMessageRequest,
    ) -> Result<DirectMessageResponse, AppError> {
        let conversation = Self::get_or_create_conversation(state.clone(), user_id, &request).await?;
        let message = Self::send_message(state, user_id, &conversation.id, &request.content).await?;
        Ok(DirectMessageResponse { conversation: conversation.id, message })
    }

    pub async fn get_user_conversations(
        state: Arc<AppState>,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let ids = state.conversation_repository.conversation_ids_for_user(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conversations = state.conversation_repository.conversations_by_ids(&ids).await?;

        let mut summaries = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let participants = state.conversation_repository
                .participants_with_users(&conversation.id)
                .await?;
            let last_message = state.conversation_repository.last_message(&conversation.id).await?;
            let unread_count = state.conversation_repository
                .unread_count_in_conversation(&conversation.id, user_id)
                .await?;
            let talent_name = match conversation.talent_id {
                Some(talent_id) => state.talent_repository.name_of(&talent_id).await?,
                None => None,
            };
            summaries.push(ConversationSummary {
                id: conversation.id,
                created_at: conversation.created_at,
                updated_at: conversation.updated_at,
                talent_id: conversation.talent_id,
                talent_name,
                participants,
                last_message,
                unread_count,
            });
        }
        Ok(summaries)
    }

    /// Listing a conversation marks its foreign messages as read.
    pub async fn get_conversation_messages(
        state: Arc<AppState>,
        user_id: &Uuid,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, AppError> {
        if !state.conversation_repository.is_participant(conversation_id, user_id).await? {
            return Err(AppError::Forbidden("You are not a participant of this conversation.".to_string()));
        }
        let messages = state.conversation_repository
            .messages_for_conversation(conversation_id)
            .await?;
        if let Err(error) = state.conversation_repository.mark_messages_read(conversation_id, user_id).await {
            warn!("Failed to mark conversation {} as read: {}", conversation_id, error);
        }
        Ok(messages)
    }

    pub async fn get_unread_count(state: Arc<AppState>, user_id: &Uuid) -> Result<i64, AppError> {
        let count = state.conversation_repository.unread_count_total(user_id).await?;
        Ok(count)
    }

    fn sender_snapshot(sender: &UserEntity) -> (String, String) {
        let name = if sender.display_name.trim().is_empty() {
            sender.username.clone()
        } else {
            sender.display_name.clone()
        };
        let color = sender.avatar_color.clone().unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string());
        (name, color)
    }
}
