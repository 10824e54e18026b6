use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;
use crate::messaging::model::{ConversationEntity, MessageEntity, ParticipantInfo};

#[derive(Debug, Clone)]
pub struct ConversationDatabase {
    pool: Pool<Postgres>,
}

impl ConversationDatabase {

    pub fn with_pool(pool: Pool<Postgres>) -> Self {
        ConversationDatabase { pool }
    }

    /// The participant row is the sole authorization record.
    pub async fn is_participant(&self, conversation_id: &Uuid, user_id: &Uuid) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM conversation_participants
                WHERE conversation_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.unwrap_or(false))
    }

    pub async fn find_by_talent_for_user(&self, talent_id: &Uuid, user_id: &Uuid) -> Result<Option<ConversationEntity>, sqlx::Error> {
        let conversation = sqlx::query_as::<_, ConversationEntity>(
            r#"
            SELECT conversations.*
            FROM conversations
            JOIN conversation_participants AS participants
              ON participants.conversation_id = conversations.id
            WHERE conversations.talent_id = $1 AND participants.user_id = $2
            LIMIT 1
            "#,
        )
        .bind(talent_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    pub async fn conversation_ids_for_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT conversation_id FROM conversation_participants WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn conversations_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ConversationEntity>, sqlx::Error> {
        let conversations = sqlx::query_as::<_, ConversationEntity>(
            "SELECT * FROM conversations WHERE id = ANY($1) ORDER BY updated_at DESC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(conversations)
    }

    /// Inserts the conversation and its participant rows in one transaction,
    /// so a failed participant insert can't strand a half-created
    /// conversation. There is still no uniqueness constraint on the
    /// participant pair; reuse stays a best-effort lookup.
    pub async fn insert_conversation(&self, talent_id: Option<Uuid>, participants: &[Uuid]) -> Result<ConversationEntity, sqlx::Error> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let conversation = sqlx::query_as::<_, ConversationEntity>(
            r#"
            INSERT INTO conversations (id, talent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(talent_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO conversation_participants (id, conversation_id, user_id, joined_at) "
        );
        builder.push_values(participants, |mut db, user_id| {
            db.push_bind(Uuid::new_v4())
                .push_bind(conversation.id)
                .push_bind(user_id)
                .push_bind(now);
        }).build().execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(conversation)
    }

    pub async fn participants_with_users(&self, conversation_id: &Uuid) -> Result<Vec<ParticipantInfo>, sqlx::Error> {
        let participants = sqlx::query_as::<_, ParticipantInfo>(
            r#"
            SELECT participants.user_id,
                   users.username,
                   users.display_name,
                   COALESCE(users.avatar_color, '#3DB4AD') AS avatar_color,
                   participants.joined_at
            FROM conversation_participants AS participants
            JOIN users ON users.id = participants.user_id
            WHERE participants.conversation_id = $1
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(participants)
    }

    pub async fn last_message(&self, conversation_id: &Uuid) -> Result<Option<MessageEntity>, sqlx::Error> {
        let message = sqlx::query_as::<_, MessageEntity>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    /// Unread = not yet read and not authored by the requester.
    pub async fn unread_count_in_conversation(&self, conversation_id: &Uuid, user_id: &Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE conversation_id = $1 AND is_read = FALSE AND sender_id != $2
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Single aggregate across every conversation the user participates in.
    pub async fn unread_count_total(&self, user_id: &Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages
            JOIN conversation_participants AS participants
              ON participants.conversation_id = messages.conversation_id
            WHERE participants.user_id = $1
              AND messages.is_read = FALSE
              AND messages.sender_id != $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn insert_message(
        &self,
        conversation_id: &Uuid,
        sender_id: &Uuid,
        sender_name: &str,
        sender_avatar_color: &str,
        content: &str,
    ) -> Result<MessageEntity, sqlx::Error> {
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, sender_name, sender_avatar_color, content, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(conversation_id)
        .bind(sender_id)
        .bind(sender_name)
        .bind(sender_avatar_color)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    pub async fn touch_conversation(&self, conversation_id: &Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn messages_for_conversation(&self, conversation_id: &Uuid) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Read state is monotonic: messages only ever flip to read.
    pub async fn mark_messages_read(&self, conversation_id: &Uuid, reader_id: &Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE messages SET is_read = TRUE WHERE conversation_id = $1 AND sender_id != $2")
            .bind(conversation_id)
            .bind(reader_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
