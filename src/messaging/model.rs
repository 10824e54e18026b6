use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationEntity {
    pub id: Uuid,
    pub talent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message row as stored and served. Sender name and avatar colour are a
/// snapshot taken at send time, never re-joined against the user table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_avatar_color: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ParticipantInfo {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_color: String,
    pub joined_at: DateTime<Utc>,
}

/// Enriched conversation list item, sorted by `updated_at` descending.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub talent_id: Option<Uuid>,
    pub talent_name: Option<String>,
    pub participants: Vec<ParticipantInfo>,
    pub last_message: Option<MessageEntity>,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessageRequest {
    /// Either a user id or a `talent_`-prefixed synthetic identifier for a
    /// talent that has no owning account.
    pub to_user_id: String,
    pub content: String,
    pub talent_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DirectMessageResponse {
    pub conversation: Uuid,
    pub message: MessageEntity,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// The other side of a direct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterpart {
    /// A registered account.
    User(Uuid),
    /// A talent card without an owning account; resolution is keyed by the
    /// accompanying talent id and the conversation keeps a single participant.
    TalentOnly(String),
}

impl FromStr for Counterpart {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.starts_with("talent_") {
            Ok(Counterpart::TalentOnly(raw.to_string()))
        } else {
            Ok(Counterpart::User(Uuid::parse_str(raw)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_synthetic_talent_counterpart() {
        let parsed: Counterpart = "talent_42".parse().unwrap();
        assert_eq!(parsed, Counterpart::TalentOnly("talent_42".to_string()));
    }

    #[test]
    fn parses_real_user_counterpart() {
        let id = Uuid::new_v4();
        let parsed: Counterpart = id.to_string().parse().unwrap();
        assert_eq!(parsed, Counterpart::User(id));
    }

    #[test]
    fn rejects_garbage_counterpart() {
        assert!("not-an-id".parse::<Counterpart>().is_err());
    }
}
