use crate::auth::token::TokenIssuer;
use crate::chatbot::chatbot_service::ChatRelay;
use crate::core::AppConfig;
use crate::database::{ConversationDatabase, TalentDatabase, UserDatabase};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: AppConfig,
    pub token_issuer: TokenIssuer,
    pub user_repository: UserDatabase,
    pub talent_repository: TalentDatabase,
    pub conversation_repository: ConversationDatabase,
    pub chat_relay: ChatRelay,
}
