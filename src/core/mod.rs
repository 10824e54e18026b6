mod config;
mod app_state;

pub use config::{AppConfig, AuthConfig, ChatbotConfig, DatabaseConfig, ServerConfig};
pub use app_state::*;
