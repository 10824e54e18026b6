use std::env;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    /// Apply the SQL migrations on startup.
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. No default on purpose: starting without an
    /// explicit secret is a configuration error, not a fallback case.
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatbotConfig {
    pub api_url: String,
    pub api_key: String,
    pub primary_model: String,
    pub fallback_model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub chatbot: ChatbotConfig,
}

impl AppConfig {
    pub fn new_config() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .add_source(File::with_name("default.config.toml"))
            .add_source(File::with_name(&format!("{run_mode}.config.toml")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn base_toml(auth_section: &str) -> String {
        format!(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000
            cors_origin = "http://localhost:4200"

            [database]
            db_host = "localhost"
            db_port = 5432
            db_name = "talentcarte"
            db_user = "postgres"
            db_password = "postgres"
            run_migrations = false

            {auth_section}

            [chatbot]
            api_url = "https://openrouter.ai/api/v1/chat/completions"
            api_key = "test-key"
            primary_model = "primary"
            fallback_model = "fallback"
            "#
        )
    }

    #[test]
    fn refuses_missing_token_secret() {
        let cfg = Config::builder()
            .add_source(File::from_str(
                &base_toml("[auth]\ntoken_ttl_days = 7"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        assert!(cfg.try_deserialize::<AppConfig>().is_err());
    }

    #[test]
    fn deserializes_complete_config() {
        let cfg = Config::builder()
            .add_source(File::from_str(
                &base_toml("[auth]\njwt_secret = \"s3cret\"\ntoken_ttl_days = 7"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let parsed: AppConfig = cfg.try_deserialize().unwrap();
        assert_eq!(parsed.auth.token_ttl_days, 7);
        assert_eq!(parsed.server.port, 3000);
    }
}
