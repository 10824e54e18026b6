mod user_repository;
mod talent_repository;
mod conversation_repository;

pub use user_repository::{NewUser, UserDatabase};
pub use talent_repository::TalentDatabase;
pub use conversation_repository::ConversationDatabase;

use sqlx::{Pool, Postgres};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;
use crate::core::DatabaseConfig;

/// Connects the shared pool all repositories hand queries to. A backend that
/// can't reach its record store has nothing to serve, so startup failure is
/// fatal.
pub async fn init_pg_pool(config: &DatabaseConfig) -> Pool<Postgres> {
    let opt = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&config.db_user)
        .password(&config.db_password);
    let pool = match PgPoolOptions::new()
        .max_connections(25)
        .connect_with(opt)
        .await
    {
        Ok(pool) => {
            info!("Established connection to the database.");
            pool
        }
        Err(err) => {
            panic!("Failed to connect to the database: {:?}", err);
        }
    };

    if config.run_migrations {
        if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
            panic!("Failed to apply database migrations: {:?}", err);
        }
        info!("Database migrations are up to date.");
    }
    pool
}
