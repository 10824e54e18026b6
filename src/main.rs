use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use talentcarte::auth::token::TokenIssuer;
use talentcarte::chatbot::chatbot_service::ChatRelay;
use talentcarte::core::{AppConfig, AppState};
use talentcarte::database::{init_pg_pool, ConversationDatabase, TalentDatabase, UserDatabase};
use talentcarte::router::init_router;
use talentcarte::welcome::welcome;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    dotenv().ok();
    let config = AppConfig::new_config().unwrap_or_else(|err| panic!("Missing needed env: {}", err));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    welcome();

    let pool = init_pg_pool(&config.database).await;
    let app_state = AppState {
        token_issuer: TokenIssuer::new(&config.auth),
        user_repository: UserDatabase::with_pool(pool.clone()),
        talent_repository: TalentDatabase::with_pool(pool.clone()),
        conversation_repository: ConversationDatabase::with_pool(pool),
        chat_relay: ChatRelay::new(&config.chatbot),
        env: config,
    };

    let url = format!("{}:{}", app_state.env.server.host, app_state.env.server.port);
    let app = init_router(app_state);
    let listener = TcpListener::bind(url.clone()).await.unwrap();
    info!("Server is listening on: {url}");
    axum::serve(listener, app).await.unwrap();
    info!("Stopping TalentCarte...");
}
