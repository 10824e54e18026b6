//! End-to-end messaging scenario against a real database. Runs only when
//! DATABASE_URL points at a Postgres instance, otherwise the test is a no-op.

use std::env;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;
use talentcarte::auth::token::TokenIssuer;
use talentcarte::chatbot::chatbot_service::ChatRelay;
use talentcarte::core::{AppConfig, AppState, AuthConfig, ChatbotConfig, DatabaseConfig, ServerConfig};
use talentcarte::database::{ConversationDatabase, TalentDatabase, UserDatabase};
use talentcarte::router::init_router;

async fn setup_from_env() -> Option<(Router, sqlx::PgPool)> {
    let url = env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("DATABASE_URL is set but unreachable");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations failed");

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: "http://localhost:4200".to_string(),
        },
        database: DatabaseConfig {
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_name: "talentcarte_test".to_string(),
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: "flow-test-secret".to_string(),
            token_ttl_days: 1,
        },
        chatbot: ChatbotConfig {
            api_url: "http://localhost:9/chat/completions".to_string(),
            api_key: "unused".to_string(),
            primary_model: "primary".to_string(),
            fallback_model: "fallback".to_string(),
        },
    };
    let state = AppState {
        token_issuer: TokenIssuer::new(&config.auth),
        user_repository: UserDatabase::with_pool(pool.clone()),
        talent_repository: TalentDatabase::with_pool(pool.clone()),
        conversation_repository: ConversationDatabase::with_pool(pool.clone()),
        chat_relay: ChatRelay::new(&config.chatbot),
        env: config,
    };
    Some((init_router(state), pool))
}

async fn send_json(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, tag: &str) -> (String, String) {
    let suffix = Uuid::new_v4().simple().to_string();
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": format!("{tag}-{suffix}@example.test"),
            "username": format!("{tag}_{suffix}"),
            "password": "correct horse battery staple",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    (token, user_id)
}

#[tokio::test]
async fn direct_message_lands_in_the_recipients_inbox() {
    let Some((app, _pool)) = setup_from_env().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let (token_a, _id_a) = register(&app, "alice").await;
    let (token_b, id_b) = register(&app, "bob").await;

    // A opens a direct conversation with B.
    let (status, sent) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&token_a),
        Some(json!({ "toUserId": id_b, "content": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "direct message failed: {sent}");
    let conversation_id = sent["conversation"].as_str().unwrap().to_string();
    assert_eq!(sent["message"]["content"], "hello");
    assert_eq!(sent["message"]["is_read"], false);

    // B sees the conversation with one unread message.
    let (status, conversations) = send_json(&app, "GET", "/api/messages/conversations", Some(&token_b), None).await;
    assert_eq!(status, StatusCode::OK);
    let summary = conversations
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == Value::String(conversation_id.clone()))
        .expect("conversation missing from inbox");
    assert_eq!(summary["unread_count"], 1);
    assert_eq!(summary["last_message"]["content"], "hello");
    assert_eq!(summary["participants"].as_array().unwrap().len(), 2);

    let (status, unread) = send_json(&app, "GET", "/api/messages/unread-count", Some(&token_b), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unread["count"], 1);

    // Listing the messages flips them to read.
    let (status, messages) = send_json(
        &app,
        "GET",
        &format!("/api/messages/conversations/{conversation_id}"),
        Some(&token_b),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages.as_array().unwrap().len(), 1);

    let (status, unread) = send_json(&app, "GET", "/api/messages/unread-count", Some(&token_b), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unread["count"], 0);

    // A second direct message reuses the same conversation.
    let (status, sent_again) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&token_b),
        Some(json!({ "toUserId": sent["message"]["sender_id"], "content": "salut" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sent_again["conversation"].as_str().unwrap(), conversation_id);
}

#[tokio::test]
async fn talent_only_direct_message_keeps_a_single_participant() {
    let Some((app, _pool)) = setup_from_env().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let (token, _) = register(&app, "scout").await;

    let (status, talent) = send_json(
        &app,
        "POST",
        "/api/talents",
        Some(&token),
        Some(json!({
            "nom": "Maëlle",
            "role": "Jongleuse",
            "niveau": "expert",
            "categorie": "artistique",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "talent creation failed: {talent}");
    let talent_id = talent["id"].as_str().unwrap().to_string();

    let (status, sent) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&token),
        Some(json!({
            "toUserId": format!("talent_{talent_id}"),
            "content": "impressionnant!",
            "talentId": talent_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "talent direct message failed: {sent}");
    let conversation_id = sent["conversation"].as_str().unwrap().to_string();

    let (status, conversations) = send_json(&app, "GET", "/api/messages/conversations", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let summary = conversations
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == Value::String(conversation_id.clone()))
        .expect("talent conversation missing from inbox");
    assert_eq!(summary["participants"].as_array().unwrap().len(), 1);
    assert_eq!(summary["talent_name"], "Maëlle");

    // Another message to the same talent reuses the conversation.
    let (status, again) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&token),
        Some(json!({
            "toUserId": format!("talent_{talent_id}"),
            "content": "encore!",
            "talentId": talent_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(again["conversation"].as_str().unwrap(), conversation_id);

    // Reuse is per requester: a different user messaging the same talent
    // gets a conversation of their own, not the first user's.
    let (other_token, _) = register(&app, "rival").await;
    let (status, other_sent) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&other_token),
        Some(json!({
            "toUserId": format!("talent_{talent_id}"),
            "content": "moi aussi!",
            "talentId": talent_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "second user was refused: {other_sent}");
    assert_ne!(other_sent["conversation"].as_str().unwrap(), conversation_id);
}

#[tokio::test]
async fn outsiders_cannot_read_or_post_into_a_conversation() {
    let Some((app, pool)) = setup_from_env().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let (token_a, _) = register(&app, "carol").await;
    let (_, id_b) = register(&app, "dave").await;
    let (token_c, _) = register(&app, "eve").await;

    let (status, sent) = send_json(
        &app,
        "POST",
        "/api/messages/direct",
        Some(&token_a),
        Some(json!({ "toUserId": id_b, "content": "private" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let conversation_id = sent["conversation"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/api/messages/conversations/{conversation_id}"),
        Some(&token_c),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The write path is gated the same way and leaves no row behind.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/messages/send",
        Some(&token_c),
        Some(json!({ "conversationId": conversation_id, "content": "intrusion" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], "INSUFFICIENT_PERMISSIONS");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE conversation_id = $1")
        .bind(Uuid::parse_str(&conversation_id).unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected() {
    let Some((app, pool)) = setup_from_env().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let suffix = Uuid::new_v4().simple().to_string();
    let email = format!("frida-{suffix}@example.test");
    let payload = json!({
        "email": email.clone(),
        "username": format!("frida_{suffix}"),
        "password": "correct horse battery staple",
    });

    let (status, _) = send_json(&app, "POST", "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, "POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "CONFLICTING_RESOURCE");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_inactive_accounts() {
    let Some((app, pool)) = setup_from_env().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    let suffix = Uuid::new_v4().simple().to_string();
    let email = format!("greta-{suffix}@example.test");
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email.clone(),
            "username": format!("greta_{suffix}"),
            "password": "correct horse battery staple",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email.clone(), "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "INVALID_CREDENTIALS");

    sqlx::query("UPDATE users SET is_active = FALSE WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email.clone(), "password": "correct horse battery staple" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
