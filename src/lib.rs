pub mod auth;
pub mod chatbot;
pub mod core;
pub mod database;
pub mod errors;
pub mod messaging;
pub mod router;
pub mod talents;
pub mod welcome;
