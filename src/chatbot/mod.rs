mod handler;

pub mod chatbot_service;
pub mod model;
pub mod routes;
