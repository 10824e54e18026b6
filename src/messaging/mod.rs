mod handler;
mod message_service;

pub mod model;
pub mod routes;
