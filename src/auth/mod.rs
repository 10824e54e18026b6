mod auth_service;
mod handler;

pub mod extract;
pub mod model;
pub mod routes;
pub mod token;
