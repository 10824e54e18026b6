mod handler;
mod talent_service;

pub mod model;
pub mod routes;
