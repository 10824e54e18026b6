use std::sync::Arc;
use axum::Router;
use axum::routing::{get, patch};
use crate::core::AppState;
use crate::talents::handler::{handle_create_talent, handle_delete_talent, handle_get_talent, handle_list_talents, handle_search_talents, handle_talents_by_categorie, handle_talents_by_niveau, handle_toggle_verified, handle_update_talent};

pub fn create_talent_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/talents", get(handle_list_talents).post(handle_create_talent))
        .route("/api/talents/search", get(handle_search_talents))
        .route("/api/talents/categorie/{categorie}", get(handle_talents_by_categorie))
        .route("/api/talents/niveau/{niveau}", get(handle_talents_by_niveau))
        .route("/api/talents/{talent_id}", get(handle_get_talent).put(handle_update_talent).delete(handle_delete_talent))
        .route("/api/talents/{talent_id}/verify", patch(handle_toggle_verified))
}
