use std::sync::Arc;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use crate::auth::extract::AuthUser;
use crate::core::AppState;
use crate::errors::AppError;
use crate::talents::model::{NewTalent, SearchQuery, TalentEntity, TalentPatch};
use crate::talents::talent_service::TalentService;

pub async fn handle_list_talents(
    State(state): State<Arc<AppState>>,
    _user: AuthUser
) -> Result<Json<Vec<TalentEntity>>, AppError> {
    let talents = TalentService::find_all(state).await?;
    Ok(Json(talents))
}

pub async fn handle_search_talents(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<SearchQuery>
) -> Result<Json<Vec<TalentEntity>>, AppError> {
    let talents = TalentService::search(state, &params.q).await?;
    Ok(Json(talents))
}

pub async fn handle_talents_by_categorie(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(categorie): Path<String>
) -> Result<Json<Vec<TalentEntity>>, AppError> {
    let talents = TalentService::find_by_categorie(state, &categorie).await?;
    Ok(Json(talents))
}

pub async fn handle_talents_by_niveau(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(niveau): Path<String>
) -> Result<Json<Vec<TalentEntity>>, AppError> {
    let talents = TalentService::find_by_niveau(state, &niveau).await?;
    Ok(Json(talents))
}

pub async fn handle_get_talent(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(talent_id): Path<Uuid>
) -> Result<Json<TalentEntity>, AppError> {
    let talent = TalentService::find_by_id(state, &talent_id).await?;
    Ok(Json(talent))
}

pub async fn handle_create_talent(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<NewTalent>
) -> Result<(StatusCode, Json<TalentEntity>), AppError> {
    let talent = TalentService::create(state, payload).await?;
    Ok((StatusCode::CREATED, Json(talent)))
}

pub async fn handle_update_talent(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(talent_id): Path<Uuid>,
    Json(patch): Json<TalentPatch>
) -> Result<Json<TalentEntity>, AppError> {
    let talent = TalentService::update(state, &talent_id, patch).await?;
    Ok(Json(talent))
}

pub async fn handle_toggle_verified(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(talent_id): Path<Uuid>
) -> Result<Json<TalentEntity>, AppError> {
    let talent = TalentService::toggle_verified(state, &talent_id).await?;
    Ok(Json(talent))
}

pub async fn handle_delete_talent(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(talent_id): Path<Uuid>
) -> Result<StatusCode, AppError> {
    TalentService::delete(state, &talent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
