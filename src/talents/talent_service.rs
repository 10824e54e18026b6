use std::sync::Arc;
use uuid::Uuid;
use crate::core::AppState;
use crate::errors::AppError;
use crate::talents::model::{NewTalent, TalentEntity, TalentPatch};

pub struct TalentService;

impl TalentService {

    pub async fn find_all(state: Arc<AppState>) -> Result<Vec<TalentEntity>, AppError> {
        let talents = state.talent_repository.find_all().await?;
        Ok(talents)
    }

    pub async fn find_by_id(state: Arc<AppState>, talent_id: &Uuid) -> Result<TalentEntity, AppError> {
        let talent = state.talent_repository.find_by_id(talent_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Talent with id {} not found.", talent_id)))?;
        Ok(talent)
    }

    pub async fn create(state: Arc<AppState>, payload: NewTalent) -> Result<TalentEntity, AppError> {
        let talent = state.talent_repository.insert_talent(payload).await?;
        Ok(talent)
    }

    pub async fn update(state: Arc<AppState>, talent_id: &Uuid, patch: TalentPatch) -> Result<TalentEntity, AppError> {
        let talent = state.talent_repository.update_talent(talent_id, &patch).await?
            .ok_or_else(|| AppError::NotFound(format!("Talent with id {} not found.", talent_id)))?;
        Ok(talent)
    }

    pub async fn delete(state: Arc<AppState>, talent_id: &Uuid) -> Result<(), AppError> {
        let deleted = state.talent_repository.delete_talent(talent_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Talent with id {} not found.", talent_id)));
        }
        Ok(())
    }

    pub async fn search(state: Arc<AppState>, term: &str) -> Result<Vec<TalentEntity>, AppError> {
        let talents = state.talent_repository.search(term).await?;
        Ok(talents)
    }

    pub async fn find_by_categorie(state: Arc<AppState>, categorie: &str) -> Result<Vec<TalentEntity>, AppError> {
        let talents = state.talent_repository.find_by_categorie(categorie).await?;
        Ok(talents)
    }

    pub async fn find_by_niveau(state: Arc<AppState>, niveau: &str) -> Result<Vec<TalentEntity>, AppError> {
        let talents = state.talent_repository.find_by_niveau(niveau).await?;
        Ok(talents)
    }

    /// Read-then-write flip, not an atomic toggle. The read doubles as the
    /// NotFound check.
    pub async fn toggle_verified(state: Arc<AppState>, talent_id: &Uuid) -> Result<TalentEntity, AppError> {
        let talent = Self::find_by_id(state.clone(), talent_id).await?;
        let updated = state.talent_repository.set_verified(talent_id, !talent.verified).await?
            .ok_or_else(|| AppError::NotFound(format!("Talent with id {} not found.", talent_id)))?;
        Ok(updated)
    }
}
