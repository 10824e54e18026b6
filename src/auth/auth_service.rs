use std::sync::Arc;
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::warn;
use uuid::Uuid;
use crate::auth::model::{AuthResponse, ChangePasswordRequest, LoginRequest, ProfilePatch, RegisterRequest, UserResponse, DEFAULT_AVATAR_COLOR};
use crate::core::AppState;
use crate::database::NewUser;
use crate::errors::AppError;

pub struct AuthService;

impl AuthService {

    /// Two sequential existence checks, then the insert. The window between
    /// check and insert is not closed here; a losing concurrent registration
    /// surfaces the store's uniqueness violation as an opaque error.
    pub async fn register(state: Arc<AppState>, payload: RegisterRequest) -> Result<AuthResponse, AppError> {
        if state.user_repository.email_exists(&payload.email).await? {
            return Err(AppError::Conflict("This email is already in use.".to_string()));
        }
        if state.user_repository.username_exists(&payload.username).await? {
            return Err(AppError::Conflict("This username is already taken.".to_string()));
        }

        let password_hash = hash(&payload.password, DEFAULT_COST)
            .map_err(|err| AppError::ProcessingError(format!("Unable to hash password: {}", err)))?;

        let display_name = payload.display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| payload.username.clone());

        let user = state.user_repository.insert_user(NewUser {
            email: payload.email,
            username: payload.username,
            password_hash,
            display_name,
            ville: payload.ville,
            promo: payload.promo,
            bio: payload.bio,
            avatar_color: DEFAULT_AVATAR_COLOR.to_string(),
        }).await?;

        let token = state.token_issuer.issue(user.id, &user.email, &user.username, &user.role)?;
        Ok(AuthResponse {
            user: user.to_response(),
            token,
            expires_in: state.token_issuer.ttl_seconds(),
        })
    }

    pub async fn login(state: Arc<AppState>, payload: LoginRequest) -> Result<AuthResponse, AppError> {
        let user = state.user_repository.find_by_email(&payload.email).await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".to_string()))?;

        let password_matches = verify(&payload.password, &user.password_hash)
            .map_err(|err| AppError::ProcessingError(format!("Unable to verify password: {}", err)))?;
        if !password_matches {
            return Err(AppError::Unauthorized("Invalid email or password.".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Unauthorized("This account has been deactivated.".to_string()));
        }

        // Best effort, a failed timestamp bump must not fail the login.
        if let Err(err) = state.user_repository.touch_last_login(&user.id).await {
            warn!("Unable to update last_login for {}: {}", user.id, err);
        }

        let token = state.token_issuer.issue(user.id, &user.email, &user.username, &user.role)?;
        Ok(AuthResponse {
            user: user.to_response(),
            token,
            expires_in: state.token_issuer.ttl_seconds(),
        })
    }

    pub async fn get_profile(state: Arc<AppState>, user_id: &Uuid) -> Result<UserResponse, AppError> {
        let user = state.user_repository.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
        Ok(user.to_response())
    }

    pub async fn update_profile(state: Arc<AppState>, user_id: &Uuid, patch: ProfilePatch) -> Result<UserResponse, AppError> {
        let user = state.user_repository.update_profile(user_id, &patch).await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
        Ok(user.to_response())
    }

    pub async fn change_password(state: Arc<AppState>, user_id: &Uuid, payload: ChangePasswordRequest) -> Result<(), AppError> {
        let user = state.user_repository.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        let current_matches = verify(&payload.current_password, &user.password_hash)
            .map_err(|err| AppError::ProcessingError(format!("Unable to verify password: {}", err)))?;
        if !current_matches {
            return Err(AppError::Unauthorized("Current password is incorrect.".to_string()));
        }

        let new_hash = hash(&payload.new_password, DEFAULT_COST)
            .map_err(|err| AppError::ProcessingError(format!("Unable to hash password: {}", err)))?;
        state.user_repository.update_password_hash(user_id, &new_hash).await?;
        Ok(())
    }

    pub async fn link_talent(state: Arc<AppState>, user_id: &Uuid, talent_id: &Uuid) -> Result<UserResponse, AppError> {
        let user = state.user_repository.link_talent(user_id, talent_id).await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
        Ok(user.to_response())
    }
}

#[cfg(test)]
mod tests {
    use bcrypt::{hash, verify};

    #[test]
    fn password_hash_round_trip() {
        // Low cost keeps the test fast; the service uses DEFAULT_COST.
        let hashed = hash("pw123456", 4).unwrap();
        assert!(verify("pw123456", &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }
}
