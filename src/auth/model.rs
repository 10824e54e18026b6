use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Avatar colour used when a row carries none. Random colour generation from
/// the frontend is out of scope, the backend only keeps the column filled.
pub const DEFAULT_AVATAR_COLOR: &str = "#3DB4AD";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub avatar_url: Option<String>,
    pub avatar_color: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub xp_total: i32,
    pub niveau: i32,
    pub talent_id: Option<Uuid>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserEntity {
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            avatar_color: self.avatar_color.clone().unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
            bio: self.bio.clone(),
            ville: self.ville.clone(),
            promo: self.promo.clone(),
            role: self.role.clone(),
            is_verified: self.is_verified,
            xp_total: self.xp_total,
            niveau: self.niveau,
            talent_id: self.talent_id,
            created_at: self.created_at,
        }
    }
}

/// Public user representation, password hash and account flags stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub avatar_color: String,
    pub bio: Option<String>,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub xp_total: i32,
    pub niveau: i32,
    pub talent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub display_name: Option<String>,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sparse profile patch: an absent field is untouched, an explicit `null`
/// clears the column. `display_name` is not clearable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ville: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub promo: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avatar_color: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.bio.is_none()
            && self.ville.is_none()
            && self.promo.is_none()
            && self.avatar_url.is_none()
            && self.avatar_color.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTalentRequest {
    pub talent_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: ProfilePatch = serde_json::from_str(r#"{"bio": null, "ville": "Nantes"}"#).unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.ville, Some(Some("Nantes".to_string())));
        assert_eq!(patch.promo, None);
        assert!(patch.display_name.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch: ProfilePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }
}
