use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;
use crate::auth::model::{ProfilePatch, UserEntity};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub bio: Option<String>,
    pub avatar_color: String,
}

#[derive(Debug, Clone)]
pub struct UserDatabase {
    pool: Pool<Postgres>,
}

impl UserDatabase {

    pub fn with_pool(pool: Pool<Postgres>) -> Self {
        UserDatabase { pool }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.unwrap_or(false))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let exists: Option<bool> = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.unwrap_or(false))
    }

    pub async fn insert_user(&self, new_user: NewUser) -> Result<UserEntity, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, username, password_hash, display_name, ville, promo, bio, avatar_color, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.display_name)
        .bind(&new_user.ville)
        .bind(&new_user.promo)
        .bind(&new_user.bio)
        .bind(&new_user.avatar_color)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn touch_last_login(&self, user_id: &Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Sparse update: only the fields present in the patch are written.
    pub async fn update_profile(&self, user_id: &Uuid, patch: &ProfilePatch) -> Result<Option<UserEntity>, sqlx::Error> {
        if patch.is_empty() {
            return self.find_by_id(user_id).await;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(display_name) = &patch.display_name {
            fields.push("display_name = ").push_bind_unseparated(display_name);
        }
        if let Some(bio) = &patch.bio {
            fields.push("bio = ").push_bind_unseparated(bio.clone());
        }
        if let Some(ville) = &patch.ville {
            fields.push("ville = ").push_bind_unseparated(ville.clone());
        }
        if let Some(promo) = &patch.promo {
            fields.push("promo = ").push_bind_unseparated(promo.clone());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            fields.push("avatar_url = ").push_bind_unseparated(avatar_url.clone());
        }
        if let Some(avatar_color) = &patch.avatar_color {
            fields.push("avatar_color = ").push_bind_unseparated(avatar_color.clone());
        }
        builder.push(" WHERE id = ").push_bind(user_id).push(" RETURNING *");

        let user = builder.build_query_as::<UserEntity>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_password_hash(&self, user_id: &Uuid, password_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Unconditional foreign-key update, no unclaimed check.
    pub async fn link_talent(&self, user_id: &Uuid, talent_id: &Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>("UPDATE users SET talent_id = $1 WHERE id = $2 RETURNING *")
            .bind(talent_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
