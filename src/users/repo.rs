use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, ProfileUpdate, User};

const USER_COLUMNS: &str = "id, username, password_hash, real_name, bio, created_at, updated_at";

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User>;
    /// `None` when no row with `id` exists.
    async fn update_password(&self, id: Uuid, password_hash: &str)
        -> anyhow::Result<Option<User>>;
    async fn update_profile(&self, id: Uuid, profile: ProfileUpdate)
        -> anyhow::Result<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("find user by username")?;
        Ok(user)
    }

    async fn create(&self, user: NewUser<'_>) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username)
        .bind(user.password_hash)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET password_hash = $2, updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("update user password")?;
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        profile: ProfileUpdate,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET real_name = $2, bio = $3, updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(profile.real_name)
        .bind(profile.bio)
        .fetch_optional(&self.db)
        .await
        .context("update user profile")?;
        Ok(user)
    }
}
