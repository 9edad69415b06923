use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Joke, JokeListItem, NewJoke};

const JOKE_COLUMNS: &str = "id, jokester_id, name, content, created_at, updated_at";

#[async_trait]
pub trait JokeRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Joke>>;
    async fn list_by_jokester(&self, jokester_id: Uuid) -> anyhow::Result<Vec<Joke>>;
    /// Newest first.
    async fn list_latest(&self, limit: i64) -> anyhow::Result<Vec<JokeListItem>>;
    async fn count(&self) -> anyhow::Result<i64>;
    async fn find_at_offset(&self, offset: i64) -> anyhow::Result<Option<Joke>>;
    async fn create(&self, joke: NewJoke<'_>) -> anyhow::Result<Joke>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgJokeRepo {
    db: PgPool,
}

impl PgJokeRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JokeRepo for PgJokeRepo {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Joke>> {
        let joke = sqlx::query_as::<_, Joke>(&format!(
            "SELECT {JOKE_COLUMNS} FROM jokes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find joke by id")?;
        Ok(joke)
    }

    async fn list_by_jokester(&self, jokester_id: Uuid) -> anyhow::Result<Vec<Joke>> {
        let rows = sqlx::query_as::<_, Joke>(&format!(
            r#"
            SELECT {JOKE_COLUMNS}
              FROM jokes
             WHERE jokester_id = $1
             ORDER BY created_at DESC
            "#
        ))
        .bind(jokester_id)
        .fetch_all(&self.db)
        .await
        .context("list jokes by jokester")?;
        Ok(rows)
    }

    async fn list_latest(&self, limit: i64) -> anyhow::Result<Vec<JokeListItem>> {
        let rows = sqlx::query_as::<_, JokeListItem>(
            r#"
            SELECT id, name
              FROM jokes
             ORDER BY created_at DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list latest jokes")?;
        Ok(rows)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jokes")
            .fetch_one(&self.db)
            .await
            .context("count jokes")?;
        Ok(count)
    }

    async fn find_at_offset(&self, offset: i64) -> anyhow::Result<Option<Joke>> {
        let joke = sqlx::query_as::<_, Joke>(&format!(
            r#"
            SELECT {JOKE_COLUMNS}
              FROM jokes
             ORDER BY created_at ASC, id ASC
             LIMIT 1 OFFSET $1
            "#
        ))
        .bind(offset)
        .fetch_optional(&self.db)
        .await
        .context("find joke at offset")?;
        Ok(joke)
    }

    async fn create(&self, joke: NewJoke<'_>) -> anyhow::Result<Joke> {
        let joke = sqlx::query_as::<_, Joke>(&format!(
            r#"
            INSERT INTO jokes (jokester_id, name, content)
            VALUES ($1, $2, $3)
            RETURNING {JOKE_COLUMNS}
            "#
        ))
        .bind(joke.jokester_id)
        .bind(joke.name)
        .bind(joke.content)
        .fetch_one(&self.db)
        .await
        .context("insert joke")?;
        Ok(joke)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM jokes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete joke")?;
        Ok(result.rows_affected() > 0)
    }
}
