use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Joke record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Joke {
    pub id: Uuid,
    pub jokester_id: Uuid, // owning user
    pub name: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Id and name only, for link lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct JokeListItem {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewJoke<'a> {
    pub jokester_id: Uuid,
    pub name: &'a str,
    pub content: &'a str,
}
