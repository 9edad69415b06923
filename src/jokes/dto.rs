use serde::{Deserialize, Serialize};

use super::repo_types::Joke;
use crate::{action::ActionOutcome, users::dto::PublicUser};

/// View data for `GET /jokes`.
#[derive(Debug, Serialize)]
pub struct RandomJokeData {
    pub random_joke: Joke,
}

/// View data for `GET /jokes/:joke_id`.
#[derive(Debug, Serialize)]
pub struct JokeData {
    pub joke: Joke,
    pub is_owner: bool,
    pub owner: PublicUser,
}

/// `POST /jokes/:joke_id` body.
#[derive(Debug, Default, Deserialize)]
pub struct JokeActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewJokeFields {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct NewJokeErrors {
    pub name: Option<&'static str>,
    pub content: Option<&'static str>,
}

impl NewJokeErrors {
    pub fn has_any(&self) -> bool {
        self.name.is_some() || self.content.is_some()
    }
}

pub type NewJokeOutcome = ActionOutcome<NewJokeFields, NewJokeErrors>;

/// View data for `GET /jokes/new`.
#[derive(Debug, Serialize)]
pub struct NewJokePage {}
