use anyhow::anyhow;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{JokeActionForm, JokeData, NewJokeErrors, NewJokeFields, NewJokeForm, NewJokeOutcome},
    repo_types::{Joke, NewJoke},
    validation::{validate_joke_content, validate_joke_name},
};
use crate::{
    action::ActionOutcome,
    auth::services::{require_user_id, FORM_NOT_SUBMITTED},
    error::AppError,
    state::AppState,
};

pub const JOKES_INDEX: &str = "/jokes";

/// Picks a joke uniformly at random.
pub async fn random_joke(state: &AppState) -> Result<Joke, AppError> {
    let count = state.jokes.count().await?;
    if count <= 0 {
        return Err(AppError::NotFound("No random joke found".into()));
    }
    let offset = rand::thread_rng().gen_range(0..count);
    state
        .jokes
        .find_at_offset(offset)
        .await?
        .ok_or_else(|| AppError::NotFound("No random joke found".into()))
}

pub async fn load_joke(
    state: &AppState,
    joke_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<JokeData, AppError> {
    let joke = state
        .jokes
        .find_by_id(joke_id)
        .await?
        .ok_or_else(|| AppError::NotFound("What a joke! Not found.".into()))?;

    let owner = state
        .users
        .find_by_id(joke.jokester_id)
        .await?
        .ok_or_else(|| anyhow!("jokester {} of joke {} is missing", joke.jokester_id, joke.id))?;

    Ok(JokeData {
        is_owner: viewer == Some(joke.jokester_id),
        owner: owner.into(),
        joke,
    })
}

/// Dispatches a form posted to a joke's page on its `_method` marker.
pub async fn joke_action(
    state: &AppState,
    joke_id: Uuid,
    viewer: Option<Uuid>,
    form: JokeActionForm,
) -> Result<String, AppError> {
    match form.method.as_deref() {
        Some("delete") => delete_joke(state, joke_id, viewer).await,
        _ => Err(AppError::BadRequest("Unsupported joke action".into())),
    }
}

/// Deletes a joke owned by `viewer`; returns where to redirect.
pub async fn delete_joke(
    state: &AppState,
    joke_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<String, AppError> {
    let user_id = require_user_id(viewer)?;
    let joke = state
        .jokes
        .find_by_id(joke_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Can't delete what does not exist".into()))?;

    if joke.jokester_id != user_id {
        warn!(%user_id, %joke_id, owner = %joke.jokester_id, "delete of foreign joke refused");
        return Err(AppError::Forbidden(
            "Pssh, nice try. That's not your joke".into(),
        ));
    }

    if !state.jokes.delete(joke_id).await? {
        return Err(AppError::NotFound("Can't delete what does not exist".into()));
    }
    info!(%user_id, %joke_id, "joke deleted");
    Ok(JOKES_INDEX.to_string())
}

pub fn new_joke_page(viewer: Option<Uuid>) -> Result<(), AppError> {
    require_user_id(viewer).map(|_| ())
}

pub async fn create_joke(
    state: &AppState,
    viewer: Option<Uuid>,
    form: NewJokeForm,
) -> Result<NewJokeOutcome, AppError> {
    let user_id = require_user_id(viewer)?;
    let (Some(name), Some(content)) = (form.name, form.content) else {
        return Ok(ActionOutcome::form_error(FORM_NOT_SUBMITTED));
    };

    let field_errors = NewJokeErrors {
        name: validate_joke_name(&name).err(),
        content: validate_joke_content(&content).err(),
    };
    if field_errors.has_any() {
        return Ok(ActionOutcome::ValidationFailed {
            field_errors,
            fields: NewJokeFields { name, content },
        });
    }

    let joke = state
        .jokes
        .create(NewJoke {
            jokester_id: user_id,
            name: &name,
            content: &content,
        })
        .await?;
    info!(%user_id, joke_id = %joke.id, "joke created");
    Ok(ActionOutcome::redirect(format!("{JOKES_INDEX}/{}", joke.id)))
}
