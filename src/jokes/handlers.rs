use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Form, Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{JokeActionForm, JokeData, NewJokeForm, NewJokeOutcome, NewJokePage, RandomJokeData},
    services,
};
use crate::{auth::extractors::MaybeUser, error::AppError, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/jokes", get(random_joke))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/jokes/new", get(new_joke_page).post(create_joke))
        .route("/jokes/:joke_id", get(get_joke).post(joke_action))
}

#[instrument(skip(state))]
pub async fn random_joke(State(state): State<AppState>) -> Result<Json<RandomJokeData>, AppError> {
    let random_joke = services::random_joke(&state).await?;
    Ok(Json(RandomJokeData { random_joke }))
}

#[instrument(skip(state))]
pub async fn get_joke(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Path(joke_id): Path<Uuid>,
) -> Result<Json<JokeData>, AppError> {
    Ok(Json(services::load_joke(&state, joke_id, user_id).await?))
}

#[instrument(skip(state, form))]
pub async fn joke_action(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Path(joke_id): Path<Uuid>,
    Form(form): Form<JokeActionForm>,
) -> Result<Redirect, AppError> {
    let to = services::joke_action(&state, joke_id, user_id, form).await?;
    Ok(Redirect::to(&to))
}

#[instrument]
pub async fn new_joke_page(MaybeUser(user_id): MaybeUser) -> Result<Json<NewJokePage>, AppError> {
    services::new_joke_page(user_id)?;
    Ok(Json(NewJokePage {}))
}

#[instrument(skip(state, form))]
pub async fn create_joke(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Form(form): Form<NewJokeForm>,
) -> Result<NewJokeOutcome, AppError> {
    services::create_joke(&state, user_id, form).await
}
