use axum::{
    extract::{Path, State},
    routing::get,
    Form, Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{EditProfileData, EditProfileForm, EditProfileOutcome, ProfileData, UserPageData},
    services,
};
use crate::{auth::extractors::MaybeUser, error::AppError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id", get(get_user_page))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/edit", get(get_edit_profile).post(edit_profile))
}

#[instrument(skip(state))]
pub async fn get_user_page(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserPageData>, AppError> {
    Ok(Json(services::user_page(&state, user_id, viewer).await?))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<ProfileData>, AppError> {
    Ok(Json(services::profile(&state, viewer).await?))
}

#[instrument(skip(state))]
pub async fn get_edit_profile(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<EditProfileData>, AppError> {
    Ok(Json(services::edit_profile_page(&state, viewer).await?))
}

#[instrument(skip(state, form))]
pub async fn edit_profile(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Form(form): Form<EditProfileForm>,
) -> Result<EditProfileOutcome, AppError> {
    services::edit_profile(&state, viewer, form).await
}
