use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};

use super::{
    dto::{
        ChangePasswordForm, ChangePasswordOutcome, ChangePasswordPage, LoginForm, LoginOutcome,
        SuccessQuery,
    },
    extractors::MaybeUser,
    services,
    session::SessionKeys,
};
use crate::{error::AppError, state::AppState};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn password_routes() -> Router<AppState> {
    Router::new().route(
        "/profile/change-password",
        get(change_password_page)
            .post(change_password)
            .patch(change_password),
    )
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match services::login(&state, form).await? {
        LoginOutcome::SignedIn {
            user_id,
            redirect_to,
        } => {
            let keys = SessionKeys::from_ref(&state);
            let token = keys.sign(user_id)?;
            let jar = jar.add(keys.session_cookie(token));
            Ok((jar, Redirect::to(&redirect_to)).into_response())
        }
        LoginOutcome::Rejected(outcome) => Ok(outcome.into_response()),
    }
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(user_id) = user_id {
        info!(%user_id, "user logged out");
    }
    let keys = SessionKeys::from_ref(&state);
    (jar.remove(keys.removal_cookie()), Redirect::to("/"))
}

#[instrument(skip_all)]
pub async fn change_password_page(
    MaybeUser(user_id): MaybeUser,
    Query(query): Query<SuccessQuery>,
) -> Result<Json<ChangePasswordPage>, AppError> {
    let success = query.success.is_some_and(|v| !v.is_empty());
    let success = services::change_password_page(user_id, success)?;
    Ok(Json(ChangePasswordPage { success }))
}

#[instrument(skip(state, form))]
pub async fn change_password(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<ChangePasswordOutcome, AppError> {
    services::change_password(&state, user_id, form).await
}
