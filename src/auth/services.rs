use axum::http::HeaderValue;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    dto::{
        ChangePasswordErrors, ChangePasswordFields, ChangePasswordForm, ChangePasswordOutcome,
        LoginErrors, LoginFields, LoginForm, LoginOutcome,
    },
    password::{hash_password, verify_password},
    validation::{
        validate_current_password, validate_new_password, validate_password,
        validate_repeat_password, validate_username,
    },
};
use crate::{
    action::ActionOutcome,
    error::AppError,
    state::AppState,
    users::repo_types::{NewUser, User},
};

pub const FORM_NOT_SUBMITTED: &str = "Form not submitted correctly.";
const BAD_CREDENTIALS: &str = "Username/Password combination is incorrect";
const DEFAULT_REDIRECT: &str = "/jokes";

pub fn require_user_id(user_id: Option<Uuid>) -> Result<Uuid, AppError> {
    user_id.ok_or_else(|| AppError::Unauthorized("You must be logged in to do that.".into()))
}

/// Looks up the session's user. A stale id resolves to `None`.
pub async fn get_user(state: &AppState, user_id: Option<Uuid>) -> Result<Option<User>, AppError> {
    let Some(id) = user_id else {
        return Ok(None);
    };
    Ok(state.users.find_by_id(id).await?)
}

/// Only same-site absolute paths that fit in a `Location` header are
/// followed after login.
pub fn safe_redirect(to: Option<&str>) -> String {
    match to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control)
                && HeaderValue::try_from(path).is_ok() =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

pub async fn login(state: &AppState, form: LoginForm) -> Result<LoginOutcome, AppError> {
    let (Some(login_type), Some(username), Some(password)) =
        (form.login_type, form.username, form.password)
    else {
        return Ok(LoginOutcome::Rejected(ActionOutcome::form_error(
            FORM_NOT_SUBMITTED,
        )));
    };
    let redirect_to = safe_redirect(form.redirect_to.as_deref());

    let field_errors = LoginErrors {
        username: validate_username(&username).err(),
        password: validate_password(&password).err(),
    };
    let fields = LoginFields {
        login_type: login_type.clone(),
        username: username.clone(),
    };
    if field_errors.has_any() {
        return Ok(LoginOutcome::Rejected(ActionOutcome::ValidationFailed {
            field_errors,
            fields,
        }));
    }

    match login_type.as_str() {
        "login" => {
            let Some(user) = state.users.find_by_username(&username).await? else {
                warn!(%username, "login unknown username");
                return Ok(LoginOutcome::Rejected(ActionOutcome::rejected(
                    BAD_CREDENTIALS,
                    fields,
                )));
            };
            if !verify_password(&password, &user.password_hash)? {
                warn!(%username, user_id = %user.id, "login invalid password");
                return Ok(LoginOutcome::Rejected(ActionOutcome::rejected(
                    BAD_CREDENTIALS,
                    fields,
                )));
            }
            info!(user_id = %user.id, "user logged in");
            Ok(LoginOutcome::SignedIn {
                user_id: user.id,
                redirect_to,
            })
        }
        "register" => {
            if state.users.find_by_username(&username).await?.is_some() {
                warn!(%username, "username already registered");
                return Ok(LoginOutcome::Rejected(ActionOutcome::rejected(
                    format!("User with username {username} already exists"),
                    fields,
                )));
            }
            let hash = hash_password(&password)?;
            let new_user = NewUser {
                username: &username,
                password_hash: &hash,
            };
            match state.users.create(new_user).await {
                Ok(user) => {
                    info!(user_id = %user.id, %username, "user registered");
                    Ok(LoginOutcome::SignedIn {
                        user_id: user.id,
                        redirect_to,
                    })
                }
                Err(e) => {
                    error!(error = %e, %username, "create user failed");
                    Ok(LoginOutcome::Rejected(ActionOutcome::rejected(
                        "Something went wrong trying to create a new user.",
                        fields,
                    )))
                }
            }
        }
        _ => Ok(LoginOutcome::Rejected(ActionOutcome::rejected(
            "Login type invalid",
            fields,
        ))),
    }
}

pub fn change_password_page(user_id: Option<Uuid>, success: bool) -> Result<bool, AppError> {
    require_user_id(user_id)?;
    Ok(success)
}

pub async fn change_password(
    state: &AppState,
    user_id: Option<Uuid>,
    form: ChangePasswordForm,
) -> Result<ChangePasswordOutcome, AppError> {
    let user_id = require_user_id(user_id)?;
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    let (Some(current_password), Some(new_password), Some(repeat_new_password)) = (
        form.current_password,
        form.new_password,
        form.repeat_new_password,
    ) else {
        return Ok(ActionOutcome::form_error(FORM_NOT_SUBMITTED));
    };

    let mut field_errors = ChangePasswordErrors {
        current_password: validate_current_password(&current_password).err(),
        new_password: validate_new_password(&new_password).err(),
        repeat_new_password: validate_repeat_password(&new_password, &repeat_new_password).err(),
    };

    if !verify_password(&current_password, &user.password_hash)? {
        field_errors.current_password = Some("Incorrect password");
    }

    if field_errors.has_any() {
        warn!(%user_id, "change password rejected");
        return Ok(ActionOutcome::ValidationFailed {
            field_errors,
            fields: ChangePasswordFields {
                current_password: String::new(),
                new_password,
                repeat_new_password,
            },
        });
    }

    let hash = hash_password(&new_password)?;
    match state.users.update_password(user_id, &hash).await {
        Ok(Some(_)) => {
            info!(%user_id, "password changed");
            Ok(ActionOutcome::redirect("/profile/change-password?success=true"))
        }
        Ok(None) => {
            warn!(%user_id, "password update matched no user");
            Ok(ActionOutcome::form_error("Could not update password."))
        }
        Err(e) => {
            error!(error = %e, %user_id, "update password failed");
            Ok(ActionOutcome::form_error("Could not update password."))
        }
    }
}
