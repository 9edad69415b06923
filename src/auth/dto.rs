use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::ActionOutcome;

/// `POST /login` body. Every field is optional so a malformed submission
/// becomes a form error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub redirect_to: Option<String>,
}

/// Fields echoed back on a failed login. The password is never echoed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    pub login_type: String,
    pub username: String,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct LoginErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn has_any(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

pub enum LoginOutcome {
    SignedIn { user_id: Uuid, redirect_to: String },
    Rejected(ActionOutcome<LoginFields, LoginErrors>),
}

/// `POST /profile/change-password` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub repeat_new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordFields {
    /// Always blank on redisplay.
    pub current_password: String,
    pub new_password: String,
    pub repeat_new_password: String,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordErrors {
    pub current_password: Option<&'static str>,
    pub new_password: Option<&'static str>,
    pub repeat_new_password: Option<&'static str>,
}

impl ChangePasswordErrors {
    pub fn has_any(&self) -> bool {
        self.current_password.is_some()
            || self.new_password.is_some()
            || self.repeat_new_password.is_some()
    }
}

pub type ChangePasswordOutcome = ActionOutcome<ChangePasswordFields, ChangePasswordErrors>;

#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    pub success: Option<String>,
}

/// View data for `GET /profile/change-password`.
#[derive(Debug, Serialize)]
pub struct ChangePasswordPage {
    pub success: bool,
}
