use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::User;
use crate::{
    action::ActionOutcome,
    jokes::repo_types::{Joke, JokeListItem},
};

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub real_name: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            real_name: user.real_name,
            bio: user.bio,
        }
    }
}

/// View data for `GET /users/:user_id`.
#[derive(Debug, Serialize)]
pub struct UserPageData {
    pub user: PublicUser,
    pub user_jokes: Vec<Joke>,
    pub is_current_user: bool,
}

/// View data for `GET /profile`.
#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: Option<PublicUser>,
    pub joke_list_items: Vec<JokeListItem>,
}

/// View data for `GET /profile/edit`.
#[derive(Debug, Serialize)]
pub struct EditProfileData {
    pub user: PublicUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileForm {
    pub real_name: Option<String>,
    pub bio: Option<String>,
}

/// The profile form has no per-field rules; only form-level errors occur.
pub type EditProfileOutcome = ActionOutcome<(), ()>;
