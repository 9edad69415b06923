use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    dto::{EditProfileData, EditProfileForm, EditProfileOutcome, ProfileData, UserPageData},
    repo_types::ProfileUpdate,
};
use crate::{
    action::ActionOutcome,
    auth::services::{get_user, require_user_id},
    error::AppError,
    state::AppState,
};

const LATEST_JOKES: i64 = 5;

pub async fn user_page(
    state: &AppState,
    user_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<UserPageData, AppError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Uuh! Not found.".into()))?;
    let current = get_user(state, viewer).await?;
    let user_jokes = state.jokes.list_by_jokester(user.id).await?;

    Ok(UserPageData {
        is_current_user: current.is_some_and(|c| c.id == user.id),
        user: user.into(),
        user_jokes,
    })
}

pub async fn profile(state: &AppState, viewer: Option<Uuid>) -> Result<ProfileData, AppError> {
    let joke_list_items = state.jokes.list_latest(LATEST_JOKES).await?;
    let user = get_user(state, viewer).await?;
    Ok(ProfileData {
        user: user.map(Into::into),
        joke_list_items,
    })
}

pub async fn edit_profile_page(
    state: &AppState,
    viewer: Option<Uuid>,
) -> Result<EditProfileData, AppError> {
    require_user_id(viewer)?;
    let user = get_user(state, viewer)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
    Ok(EditProfileData { user: user.into() })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn edit_profile(
    state: &AppState,
    viewer: Option<Uuid>,
    form: EditProfileForm,
) -> Result<EditProfileOutcome, AppError> {
    let user_id = require_user_id(viewer)?;
    let update = ProfileUpdate {
        real_name: non_blank(form.real_name),
        bio: non_blank(form.bio),
    };
    match state.users.update_profile(user_id, update).await {
        Ok(Some(user)) => {
            info!(%user_id, "profile updated");
            Ok(ActionOutcome::redirect(format!("/users/{}", user.id)))
        }
        Ok(None) => {
            warn!(%user_id, "profile update matched no user");
            Ok(ActionOutcome::form_error("Could not update profile."))
        }
        Err(e) => {
            error!(error = %e, %user_id, "update profile failed");
            Ok(ActionOutcome::form_error("Could not update profile."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "What do you call a fake noodle? An impasta.";

    #[tokio::test]
    async fn user_page_lists_jokes_and_flags_current_user() {
        let (state, store) = AppState::fake();
        let kody = store.insert_user("kody", "twixrox");
        let other = store.insert_user("other", "secret1");
        store.insert_joke(kody.id, "Noodle", CONTENT);
        store.insert_joke(other.id, "Not kody's", CONTENT);

        let data = user_page(&state, kody.id, Some(kody.id)).await.unwrap();
        assert!(data.is_current_user);
        assert_eq!(data.user.username, "kody");
        assert_eq!(data.user_jokes.len(), 1);
        assert_eq!(data.user_jokes[0].name, "Noodle");

        let data = user_page(&state, kody.id, Some(other.id)).await.unwrap();
        assert!(!data.is_current_user);
        let data = user_page(&state, kody.id, None).await.unwrap();
        assert!(!data.is_current_user);
    }

    #[tokio::test]
    async fn user_page_for_unknown_user_is_not_found() {
        let (state, _store) = AppState::fake();
        let err = user_page(&state, Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn profile_lists_five_newest_jokes() {
        let (state, store) = AppState::fake();
        let kody = store.insert_user("kody", "twixrox");
        for i in 0..7 {
            store.insert_joke(kody.id, &format!("joke {i}"), CONTENT);
        }
        let data = profile(&state, None).await.unwrap();
        assert!(data.user.is_none());
        let names: Vec<_> = data.joke_list_items.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["joke 6", "joke 5", "joke 4", "joke 3", "joke 2"]);

        let data = profile(&state, Some(kody.id)).await.unwrap();
        assert_eq!(data.user.unwrap().username, "kody");
    }

    #[tokio::test]
    async fn edit_profile_updates_and_clears_fields() {
        let (state, store) = AppState::fake();
        let kody = store.insert_user("kody", "twixrox");

        let form = EditProfileForm {
            real_name: Some("Kody Koala".into()),
            bio: Some("  I like puns  ".into()),
        };
        let outcome = edit_profile(&state, Some(kody.id), form).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Redirect(to) if to == format!("/users/{}", kody.id)));
        let stored = store.user(kody.id).unwrap();
        assert_eq!(stored.real_name.as_deref(), Some("Kody Koala"));
        assert_eq!(stored.bio.as_deref(), Some("I like puns"));

        let form = EditProfileForm {
            real_name: Some("   ".into()),
            bio: None,
        };
        edit_profile(&state, Some(kody.id), form).await.unwrap();
        let stored = store.user(kody.id).unwrap();
        assert!(stored.real_name.is_none());
        assert!(stored.bio.is_none());
    }

    #[tokio::test]
    async fn edit_profile_store_failure_is_form_error() {
        let (state, store) = AppState::fake();
        let kody = store.insert_user("kody", "twixrox");
        store.fail_writes();
        let form = EditProfileForm {
            real_name: Some("Kody Koala".into()),
            bio: None,
        };
        let outcome = edit_profile(&state, Some(kody.id), form).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::FormError(m) if m == "Could not update profile."));
        assert!(store.user(kody.id).unwrap().real_name.is_none());
    }

    #[tokio::test]
    async fn edit_profile_for_stale_session_is_form_error() {
        let (state, _store) = AppState::fake();
        let outcome = edit_profile(&state, Some(Uuid::new_v4()), EditProfileForm::default())
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::FormError(m) if m == "Could not update profile."));
    }

    #[tokio::test]
    async fn edit_profile_requires_session() {
        let (state, _store) = AppState::fake();
        let err = edit_profile(&state, None, EditProfileForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let err = edit_profile_page(&state, None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
