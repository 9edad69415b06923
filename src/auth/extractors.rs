use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::session::SessionKeys;

/// The identity bound to the request's session, or `None`.
///
/// Never rejects: a missing or invalid session is simply absent. Handlers
/// pass the value on to services, which decide whether it is required.
pub struct MaybeUser(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(MaybeUser(keys.user_id(&jar)))
    }
}
