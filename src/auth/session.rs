use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::SessionConfig, state::AppState};

/// Payload of the signed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,   // user ID
    pub iat: usize,  // issued at
    pub exp: usize,  // expires at
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Signing keys and cookie settings for user sessions.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
    cookie_name: String,
    secure: bool,
}

impl From<&SessionConfig> for SessionKeys {
    fn from(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::minutes(cfg.ttl_minutes),
            cookie_name: cfg.cookie_name.clone(),
            secure: cfg.secure_cookie,
        }
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::from(&state.config.session)
    }
}

impl SessionKeys {
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + self.ttl;
        let claims = SessionClaims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp().max(0) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// The user bound to the request's session cookie, if any.
    pub fn user_id(&self, jar: &CookieJar) -> Option<Uuid> {
        let cookie = jar.get(&self.cookie_name)?;
        match self.verify(cookie.value()) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                warn!(error = %e, "ignoring invalid session cookie");
                None
            }
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.ttl)
            .build()
    }

    /// Cookie matching the session cookie's name and path, for removal.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .build()
    }
}
