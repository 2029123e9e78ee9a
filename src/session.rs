//! Signed session cookies
//!
//! A session is a cookie holding `"{user_id}.{issued_at}.{signature}"`, where
//! the signature is an HMAC over the first two fields. Nothing about sessions
//! is kept on the server; logging out clears the cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};

use crate::constants::SESSION_COOKIE;
use crate::error::{AppError, Result};
use crate::identity::IdentityStore;
use crate::models::UserId;
use crate::security::{sign_hmac, verify_hmac};
use crate::{AppState, Config};

/// Build a signed token for a user
pub fn issue_token(user_id: UserId, issued_at: i64, secret: &str) -> Result<String> {
    let payload = format!("{}.{}", user_id, issued_at);
    let signature = sign_hmac(&payload, secret)?;
    Ok(format!("{}.{}", payload, signature))
}

/// Check a token's signature and age, returning the user it names
pub fn verify_token(token: &str, secret: &str, max_age_secs: i64, now: i64) -> Option<UserId> {
    let (payload, signature) = token.rsplit_once('.')?;
    if !verify_hmac(payload, signature, secret) {
        tracing::warn!("Session cookie with bad signature");
        return None;
    }

    let (user_id, issued_at) = payload.split_once('.')?;
    let user_id: UserId = user_id.parse().ok()?;
    let issued_at: i64 = issued_at.parse().ok()?;

    if issued_at > now || now - issued_at > max_age_secs {
        tracing::debug!("Session for user {} expired or issued in the future", user_id);
        return None;
    }

    Some(user_id)
}

/// Find the session cookie value among the request's Cookie headers
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// Set-Cookie value that starts a session
pub fn session_set_cookie(token: &str, config: &Config) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, config.session_max_age_secs
    );
    if !config.is_development() {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that ends a session
pub fn session_clear_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// The authenticated user making the request
///
/// Rejects with 401 when the cookie is missing, forged, expired, or names a
/// user that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = session_cookie(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user_id = verify_token(
            token,
            &state.config.secret_key,
            state.config.session_max_age_secs,
            chrono::Utc::now().timestamp(),
        )
        .ok_or(AppError::Unauthorized)?;

        let db = state.db.clone();
        let exists =
            tokio::task::spawn_blocking(move || IdentityStore::new(db).exists(user_id)).await??;
        if !exists {
            tracing::warn!("Session for unknown user {}", user_id);
            return Err(AppError::Unauthorized);
        }

        Ok(CurrentUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key";
    const NOW: i64 = 1_733_788_800;

    #[test]
    fn test_issue_then_verify() {
        let token = issue_token(7, NOW, SECRET).unwrap();

        assert!(token.starts_with("7.1733788800."));
        assert_eq!(verify_token(&token, SECRET, 3600, NOW + 10), Some(7));
    }

    #[test]
    fn test_tampered_user_id_is_rejected() {
        let token = issue_token(7, NOW, SECRET).unwrap();
        let forged = token.replacen('7', "8", 1);

        assert_eq!(verify_token(&forged, SECRET, 3600, NOW), None);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(7, NOW, SECRET).unwrap();

        assert_eq!(verify_token(&token, "other-secret", 3600, NOW), None);
    }

    #[test]
    fn test_expired_and_future_tokens_are_rejected() {
        let token = issue_token(7, NOW, SECRET).unwrap();

        assert_eq!(verify_token(&token, SECRET, 3600, NOW + 3601), None);
        assert_eq!(verify_token(&token, SECRET, 3600, NOW - 1), None);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for token in ["", "garbage", "7.abc", "..", "7.1733788800"] {
            assert_eq!(verify_token(token, SECRET, 3600, NOW), None, "{:?}", token);
        }
    }

    #[test]
    fn test_session_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("a=1; changeable_session=7.1.abc; b=2"),
        );

        assert_eq!(session_cookie(&headers), Some("7.1.abc"));
    }

    #[test]
    fn test_session_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("changeable_sessionx=1"));

        assert_eq!(session_cookie(&headers), None);
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
