//! Access guard
//!
//! Validates the session cookie on privileged requests. The raw token is
//! hashed and looked up in the session store; only a live session (not
//! revoked, not expired) resolves to an admin account. Every failure mode
//! collapses to the same generic unauthorized outcome.

use axum::http::{header, HeaderMap};
use chrono::Duration;

use crate::store::SessionStore;

use super::token::hash_token;
use super::{AdminAccount, AdminDirectory};

/// Cookie holding the raw session token, scoped to the admin API path.
pub const SESSION_COOKIE: &str = "admin_session";

/// Path the session cookie is scoped to.
pub const ADMIN_COOKIE_PATH: &str = "/api/admin";

/// Sessions expire 24 hours after login.
pub fn session_ttl() -> Duration {
    Duration::hours(24)
}

/// Extract the raw session token from the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value carrying `token` to the client.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, token, ADMIN_COOKIE_PATH, max_age_secs
    )
}

/// Set-Cookie value that expires the session cookie immediately.
pub fn clear_session_cookie() -> String {
    session_cookie("", 0)
}

/// Resolve the request's session cookie to an admin account.
///
/// `None` covers every failure: missing cookie, unknown token, revoked or
/// expired session, and a session whose owner no longer exists.
pub fn authorize(
    headers: &HeaderMap,
    sessions: &SessionStore,
    admins: &AdminDirectory,
) -> Option<AdminAccount> {
    let token = session_token(headers)?;
    let session = sessions.find_live(&hash_token(&token))?;
    admins.by_id(session.admin_id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_from_single_cookie() {
        let headers = headers_with_cookie("admin_session=tok123");
        assert_eq!(session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; admin_session=tok123; lang=en");
        assert_eq!(session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_missing_cookie_is_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok123", 86400);
        assert!(cookie.starts_with("admin_session=tok123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/api/admin"));
        assert!(cookie.contains("Max-Age=86400"));

        let cleared = clear_session_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }
}
