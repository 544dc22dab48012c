//! Cart session cookie
//!
//! Anonymous carts are keyed by an opaque session token the client keeps
//! in the `cart_session_id` cookie. The cookie is deliberately NOT
//! HttpOnly: the storefront script reads it to rehydrate the local cart
//! view.

use axum::http::HeaderMap;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::response::AppendHeaders;

/// 30 days
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

pub const SESSION_COOKIE_NAME: &str = "cart_session_id";

/// Headers re-asserting the session cookie on cart responses.
pub fn session_cookie(
    session_id: &str,
) -> AppendHeaders<[(axum::http::HeaderName, String); 1]> {
    let value = format!(
        "{SESSION_COOKIE_NAME}={session_id}; Path=/; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}"
    );
    AppendHeaders([(SET_COOKIE, value)])
}

/// Pull the session token out of the request's Cookie header, if any.
pub fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_script_readable_and_scoped() {
        let AppendHeaders([(name, value)]) = session_cookie("sess-1");
        assert_eq!(name, SET_COOKIE);
        assert!(value.starts_with("cart_session_id=sess-1;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=2592000"));
        // readable by client script
        assert!(!value.contains("HttpOnly"));
    }

    #[test]
    fn session_read_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark; cart_session_id=abc123".parse().unwrap());
        assert_eq!(session_from_cookies(&headers).as_deref(), Some("abc123"));

        headers.insert(COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(session_from_cookies(&headers), None);
    }
}
