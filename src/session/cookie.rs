//! Cookie helpers shared by the edge gate and the logout handlers.
//!
//! The gateway never reads what is inside the session cookie. It only asks
//! whether one is there, and writes an expired replacement on logout.

use cookie::time::{Duration as CookieDuration, OffsetDateTime};
use cookie::{Cookie, SameSite as CookieSameSite};

use crate::config::{CookieConfig, SameSite};

/// Finds a cookie value in one or more `Cookie` header values.
///
/// Malformed pairs are skipped rather than failing the whole header.
pub fn find_cookie<'a>(headers: impl IntoIterator<Item = &'a str>, name: &str) -> Option<String> {
    headers
        .into_iter()
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

/// Presence check only: any non-empty value counts.
pub fn has_session_cookie<'a>(headers: impl IntoIterator<Item = &'a str>, name: &str) -> bool {
    find_cookie(headers, name).is_some_and(|v| !v.is_empty())
}

/// `Set-Cookie` value that clears the session cookie immediately.
///
/// Path, domain and flags repeat the ones the cookie was set with so the
/// browser replaces it instead of adding a sibling.
pub fn removal_cookie(config: &CookieConfig) -> String {
    let same_site = match config.same_site {
        SameSite::None => CookieSameSite::None,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::Strict => CookieSameSite::Strict,
    };

    let mut cookie = Cookie::build((config.name.clone(), String::new()))
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(same_site)
        .max_age(CookieDuration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build();

    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }

    cookie.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie() {
        let headers = ["theme=dark; session=abc123", "other=1"];
        assert_eq!(find_cookie(headers, "session").as_deref(), Some("abc123"));
        assert_eq!(find_cookie(headers, "other").as_deref(), Some("1"));
        assert_eq!(find_cookie(headers, "missing"), None);
    }

    #[test]
    fn test_presence_ignores_value_validity() {
        assert!(has_session_cookie(["session=not-a-real-token"], "session"));
        assert!(!has_session_cookie(["session="], "session"));
        assert!(!has_session_cookie(["sessionid=abc"], "session"));
        assert!(!has_session_cookie(std::iter::empty::<&str>(), "session"));
    }

    #[test]
    fn test_removal_cookie_attributes() {
        let header = removal_cookie(&CookieConfig::default());

        assert!(header.starts_with("session=;"));
        assert!(header.contains("Max-Age=0"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Secure"));
        assert!(header.contains("SameSite=Lax"));
    }

    #[test]
    fn test_removal_cookie_with_domain() {
        let config = CookieConfig {
            name: "sid".to_owned(),
            path: "/admin".to_owned(),
            domain: Some("example.com".to_owned()),
            secure: false,
            ..Default::default()
        };
        let header = removal_cookie(&config);

        assert!(header.starts_with("sid=;"));
        assert!(header.contains("Path=/admin"));
        assert!(header.contains("Domain=example.com"));
        assert!(!header.contains("Secure"));
    }
}
