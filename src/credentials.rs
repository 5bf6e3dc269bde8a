use std::sync::Arc;

use reqwest::{cookie::{CookieStore, Jar}, Url};
use tower_sessions::cookie::Cookie;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Where mutating actions get the token they echo back in [`CSRF_HEADER`].
pub trait CsrfSource: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

/// Reads [`CSRF_COOKIE`] out of the jar the HTTP client stores cookies in,
/// so whatever the server last set is what gets sent.
pub struct CookieCsrf {
    jar: Arc<Jar>,
    origin: Url,
}

impl CookieCsrf {
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        CookieCsrf { jar, origin }
    }
}

impl CsrfSource for CookieCsrf {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        let header = header.to_str().ok()?;

        Cookie::split_parse(header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == CSRF_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .filter(|token| !token.is_empty())
    }
}

/// Fixed token, or none at all.
pub struct StaticCsrf(pub Option<String>);

impl StaticCsrf {
    pub fn token(token: impl Into<String>) -> Self {
        StaticCsrf(Some(token.into()))
    }

    pub fn missing() -> Self {
        StaticCsrf(None)
    }
}

impl CsrfSource for StaticCsrf {
    fn csrf_token(&self) -> Option<String> {
        self.0.clone()
    }
}
