use std::fmt;

use time::OffsetDateTime;

/// Stable per-row identifier of a cookie in its store (the SQLite `rowid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookieId(pub i64);

/// A single row of the browser cookie store.
/// Modeled after the columns of Chromium's `cookies` table.
///
/// `(host, name, path)` identifies the cookie to the browser; `id` identifies
/// the row to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub id: CookieId,
    pub host: String,
    pub name: String,
    pub path: String,
    pub value: String,
    pub created: Option<OffsetDateTime>,
    pub expires: Option<OffsetDateTime>,
    pub last_access: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub persistent: bool,
    pub priority: CookiePriority,
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CookiePriority {
    Low,
    Medium,
    High,
}

impl CookieRecord {
    pub fn new(
        id: CookieId,
        host: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        created: Option<OffsetDateTime>,
        expires: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            id,
            host: host.into(),
            name: name.into(),
            path: path.into(),
            value: String::new(),
            created,
            expires,
            last_access: created,
            secure: false,
            http_only: false,
            persistent: expires.is_some(),
            priority: CookiePriority::Medium,
            same_site: SameSite::Unspecified,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Session cookies (no expiry) never expire.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expiry| expiry < now)
    }
}

impl fmt::Display for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host={} name={} path={}", self.host, self.name, self.path)
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SameSite::Unspecified => "unspecified",
            SameSite::NoRestriction => "none",
            SameSite::Lax => "lax",
            SameSite::Strict => "strict",
        };
        f.write_str(s)
    }
}

impl fmt::Display for CookiePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CookiePriority::Low => "low",
            CookiePriority::Medium => "medium",
            CookiePriority::High => "high",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_session_cookie_never_expires() {
        let cookie = CookieRecord::new(CookieId(1), ".x.com", "sid", "/", None, None);
        assert!(!cookie.is_expired(datetime!(2999-01-01 0:00 UTC)));
        assert!(!cookie.persistent);
    }

    #[test]
    fn test_expiry_is_strict() {
        let at = datetime!(2024-06-01 12:00 UTC);
        let cookie = CookieRecord::new(CookieId(1), ".x.com", "a", "/", None, Some(at));
        assert!(!cookie.is_expired(at));
        assert!(cookie.is_expired(datetime!(2024-06-01 12:00:01 UTC)));
    }

    #[test]
    fn test_display() {
        let cookie = CookieRecord::new(CookieId(3), ".x.com", "a", "/docs", None, None);
        assert_eq!(cookie.to_string(), "host=.x.com name=a path=/docs");
    }
}
