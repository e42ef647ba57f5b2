//! Chromium cookie database constants and utilities.
//!
//! These match Chromium's cookie storage in `//net/extras/sqlite`.
//!
//! ## Reference Files
//! - `net/extras/sqlite/sqlite_persistent_cookie_store.cc`
//! - `net/cookies/cookie_constants.h`

use time::OffsetDateTime;

use crate::cookies::record::{CookiePriority, SameSite};

/// Chromium uses microseconds since 1601-01-01 00:00:00 UTC (Windows FILETIME epoch).
/// This is the offset from Unix epoch (1970-01-01) in microseconds.
///
/// Reference: `base/time/time.h`
pub const CHROME_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// Columns read for every cookie row, in the order [`SELECT_COOKIES`] returns them.
pub const COOKIE_COLUMNS: &[&str] = &[
    "rowid",
    "host_key",
    "name",
    "value",
    "path",
    "creation_utc",
    "expires_utc",
    "last_access_utc",
    "is_secure",
    "is_httponly",
    "is_persistent",
    "priority",
    "samesite",
];

/// Newest cookies first.
pub const SELECT_COOKIES: &str = "SELECT rowid, host_key, name, value, path, creation_utc, \
     expires_utc, last_access_utc, is_secure, is_httponly, is_persistent, priority, samesite \
     FROM cookies";

pub const ORDER_BY_CREATION: &str = "ORDER BY creation_utc DESC";

/// Schema probe run when a database is opened.
pub const PROBE: &str = "SELECT * FROM cookies LIMIT 1";

/// Convert Chrome epoch (microseconds since 1601) to a UTC datetime.
/// Zero marks an absent timestamp (e.g. a session cookie's expiry).
///
/// Reference: `base/time/time_win.cc`
pub fn chrome_to_unix_timestamp(chrome_time: i64) -> Option<OffsetDateTime> {
    if chrome_time == 0 {
        return None;
    }

    let unix_micros = chrome_time - CHROME_EPOCH_OFFSET_MICROS;
    OffsetDateTime::from_unix_timestamp_nanos(unix_micros as i128 * 1000).ok()
}

/// Convert a UTC datetime to Chrome epoch (microseconds since 1601).
pub fn unix_to_chrome_timestamp(time: OffsetDateTime) -> i64 {
    let unix_micros = (time.unix_timestamp_nanos() / 1000) as i64;
    unix_micros + CHROME_EPOCH_OFFSET_MICROS
}

/// Reference: `net/cookies/cookie_constants.h` (`CookiePriority`)
pub fn priority_from_db(value: i32) -> CookiePriority {
    match value {
        0 => CookiePriority::Low,
        2 => CookiePriority::High,
        _ => CookiePriority::Medium,
    }
}

/// Reference: `net/cookies/cookie_constants.h` (`CookieSameSite`)
pub fn samesite_from_db(value: i32) -> SameSite {
    match value {
        0 => SameSite::NoRestriction,
        1 => SameSite::Lax,
        2 => SameSite::Strict,
        _ => SameSite::Unspecified,
    }
}
