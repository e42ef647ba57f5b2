#![allow(dead_code)]

use std::path::Path;

use rusqlite::{params, Connection};
use time::OffsetDateTime;

use crumbs::cookies::chromedb::unix_to_chrome_timestamp;

/// The columns of Chromium's `cookies` table that crumbs reads.
pub const SCHEMA: &str = "CREATE TABLE cookies (
    creation_utc INTEGER NOT NULL,
    host_key TEXT NOT NULL,
    top_frame_site_key TEXT NOT NULL DEFAULT '',
    name TEXT NOT NULL,
    value TEXT NOT NULL,
    encrypted_value BLOB NOT NULL DEFAULT x'',
    path TEXT NOT NULL,
    expires_utc INTEGER NOT NULL,
    is_secure INTEGER NOT NULL,
    is_httponly INTEGER NOT NULL,
    last_access_utc INTEGER NOT NULL,
    has_expires INTEGER NOT NULL DEFAULT 1,
    is_persistent INTEGER NOT NULL DEFAULT 1,
    priority INTEGER NOT NULL DEFAULT 1,
    samesite INTEGER NOT NULL DEFAULT -1,
    source_scheme INTEGER NOT NULL DEFAULT 0,
    source_port INTEGER NOT NULL DEFAULT -1,
    UNIQUE (host_key, top_frame_site_key, name, path)
)";

pub struct FixtureCookie<'a> {
    pub host: &'a str,
    pub name: &'a str,
    pub created: OffsetDateTime,
    pub expires: Option<OffsetDateTime>,
}

pub fn create_db(path: &Path, cookies: &[FixtureCookie<'_>]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for c in cookies {
        let created = unix_to_chrome_timestamp(c.created);
        let expires = c.expires.map(unix_to_chrome_timestamp).unwrap_or(0);
        conn.execute(
            "INSERT INTO cookies (creation_utc, host_key, name, value, path, expires_utc,
                is_secure, is_httponly, last_access_utc, has_expires, is_persistent)
             VALUES (?1, ?2, ?3, 'value', '/', ?4, 1, 0, ?1, ?5, ?5)",
            params![created, c.host, c.name, expires, c.expires.is_some() as i32],
        )
        .unwrap();
    }
}

pub fn names(path: &Path) -> Vec<String> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM cookies ORDER BY name")
        .unwrap();
    let rows = stmt.query_map([], |row| row.get(0)).unwrap();
    rows.map(Result::unwrap).collect()
}
