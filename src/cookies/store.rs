//! Record store for browser cookies.
//!
//! The session engine only talks to cookies through [`CookieStore`], so the
//! SQLite backend can be swapped for [`MemoryCookieStore`](crate::cookies::memory::MemoryCookieStore)
//! in tests and benches.
//!
//! The engine assumes exclusive write access for the whole session. Nothing
//! here locks the database; callers must make sure the browser (or any other
//! writer) is not using it concurrently.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Row};

use crate::base::error::StoreError;
use crate::cookies::chromedb::{
    chrome_to_unix_timestamp, priority_from_db, samesite_from_db, ORDER_BY_CREATION, PROBE,
    SELECT_COOKIES,
};
use crate::cookies::record::{CookieId, CookieRecord};

/// CRUD surface the session engine needs from a cookie store.
///
/// Each call is atomic and independently failable.
pub trait CookieStore {
    /// All cookies, newest first.
    fn query_all(&self) -> Result<Vec<CookieRecord>, StoreError>;

    /// Cookies whose host contains `substring` (case-sensitive), newest first.
    fn query_by_host(&self, substring: &str) -> Result<Vec<CookieRecord>, StoreError>;

    /// Delete one row. Returns `false` if it was already gone.
    fn delete(&mut self, id: CookieId) -> Result<bool, StoreError>;

    /// Reclaim space left by deletions.
    fn compact(&mut self) -> Result<(), StoreError>;
}

/// A Chromium `Cookies` SQLite database opened read-write.
pub struct SqliteCookieStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteCookieStore {
    /// Open and probe a cookie database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn, path.to_path_buf())
    }

    /// Wrap an existing connection (e.g. an in-memory fixture).
    pub fn from_connection(conn: Connection, path: PathBuf) -> Result<Self, StoreError> {
        // Ensure the file is actually a cookie database.
        {
            let mut stmt = conn.prepare(PROBE)?;
            let mut rows = stmt.query([])?;
            rows.next()?;
        }
        tracing::debug!(path = %path.display(), "opened cookie database");
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn query(
        &self,
        filter: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<CookieRecord>, StoreError> {
        let sql = format!("{SELECT_COOKIES} {filter} {ORDER_BY_CREATION}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, read_row)?;
        let cookies = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(cookies)
    }
}

impl CookieStore for SqliteCookieStore {
    fn query_all(&self) -> Result<Vec<CookieRecord>, StoreError> {
        self.query("", [])
    }

    fn query_by_host(&self, substring: &str) -> Result<Vec<CookieRecord>, StoreError> {
        // LIKE folds ASCII case; instr() does not.
        self.query("WHERE instr(host_key, ?1) > 0", [substring])
    }

    fn delete(&mut self, id: CookieId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM cookies WHERE rowid = ?1", [id.0])?;
        Ok(changed > 0)
    }

    fn compact(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("VACUUM")?;
        Ok(())
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<CookieRecord> {
    Ok(CookieRecord {
        id: CookieId(row.get(0)?),
        host: row.get(1)?,
        name: row.get(2)?,
        value: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        path: row.get(4)?,
        created: chrome_to_unix_timestamp(row.get(5)?),
        expires: chrome_to_unix_timestamp(row.get(6)?),
        last_access: chrome_to_unix_timestamp(row.get(7)?),
        secure: row.get::<_, i32>(8)? != 0,
        http_only: row.get::<_, i32>(9)? != 0,
        persistent: row.get::<_, i32>(10)? != 0,
        priority: priority_from_db(row.get(11)?),
        same_site: samesite_from_db(row.get(12)?),
    })
}
