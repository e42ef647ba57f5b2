//! Vector-backed [`CookieStore`] for tests, benches, and disposable sessions.

use time::OffsetDateTime;

use crate::base::error::StoreError;
use crate::cookies::record::{CookieId, CookieRecord};
use crate::cookies::store::CookieStore;

#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Vec<CookieRecord>,
    next_id: i64,
    locked: bool,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie and return the id the store assigned to it.
    pub fn add(
        &mut self,
        host: &str,
        name: &str,
        path: &str,
        created: Option<OffsetDateTime>,
        expires: Option<OffsetDateTime>,
    ) -> CookieId {
        self.next_id += 1;
        let id = CookieId(self.next_id);
        self.cookies
            .push(CookieRecord::new(id, host, name, path, created, expires));
        id
    }

    /// Make every subsequent call fail as if another process held the database.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn contains(&self, id: CookieId) -> bool {
        self.cookies.iter().any(|c| c.id == id)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.locked {
            return Err(StoreError::Locked);
        }
        Ok(())
    }

    fn sorted(&self, keep: impl Fn(&CookieRecord) -> bool) -> Vec<CookieRecord> {
        let mut out: Vec<_> = self.cookies.iter().filter(|c| keep(c)).cloned().collect();
        out.sort_by(|a, b| b.created.cmp(&a.created));
        out
    }
}

impl CookieStore for MemoryCookieStore {
    fn query_all(&self) -> Result<Vec<CookieRecord>, StoreError> {
        self.check()?;
        Ok(self.sorted(|_| true))
    }

    fn query_by_host(&self, substring: &str) -> Result<Vec<CookieRecord>, StoreError> {
        self.check()?;
        Ok(self.sorted(|c| c.host.contains(substring)))
    }

    fn delete(&mut self, id: CookieId) -> Result<bool, StoreError> {
        self.check()?;
        let before = self.cookies.len();
        self.cookies.retain(|c| c.id != id);
        Ok(self.cookies.len() < before)
    }

    fn compact(&mut self) -> Result<(), StoreError> {
        self.check()?;
        self.cookies.shrink_to_fit();
        Ok(())
    }
}
