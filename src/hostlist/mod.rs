//! Blacklist and whitelist host collections.
//!
//! Hosts are stored normalized with a leading dot (`example.com` becomes
//! `.example.com`) to line up with how browsers store domain cookies.
//! Membership checks are exact string equality on the normalized form.

pub mod persistence;

use std::fmt;
use std::path::PathBuf;

use crate::base::error::CrumbError;

/// Which of the two host lists an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Blacklist,
    Whitelist,
}

impl ListKind {
    pub fn name(self) -> &'static str {
        match self {
            ListKind::Blacklist => "blacklist",
            ListKind::Whitelist => "whitelist",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefix a `.` if absent.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.starts_with('.') {
        host.to_string()
    } else {
        format!(".{host}")
    }
}

/// Outcome of [`HostList::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyPresent(String),
}

/// Ordered, duplicate-free list of normalized hosts with a dirty flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostList {
    entries: Vec<String>,
    dirty: bool,
}

impl HostList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean list, normalizing and de-duplicating in order.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for entry in entries {
            list.insert(entry.as_ref());
        }
        list.dirty = false;
        list
    }

    pub fn insert(&mut self, host: &str) -> AddOutcome {
        let host = normalize_host(host);
        if self.contains(&host) {
            return AddOutcome::AlreadyPresent(host);
        }
        self.entries.push(host.clone());
        self.dirty = true;
        AddOutcome::Added(host)
    }

    /// Remove an exact (already normalized) entry.
    pub fn remove(&mut self, host: &str) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e == host) else {
            return false;
        };
        self.entries.remove(pos);
        self.dirty = true;
        true
    }

    /// Exact membership of the normalized form of `host`.
    pub fn contains(&self, host: &str) -> bool {
        if host.starts_with('.') {
            self.entries.iter().any(|e| e == host)
        } else {
            let host = normalize_host(host);
            self.entries.iter().any(|e| *e == host)
        }
    }

    /// Entries containing `substring`, in list order.
    pub fn matching(&self, substring: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.contains(substring))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// The session's in-memory copies of both lists and where they live on disk.
///
/// Lifecycle: [`HostLists::load`], mutate through [`HostLists::get_mut`],
/// then either [`HostLists::save`] or drop to discard.
#[derive(Debug, Clone, Default)]
pub struct HostLists {
    pub blacklist: HostList,
    pub whitelist: HostList,
    blacklist_path: PathBuf,
    whitelist_path: PathBuf,
}

impl HostLists {
    /// Lists that are never loaded from disk; `save` still writes to the paths.
    pub fn new(blacklist_path: impl Into<PathBuf>, whitelist_path: impl Into<PathBuf>) -> Self {
        Self {
            blacklist: HostList::new(),
            whitelist: HostList::new(),
            blacklist_path: blacklist_path.into(),
            whitelist_path: whitelist_path.into(),
        }
    }

    pub fn load(
        blacklist_path: impl Into<PathBuf>,
        whitelist_path: impl Into<PathBuf>,
    ) -> Result<Self, CrumbError> {
        let mut lists = Self::new(blacklist_path, whitelist_path);
        lists.blacklist = persistence::load_hosts(&lists.blacklist_path)?;
        lists.whitelist = persistence::load_hosts(&lists.whitelist_path)?;
        tracing::debug!(
            blacklist = lists.blacklist.len(),
            whitelist = lists.whitelist.len(),
            "loaded host lists"
        );
        Ok(lists)
    }

    pub fn get(&self, kind: ListKind) -> &HostList {
        match kind {
            ListKind::Blacklist => &self.blacklist,
            ListKind::Whitelist => &self.whitelist,
        }
    }

    pub fn get_mut(&mut self, kind: ListKind) -> &mut HostList {
        match kind {
            ListKind::Blacklist => &mut self.blacklist,
            ListKind::Whitelist => &mut self.whitelist,
        }
    }

    pub fn path(&self, kind: ListKind) -> &PathBuf {
        match kind {
            ListKind::Blacklist => &self.blacklist_path,
            ListKind::Whitelist => &self.whitelist_path,
        }
    }

    /// Write every dirty list back to its file. Returns how many were written.
    pub fn save(&mut self) -> Result<usize, CrumbError> {
        let mut written = 0;
        for kind in [ListKind::Blacklist, ListKind::Whitelist] {
            if !self.get(kind).is_dirty() {
                continue;
            }
            persistence::save_hosts(self.path(kind), self.get(kind))?;
            self.get_mut(kind).mark_clean();
            tracing::info!(list = %kind, path = %self.path(kind).display(), "saved host list");
            written += 1;
        }
        Ok(written)
    }
}
