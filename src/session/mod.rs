//! The session engine.
//!
//! A [`Session`] owns the cookie store handle, the in-memory host lists, and
//! the current [`Selection`]. Every command the shell accepts maps onto one
//! method here:
//!
//! | Group | Methods |
//! |-------|---------|
//! | Select | [`select_all_cookies`](Session::select_all_cookies), [`select_cookies_by_host`](Session::select_cookies_by_host), [`select_list`](Session::select_list) |
//! | Inspect | [`list`](Session::list), [`count`](Session::count), [`next_page`](Session::next_page), [`previous_page`](Session::previous_page), [`view`](Session::view) |
//! | Lists | [`add_host`](Session::add_host) |
//! | Delete | [`delete_by_numbers`](Session::delete_by_numbers), [`delete_all`](Session::delete_all), [`delete_expired`](Session::delete_expired), [`delete_blacklisted`](Session::delete_blacklisted) |
//!
//! Deletions only ever touch rows of the current selection.
//!
//! # Example
//!
//! ```rust
//! use crumbs::cookies::memory::MemoryCookieStore;
//! use crumbs::hostlist::HostLists;
//! use crumbs::session::{ExitMode, Session};
//!
//! let mut store = MemoryCookieStore::new();
//! store.add(".x.com", "sid", "/", None, None);
//!
//! let mut session = Session::new(store, HostLists::default(), 20);
//! session.select_all_cookies()?;
//! assert_eq!(session.count()?.count, 1);
//! session.finish(ExitMode::Discard)?;
//! # Ok::<(), crumbs::base::error::CrumbError>(())
//! ```

mod delete;
pub mod selection;

use std::fmt;

use crate::base::error::CrumbError;
use crate::cookies::store::CookieStore;
use crate::hostlist::{AddOutcome, HostLists, ListKind};

pub use delete::{DeleteEvent, DeleteReport};
use selection::{Row, Selection, SelectionKind};

/// How a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMode {
    /// Persist modified host lists, then end.
    Save,
    /// End without writing anything.
    Discard,
}

/// Result of any `select` operation. An empty selection is still active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectReport {
    pub kind: SelectionKind,
    pub title: String,
    pub count: usize,
}

impl SelectReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountReport {
    pub kind: SelectionKind,
    pub count: usize,
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SelectionKind::Cookies => write!(f, "There are {} cookies.", self.count),
            kind => write!(f, "There are {} {kind} entries.", self.count),
        }
    }
}

/// The page currently on screen.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub kind: SelectionKind,
    pub title: String,
    pub rows: &'a [Row],
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<'a> PageView<'a> {
    fn of(selection: &'a Selection) -> Self {
        Self {
            kind: selection.kind(),
            title: selection.title(),
            rows: selection.visible(),
            page: selection.page(),
            page_count: selection.page_count(),
            total: selection.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub list: ListKind,
    pub outcome: AddOutcome,
}

impl fmt::Display for AddReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AddOutcome::Added(host) => write!(f, "Added '{host}' to {}.", self.list),
            AddOutcome::AlreadyPresent(host) => {
                write!(f, "Host '{host}' is already in {}.", self.list)
            }
        }
    }
}

/// Interactive curation session over a cookie store and the host lists.
///
/// The caller must hold the only writer of the underlying store for the
/// session's lifetime; the session does not lock it.
pub struct Session<S> {
    store: S,
    lists: HostLists,
    selection: Option<Selection>,
    page_size: usize,
}

impl<S: CookieStore> Session<S> {
    pub fn new(store: S, lists: HostLists, page_size: usize) -> Self {
        Self {
            store,
            lists,
            selection: None,
            page_size: page_size.max(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lists(&self) -> &HostLists {
        &self.lists
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn active(&self) -> Result<&Selection, CrumbError> {
        self.selection.as_ref().ok_or(CrumbError::NoSelection)
    }

    fn active_mut(&mut self) -> Result<&mut Selection, CrumbError> {
        self.selection.as_mut().ok_or(CrumbError::NoSelection)
    }

    fn replace_selection(
        &mut self,
        kind: SelectionKind,
        filter: Option<&str>,
        rows: Vec<Row>,
    ) -> SelectReport {
        let selection = Selection::new(kind, filter.map(str::to_string), rows, self.page_size);
        let report = SelectReport {
            kind,
            title: selection.title(),
            count: selection.len(),
        };
        tracing::debug!(kind = %kind, filter = ?filter, count = report.count, "selection replaced");
        self.selection = Some(selection);
        report
    }

    pub fn select_all_cookies(&mut self) -> Result<SelectReport, CrumbError> {
        let rows = self.store.query_all()?.into_iter().map(Row::Cookie).collect();
        Ok(self.replace_selection(SelectionKind::Cookies, None, rows))
    }

    /// Case-sensitive substring match on the cookie host.
    pub fn select_cookies_by_host(&mut self, substring: &str) -> Result<SelectReport, CrumbError> {
        let rows = self
            .store
            .query_by_host(substring)?
            .into_iter()
            .map(Row::Cookie)
            .collect();
        Ok(self.replace_selection(SelectionKind::Cookies, Some(substring), rows))
    }

    /// Select a whole host list, or the entries containing `substring`.
    pub fn select_list(&mut self, list: ListKind, substring: Option<&str>) -> SelectReport {
        let hosts = self.lists.get(list);
        let rows = match substring {
            Some(s) => hosts.matching(s),
            None => hosts.entries().to_vec(),
        };
        let rows = rows.into_iter().map(Row::Host).collect();
        self.replace_selection(list.into(), substring, rows)
    }

    /// The current page. Refreshes the cached page window.
    pub fn list(&mut self) -> Result<PageView<'_>, CrumbError> {
        let selection = self.active_mut()?;
        selection.show_page();
        Ok(PageView::of(selection))
    }

    pub fn count(&self) -> Result<CountReport, CrumbError> {
        let selection = self.active()?;
        Ok(CountReport {
            kind: selection.kind(),
            count: selection.len(),
        })
    }

    /// Returns `false` (and does nothing) on the last page.
    pub fn next_page(&mut self) -> Result<bool, CrumbError> {
        let moved = self.active_mut()?.next_page();
        tracing::debug!(moved, "next page");
        Ok(moved)
    }

    /// Returns `false` (and does nothing) on the first page.
    pub fn previous_page(&mut self) -> Result<bool, CrumbError> {
        let moved = self.active_mut()?.previous_page();
        tracing::debug!(moved, "previous page");
        Ok(moved)
    }

    /// The row shown as `number` (1-based) on the current page.
    pub fn view(&self, number: usize) -> Result<&Row, CrumbError> {
        let selection = self.active()?;
        let index = selection.resolve(number)?;
        selection
            .get(index)
            .ok_or_else(|| CrumbError::invalid_reference(number))
    }

    /// Add a host to the list the current selection shows.
    pub fn add_host(&mut self, host: &str) -> Result<AddReport, CrumbError> {
        let selection = self.selection.as_mut().ok_or(CrumbError::NoSelection)?;
        let Some(list) = selection.kind().list() else {
            return Err(CrumbError::WrongSelectionKind {
                command: "ah",
                kind: selection.kind(),
            });
        };

        let outcome = self.lists.get_mut(list).insert(host);
        if let AddOutcome::Added(host) = &outcome {
            if selection.filter().map_or(true, |f| host.contains(f)) {
                selection.push_row(Row::Host(host.clone()));
            }
            tracing::info!(list = %list, host = %host, "host added");
        }
        Ok(AddReport { list, outcome })
    }

    /// End the session. Lists are written only for [`ExitMode::Save`]; the
    /// store is compacted either way.
    ///
    /// Only a failed list save is an error. Compaction is best effort.
    pub fn finish(mut self, mode: ExitMode) -> Result<(), CrumbError> {
        if mode == ExitMode::Save {
            self.lists.save()?;
        }
        if let Err(err) = self.store.compact() {
            tracing::warn!(error = %err, "failed to compact cookie store");
        }
        tracing::debug!(?mode, "session finished");
        Ok(())
    }
}
