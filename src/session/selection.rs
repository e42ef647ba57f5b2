//! The working set that list/view/delete commands operate on.

use std::fmt;
use std::ops::Range;

use crate::base::error::CrumbError;
use crate::cookies::record::CookieRecord;
use crate::hostlist::ListKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Cookies,
    Blacklist,
    Whitelist,
}

impl SelectionKind {
    /// The host list this selection draws from, if any.
    pub fn list(self) -> Option<ListKind> {
        match self {
            SelectionKind::Cookies => None,
            SelectionKind::Blacklist => Some(ListKind::Blacklist),
            SelectionKind::Whitelist => Some(ListKind::Whitelist),
        }
    }

    /// Noun used in counts and deletion summaries.
    pub fn noun(self) -> &'static str {
        match self {
            SelectionKind::Cookies => "cookies",
            SelectionKind::Blacklist => "entries from blacklist",
            SelectionKind::Whitelist => "entries from whitelist",
        }
    }
}

impl From<ListKind> for SelectionKind {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Blacklist => SelectionKind::Blacklist,
            ListKind::Whitelist => SelectionKind::Whitelist,
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionKind::Cookies => "cookies",
            SelectionKind::Blacklist => "blacklist",
            SelectionKind::Whitelist => "whitelist",
        };
        f.write_str(s)
    }
}

/// One selected record: a cookie row or a host list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Cookie(CookieRecord),
    Host(String),
}

impl Row {
    pub fn host(&self) -> &str {
        match self {
            Row::Cookie(cookie) => &cookie.host,
            Row::Host(host) => host,
        }
    }

    pub fn as_cookie(&self) -> Option<&CookieRecord> {
        match self {
            Row::Cookie(cookie) => Some(cookie),
            Row::Host(_) => None,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Cookie(cookie) => cookie.fmt(f),
            Row::Host(host) => write!(f, "host={host}"),
        }
    }
}

/// A kind, its ordered rows, and the page currently on screen.
///
/// `visible` is the window of `rows` that page-relative numbers (`v 3`,
/// `dn 1-4`) resolve against. It moves with the page and is refreshed after
/// rows are removed; it is never re-derived from a fresh query.
#[derive(Debug, Clone)]
pub struct Selection {
    kind: SelectionKind,
    filter: Option<String>,
    rows: Vec<Row>,
    page: usize,
    page_size: usize,
    visible: Range<usize>,
}

impl Selection {
    pub fn new(
        kind: SelectionKind,
        filter: Option<String>,
        rows: Vec<Row>,
        page_size: usize,
    ) -> Self {
        let mut selection = Self {
            kind,
            filter,
            rows,
            page: 0,
            page_size: page_size.max(1),
            visible: 0..0,
        };
        selection.show_page();
        selection
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn title(&self) -> String {
        match (self.kind, &self.filter) {
            (SelectionKind::Cookies, None) => "All Cookies".to_string(),
            (SelectionKind::Cookies, Some(f)) => format!("Cookies for '{f}'"),
            (SelectionKind::Blacklist, None) => "Full Blacklist".to_string(),
            (SelectionKind::Blacklist, Some(f)) => format!("Blacklist Entries for '{f}'"),
            (SelectionKind::Whitelist, None) => "Full Whitelist".to_string(),
            (SelectionKind::Whitelist, Some(f)) => format!("Whitelist Entries for '{f}'"),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one, so an empty selection has a single empty page.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Rows of the page on screen, numbered 1.. by the renderer.
    pub fn visible(&self) -> &[Row] {
        &self.rows[self.visible.clone()]
    }

    /// Absolute index of the first visible row.
    pub fn visible_offset(&self) -> usize {
        self.visible.start
    }

    /// Clamp the page to the rows that remain and recompute the window.
    pub fn show_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
        let start = (self.page * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        self.visible = start..end;
    }

    /// Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.page_count() {
            return false;
        }
        self.page += 1;
        self.show_page();
        true
    }

    /// Returns `false` when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        self.show_page();
        true
    }

    /// Map a 1-based page-relative number to an absolute row index.
    pub fn resolve(&self, number: usize) -> Result<usize, CrumbError> {
        if number == 0 || number > self.visible.len() {
            return Err(CrumbError::invalid_reference(number));
        }
        Ok(self.visible.start + number - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
        self.show_page();
    }

    /// Drop rows by absolute index and refresh the visible window.
    pub(crate) fn remove_rows(&mut self, mut indexes: Vec<usize>) {
        indexes.sort_unstable();
        indexes.dedup();
        for index in indexes.into_iter().rev() {
            if index < self.rows.len() {
                self.rows.remove(index);
            }
        }
        self.show_page();
    }
}
