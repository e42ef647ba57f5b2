//! Deletion scoped to the current selection.
//!
//! Whitelist precedence: a cookie whose normalized host is on the whitelist is
//! never deleted by `da` or `db`, even if the blacklist names it too. List
//! selections are deleted unconditionally.

use std::fmt;
use std::ops::RangeInclusive;

use time::OffsetDateTime;

use crate::base::error::{CrumbError, StoreError};
use crate::cookies::store::CookieStore;
use crate::hostlist::HostLists;
use crate::session::selection::{Row, Selection, SelectionKind};
use crate::session::Session;

/// One line of a deletion report, in processing order.
#[derive(Debug)]
pub enum DeleteEvent {
    Deleted(Row),
    /// Kept because the host is whitelisted.
    Spared(Row),
    /// A number that did not resolve on the current page.
    Rejected(CrumbError),
}

#[derive(Debug)]
pub struct DeleteReport {
    pub kind: SelectionKind,
    pub events: Vec<DeleteEvent>,
    /// Store failure that stopped the operation part-way.
    pub aborted: Option<CrumbError>,
}

impl DeleteReport {
    fn new(kind: SelectionKind) -> Self {
        Self {
            kind,
            events: Vec::new(),
            aborted: None,
        }
    }

    pub fn deleted(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DeleteEvent::Deleted(_)))
            .count()
    }

    pub fn deleted_rows(&self) -> impl Iterator<Item = &Row> {
        self.events.iter().filter_map(|e| match e {
            DeleteEvent::Deleted(row) => Some(row),
            _ => None,
        })
    }

    pub fn spared(&self) -> impl Iterator<Item = &Row> {
        self.events.iter().filter_map(|e| match e {
            DeleteEvent::Spared(row) => Some(row),
            _ => None,
        })
    }

    pub fn rejected(&self) -> impl Iterator<Item = &CrumbError> {
        self.events.iter().filter_map(|e| match e {
            DeleteEvent::Rejected(err) => Some(err),
            _ => None,
        })
    }
}

impl fmt::Display for DeleteReport {
    /// The summary line, e.g. `Deleted 3 cookies`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deleted {} {}", self.deleted(), self.kind.noun())
    }
}

enum Step {
    Delete(usize),
    Spare(usize),
    Reject(CrumbError),
}

impl<S: CookieStore> Session<S> {
    /// Delete rows by their 1-based numbers on the current page.
    ///
    /// Numbers that do not resolve are reported individually; the rest of the
    /// batch still runs. Repeated numbers delete once.
    pub fn delete_by_numbers(&mut self, numbers: &[usize]) -> Result<DeleteReport, CrumbError> {
        let ranges: Vec<_> = numbers.iter().map(|&number| number..=number).collect();
        self.delete_by_ranges(&ranges)
    }

    /// Delete rows by 1-based number ranges on the current page.
    ///
    /// Only numbers on the page are resolved one by one; the part of a range
    /// past the page is reported as a single bad reference.
    pub fn delete_by_ranges(
        &mut self,
        ranges: &[RangeInclusive<usize>],
    ) -> Result<DeleteReport, CrumbError> {
        let selection = self.active()?;
        let shown = selection.visible().len();
        let mut steps = Vec::new();
        let mut planned = Vec::new();
        for range in ranges.iter().filter(|range| !range.is_empty()) {
            let (start, end) = (*range.start(), *range.end());
            for number in start..=end.min(shown) {
                match selection.resolve(number) {
                    Ok(index) if planned.contains(&index) => {}
                    Ok(index) => {
                        planned.push(index);
                        steps.push(Step::Delete(index));
                    }
                    Err(err) => steps.push(Step::Reject(err)),
                }
            }
            if end > shown {
                let first = start.max(shown.saturating_add(1));
                let reference = if first == end {
                    end.to_string()
                } else {
                    format!("{first}-{end}")
                };
                steps.push(Step::Reject(CrumbError::invalid_reference(reference)));
            }
        }
        Ok(self.apply(steps))
    }

    /// Delete every selected row, except whitelisted cookies.
    pub fn delete_all(&mut self) -> Result<DeleteReport, CrumbError> {
        let selection = self.active()?;
        let whitelist = &self.lists.whitelist;
        let steps = selection
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| match row {
                Row::Cookie(cookie) if whitelist.contains(&cookie.host) => Step::Spare(index),
                _ => Step::Delete(index),
            })
            .collect();
        Ok(self.apply(steps))
    }

    /// Delete selected cookies whose expiry is before now.
    pub fn delete_expired(&mut self) -> Result<DeleteReport, CrumbError> {
        self.delete_expired_at(OffsetDateTime::now_utc())
    }

    /// Delete selected cookies whose expiry is strictly before `now`.
    /// Session cookies are never touched.
    pub fn delete_expired_at(&mut self, now: OffsetDateTime) -> Result<DeleteReport, CrumbError> {
        let selection = self.cookie_selection("de")?;
        let steps = selection
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.as_cookie().is_some_and(|c| c.is_expired(now)))
            .map(|(index, _)| Step::Delete(index))
            .collect();
        Ok(self.apply(steps))
    }

    /// Delete selected cookies whose host is blacklisted and not whitelisted.
    pub fn delete_blacklisted(&mut self) -> Result<DeleteReport, CrumbError> {
        let selection = self.cookie_selection("db")?;
        let lists = &self.lists;
        let steps = selection
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let host = row.host();
                if lists.whitelist.contains(host) {
                    Some(Step::Spare(index))
                } else if lists.blacklist.contains(host) {
                    Some(Step::Delete(index))
                } else {
                    None
                }
            })
            .collect();
        Ok(self.apply(steps))
    }

    fn cookie_selection(&self, command: &'static str) -> Result<&Selection, CrumbError> {
        let selection = self.active()?;
        if selection.kind() != SelectionKind::Cookies {
            return Err(CrumbError::WrongSelectionKind {
                command,
                kind: selection.kind(),
            });
        }
        Ok(selection)
    }

    /// Run a deletion plan. Each row is committed on its own; the first store
    /// failure stops the plan and is recorded in the report.
    fn apply(&mut self, steps: Vec<Step>) -> DeleteReport {
        let Some(selection) = self.selection.as_mut() else {
            return DeleteReport::new(SelectionKind::Cookies);
        };
        let kind = selection.kind();
        let mut report = DeleteReport::new(kind);
        let mut removed = Vec::new();

        for step in steps {
            match step {
                Step::Reject(err) => report.events.push(DeleteEvent::Rejected(err)),
                Step::Spare(index) => {
                    if let Some(row) = selection.get(index) {
                        report.events.push(DeleteEvent::Spared(row.clone()));
                    }
                }
                Step::Delete(index) => {
                    let Some(row) = selection.get(index).cloned() else {
                        continue;
                    };
                    match delete_row(&mut self.store, &mut self.lists, kind, &row) {
                        Ok(true) => {
                            removed.push(index);
                            report.events.push(DeleteEvent::Deleted(row));
                        }
                        Ok(false) => {
                            tracing::debug!(row = %row, "row already gone from store");
                            removed.push(index);
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "deletion aborted");
                            report.aborted = Some(err.into());
                            break;
                        }
                    }
                }
            }
        }

        selection.remove_rows(removed);
        tracing::info!(kind = %kind, deleted = report.deleted(), "deletion finished");
        report
    }
}

fn delete_row<S: CookieStore>(
    store: &mut S,
    lists: &mut HostLists,
    kind: SelectionKind,
    row: &Row,
) -> Result<bool, StoreError> {
    match (row, kind.list()) {
        (Row::Cookie(cookie), _) => store.delete(cookie.id),
        (Row::Host(host), Some(list)) => Ok(lists.get_mut(list).remove(host)),
        (Row::Host(_), None) => Ok(false),
    }
}
