//! Plain-text rendering of pages, detail views, and deletion reports.

use std::fmt::Write as _;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::session::selection::{Row, SelectionKind};
use crate::session::{DeleteEvent, DeleteReport, PageView};

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]Z");

/// `none` for absent timestamps.
pub fn timestamp(time: Option<OffsetDateTime>) -> String {
    time.and_then(|t| t.format(TIMESTAMP).ok())
        .unwrap_or_else(|| "none".to_string())
}

/// Column-aligned text table with an optional centered title.
struct Table {
    title: String,
    headers: Vec<&'static str>,
    right: Vec<bool>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: String, columns: &[(&'static str, bool)]) -> Self {
        Self {
            title,
            headers: columns.iter().map(|(h, _)| *h).collect(),
            right: columns.iter().map(|(_, r)| *r).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        let rule = "-".repeat(total);
        let mut out = String::new();
        let _ = writeln!(out, "{:^total$}", self.title);
        let _ = writeln!(out, "{}", self.line(self.headers.iter().map(|h| h.to_string()), &widths));
        let _ = writeln!(out, "{rule}");
        for row in &self.rows {
            let _ = writeln!(out, "{}", self.line(row.iter().cloned(), &widths));
        }
        out
    }

    fn line(&self, cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
        let cells: Vec<String> = cells
            .zip(widths)
            .zip(&self.right)
            .map(|((cell, &width), &right)| {
                if right {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }
}

/// The current page as a titled table; rows are numbered from 1 on every page.
pub fn page(view: &PageView<'_>) -> String {
    let title = if view.page_count > 1 {
        format!("{} (page {}/{})", view.title, view.page + 1, view.page_count)
    } else {
        view.title.clone()
    };

    let mut table = match view.kind {
        SelectionKind::Cookies => Table::new(
            title,
            &[
                ("#", true),
                ("Host", false),
                ("Name", false),
                ("Path", false),
                ("Created", true),
                ("Expires", true),
            ],
        ),
        _ => Table::new(title, &[("#", true), ("Host", false)]),
    };

    for (number, row) in view.rows.iter().enumerate() {
        let number = (number + 1).to_string();
        match row {
            Row::Cookie(c) => table.push(vec![
                number,
                c.host.clone(),
                c.name.clone(),
                c.path.clone(),
                timestamp(c.created),
                timestamp(c.expires),
            ]),
            Row::Host(host) => table.push(vec![number, host.clone()]),
        }
    }
    table.render()
}

/// Every field of a row.
pub fn details(row: &Row) -> String {
    let fields: Vec<(&str, String)> = match row {
        Row::Cookie(c) => vec![
            ("Host:", c.host.clone()),
            ("Name:", c.name.clone()),
            ("Path:", c.path.clone()),
            ("Created:", timestamp(c.created)),
            ("Last Used:", timestamp(c.last_access)),
            ("Expires:", timestamp(c.expires)),
            ("Secure:", c.secure.to_string()),
            ("HTTP Only:", c.http_only.to_string()),
            ("Persistent:", c.persistent.to_string()),
            ("Priority:", c.priority.to_string()),
            ("Same Site:", c.same_site.to_string()),
            ("Value:", c.value.clone()),
        ],
        Row::Host(host) => vec![("Host:", host.clone())],
    };

    let mut out = String::new();
    for (key, value) in fields {
        let _ = writeln!(out, "{key:<14}{value}");
    }
    out
}

/// One line per event, then the summary.
pub fn delete_report(report: &DeleteReport) -> String {
    let mut out = String::new();
    for event in &report.events {
        let _ = match event {
            DeleteEvent::Deleted(row) => writeln!(out, "Deleting: {row}"),
            DeleteEvent::Spared(row) => writeln!(out, "Cookie matches whitelist, ignoring: {row}"),
            DeleteEvent::Rejected(err) => writeln!(out, "{err}"),
        };
    }
    if let Some(err) = &report.aborted {
        let _ = writeln!(out, "{err}");
    }
    let _ = writeln!(out, "{report}");
    out
}
