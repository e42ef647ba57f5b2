//! # crumbs
//!
//! An interactive curator for Chromium-style cookie databases.
//!
//! `crumbs` selects cookie rows (or entries of its host blacklist and
//! whitelist), pages through them, and deletes them, always scoped to the
//! current selection. Bulk scrubbing honors whitelist precedence: a
//! whitelisted host is never deleted, even when it is also blacklisted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crumbs::config::Config;
//! use crumbs::session::ExitMode;
//!
//! let mut session = Config::default().open_session()?;
//! session.select_all_cookies()?;
//! let report = session.delete_blacklisted()?;
//! println!("{report}");
//! session.finish(ExitMode::Save)?;
//! # Ok::<(), crumbs::base::error::CrumbError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and context helpers
//! - [`cookies`] - Cookie records and stores (SQLite, in-memory)
//! - [`hostlist`] - Blacklist/whitelist collections and their persistence
//! - [`session`] - Selection, list management, and deletion engine
//! - [`shell`] - Command table, parsing, and the command loop
//! - [`render`] - Text tables and reports
//! - [`config`] - Paths and page size
//!
//! ## Concurrency
//!
//! One command runs to completion before the next starts. The engine needs
//! exclusive access to the cookie database; close the browser first.

pub mod base;
pub mod config;
pub mod cookies;
pub mod hostlist;
pub mod render;
pub mod session;
pub mod shell;
