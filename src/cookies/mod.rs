//! Cookie records and the stores that hold them.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieRecord`](record::CookieRecord) | One row of the browser's `cookies` table |
//! | [`CookieStore`](store::CookieStore) | Query/delete surface the session engine uses |
//! | [`SqliteCookieStore`](store::SqliteCookieStore) | Chromium `Cookies` database via rusqlite |
//! | [`MemoryCookieStore`](memory::MemoryCookieStore) | In-memory backend |
//! | [`chromedb`] | Schema constants and 1601-epoch timestamp conversion |
//!
//! # Example
//!
//! ```rust,no_run
//! use crumbs::cookies::store::{CookieStore, SqliteCookieStore};
//!
//! let store = SqliteCookieStore::open("./Cookies")?;
//! for cookie in store.query_by_host("example.com")? {
//!     println!("{cookie}");
//! }
//! # Ok::<(), crumbs::base::error::StoreError>(())
//! ```

pub mod chromedb;
pub mod memory;
pub mod record;
pub mod store;
