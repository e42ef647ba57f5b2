//! Session configuration.

use std::path::PathBuf;

use crate::base::error::CrumbError;
use crate::cookies::store::SqliteCookieStore;
use crate::hostlist::HostLists;
use crate::session::Session;

pub const DEFAULT_COOKIES_PATH: &str = "./Cookies";
pub const DEFAULT_BLACKLIST_PATH: &str = "./blacklist.json";
pub const DEFAULT_WHITELIST_PATH: &str = "./whitelist.json";

/// Used when the terminal size cannot be read (e.g. output is piped).
pub const FALLBACK_PAGE_SIZE: usize = 20;

/// Terminal rows not available for table rows: title, header, rule, and prompt,
/// with some slack.
const RESERVED_ROWS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cookies: PathBuf,
    pub blacklist: PathBuf,
    pub whitelist: PathBuf,
    /// Rows per page; `None` derives it from the terminal height.
    pub page_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookies: PathBuf::from(DEFAULT_COOKIES_PATH),
            blacklist: PathBuf::from(DEFAULT_BLACKLIST_PATH),
            whitelist: PathBuf::from(DEFAULT_WHITELIST_PATH),
            page_size: None,
        }
    }
}

impl Config {
    pub fn with_cookies(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookies = path.into();
        self
    }

    pub fn with_blacklist(mut self, path: impl Into<PathBuf>) -> Self {
        self.blacklist = path.into();
        self
    }

    pub fn with_whitelist(mut self, path: impl Into<PathBuf>) -> Self {
        self.whitelist = path.into();
        self
    }

    pub fn with_page_size(mut self, rows: usize) -> Self {
        self.page_size = Some(rows);
        self
    }

    /// Effective page size, never below one.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or_else(terminal_page_size).max(1)
    }

    /// Load both host lists and open the cookie database.
    pub fn open_session(&self) -> Result<Session<SqliteCookieStore>, CrumbError> {
        let lists = HostLists::load(&self.blacklist, &self.whitelist)?;
        let store = SqliteCookieStore::open(&self.cookies)?;
        Ok(Session::new(store, lists, self.page_size()))
    }
}

/// Rows that fit on screen below the table chrome.
pub fn terminal_page_size() -> usize {
    match terminal_rows() {
        Some(rows) => (rows as usize).saturating_sub(RESERVED_ROWS).max(1),
        None => FALLBACK_PAGE_SIZE,
    }
}

#[cfg(unix)]
fn terminal_rows() -> Option<u16> {
    use std::os::unix::io::AsRawFd;

    let fd = std::io::stdout().as_raw_fd();
    // SAFETY: TIOCGWINSZ only writes into the zeroed winsize we own.
    let winsize = unsafe {
        let mut winsize: libc::winsize = std::mem::zeroed();
        if libc::ioctl(fd, libc::TIOCGWINSZ, &mut winsize) < 0 {
            return None;
        }
        winsize
    };
    (winsize.ws_row > 0).then_some(winsize.ws_row)
}

#[cfg(not(unix))]
fn terminal_rows() -> Option<u16> {
    None
}
