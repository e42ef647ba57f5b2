//! crumbs - curate browser cookies from the terminal.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crumbs::config::{
    Config, DEFAULT_BLACKLIST_PATH, DEFAULT_COOKIES_PATH, DEFAULT_WHITELIST_PATH,
};
use crumbs::shell::Shell;

/// Manage cookies for Chromium-based browser engines.
#[derive(Parser)]
#[command(name = "crumbs", version, about)]
struct Cli {
    /// Location of cookie database file.
    #[arg(short = 'c', long = "cookies", value_name = "PATH", env = "CRUMBS_COOKIES", default_value = DEFAULT_COOKIES_PATH)]
    cookies: PathBuf,

    /// Location of blacklist file.
    #[arg(short = 'b', long = "blacklist", value_name = "PATH", env = "CRUMBS_BLACKLIST", default_value = DEFAULT_BLACKLIST_PATH)]
    blacklist: PathBuf,

    /// Location of whitelist file.
    #[arg(short = 'w', long = "whitelist", value_name = "PATH", env = "CRUMBS_WHITELIST", default_value = DEFAULT_WHITELIST_PATH)]
    whitelist: PathBuf,

    /// Rows per page (default: terminal height).
    #[arg(long, value_name = "ROWS", env = "CRUMBS_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Execute these commands and exit (separate multiple commands with semicolons).
    #[arg(short = 'e', value_name = "CMD")]
    execute: Option<String>,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with tables on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crumbs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::default()
        .with_cookies(cli.cookies)
        .with_blacklist(cli.blacklist)
        .with_whitelist(cli.whitelist);
    if let Some(rows) = cli.page_size {
        config = config.with_page_size(rows);
    }

    let session = config.open_session()?;
    tracing::info!(
        cookies = %config.cookies.display(),
        page_size = session.page_size(),
        "session started"
    );

    match cli.execute {
        Some(batch) => Shell::new(session, io::stdout().lock(), false).run_batch(&batch)?,
        None => {
            let interactive = io::stdin().is_terminal();
            Shell::new(session, io::stdout().lock(), interactive).run_interactive(io::stdin().lock())?
        }
    }
    Ok(())
}
