//! The command loop.
//!
//! A line holds one or more `;`-separated statements, each run to completion
//! before the next. Non-fatal errors are printed and the line continues;
//! a fatal error ([`CrumbError::is_fatal`]) stops the rest of the line.

pub mod command;

use std::io::{BufRead, Write};

use crate::base::error::CrumbError;
use crate::cookies::store::CookieStore;
use crate::hostlist::ListKind;
use crate::render;
use crate::session::{DeleteReport, ExitMode, Session};

pub use command::{Command, COMMANDS};

/// What the loop should do after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(ExitMode),
}

/// Drives a [`Session`] from text commands, writing everything to `out`.
pub struct Shell<S, W> {
    session: Session<S>,
    out: W,
    interactive: bool,
}

impl<S: CookieStore, W: Write> Shell<S, W> {
    /// In interactive mode page moves re-list the page.
    pub fn new(session: Session<S>, out: W, interactive: bool) -> Self {
        Self {
            session,
            out,
            interactive,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        // Output failures (closed pipe) are not worth aborting a deletion over.
        let _ = self.out.write_all(text.as_bytes());
        if !text.ends_with('\n') {
            let _ = self.out.write_all(b"\n");
        }
    }

    fn report(&mut self, err: &CrumbError) {
        self.emit(&format!("Error: {err}"));
    }

    /// Run every statement of a line.
    ///
    /// Returns `Err` only for fatal errors, after reporting them.
    pub fn run_line(&mut self, line: &str) -> Result<Flow, CrumbError> {
        for statement in line.split(';') {
            let result = Command::parse(statement).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Flow::Continue),
            });
            match result {
                Ok(Flow::Continue) => {}
                Ok(flow) => return Ok(flow),
                Err(err) => {
                    self.report(&err);
                    if err.is_fatal() {
                        return Err(err);
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Execute one command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Flow, CrumbError> {
        tracing::debug!(?command, "execute");
        match command {
            Command::SelectAllCookies => {
                let report = self.session.select_all_cookies()?;
                if report.is_empty() {
                    self.emit("No cookies found.");
                }
            }
            Command::SelectCookiesByHost(host) => {
                let report = self.session.select_cookies_by_host(&host)?;
                if report.is_empty() {
                    self.emit(&format!("No cookies match '{host}'."));
                }
            }
            Command::SelectList(list, host) => {
                let report = self.session.select_list(list, host.as_deref());
                if report.is_empty() {
                    self.emit(&empty_list_notice(list, host.as_deref()));
                }
            }
            Command::List => self.list()?,
            Command::Count => {
                let report = self.session.count()?;
                self.emit(&report.to_string());
            }
            Command::NextPage => {
                if self.session.next_page()? && self.interactive {
                    self.list()?;
                }
            }
            Command::PreviousPage => {
                if self.session.previous_page()? && self.interactive {
                    self.list()?;
                }
            }
            Command::View(number) => {
                let text = render::details(self.session.view(number)?);
                self.emit(&text);
            }
            Command::AddHost(host) => {
                let report = self.session.add_host(&host)?;
                self.emit(&report.to_string());
            }
            Command::DeleteNumbers(ranges) => {
                let report = self.session.delete_by_ranges(&ranges)?;
                return self.finish_delete(report);
            }
            Command::DeleteAll => {
                let report = self.session.delete_all()?;
                return self.finish_delete(report);
            }
            Command::DeleteExpired => {
                let report = self.session.delete_expired()?;
                return self.finish_delete(report);
            }
            Command::DeleteBlacklisted => {
                let report = self.session.delete_blacklisted()?;
                return self.finish_delete(report);
            }
            Command::Help(topic) => {
                let text = help(topic.as_deref())?;
                self.emit(&text);
            }
            Command::Quit => return Ok(Flow::Exit(ExitMode::Save)),
            Command::Exit => return Ok(Flow::Exit(ExitMode::Discard)),
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<(), CrumbError> {
        let text = render::page(&self.session.list()?);
        self.emit(&text);
        Ok(())
    }

    fn finish_delete(&mut self, mut report: DeleteReport) -> Result<Flow, CrumbError> {
        let aborted = report.aborted.take();
        self.emit(&render::delete_report(&report));
        match aborted {
            Some(err) => Err(err),
            None => Ok(Flow::Continue),
        }
    }

    /// Run a non-interactive batch line, then end the session.
    ///
    /// Lists are saved unless the batch itself ran `x`.
    pub fn run_batch(mut self, line: &str) -> Result<(), CrumbError> {
        let outcome = self.run_line(line);
        let mode = match outcome {
            Ok(Flow::Exit(mode)) => mode,
            _ => ExitMode::Save,
        };
        self.session.finish(mode)?;
        outcome.map(|_| ())
    }

    /// Prompt-and-execute loop until `q`, `x`, or end of input.
    pub fn run_interactive<R: BufRead>(mut self, mut input: R) -> Result<(), CrumbError> {
        // Start out looking at every cookie.
        if let Err(err) = self.execute(Command::SelectAllCookies) {
            self.report(&err);
        } else if let Err(err) = self.list() {
            self.report(&err);
        }

        let mode = loop {
            let _ = self.out.write_all(b"> ");
            let _ = self.out.flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    self.emit("q");
                    break ExitMode::Save;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read input");
                    break ExitMode::Save;
                }
            }

            // Fatal errors end the line, not the session.
            if let Ok(Flow::Exit(mode)) = self.run_line(&line) {
                break mode;
            }
        };

        self.session.finish(mode)
    }
}

fn empty_list_notice(list: ListKind, host: Option<&str>) -> String {
    match host {
        Some(host) => format!("No {list} entries match '{host}'."),
        None => format!("The {list} is empty."),
    }
}

/// Command overview, or usage for one command.
pub fn help(topic: Option<&str>) -> Result<String, CrumbError> {
    if let Some(topic) = topic {
        let spec = command::lookup(topic)
            .ok_or_else(|| CrumbError::usage("Unknown command. Try 'h' for help."))?;
        let mut text = format!("{}\n\nUsage: {}", spec.summary, spec.usage());
        if !spec.notes.is_empty() {
            text.push_str("\n\n");
            text.push_str(spec.notes);
        }
        return Ok(text);
    }

    let mut text = String::from("Commands:\n");
    let mut group = "";
    for spec in COMMANDS {
        if spec.group != group {
            group = spec.group;
            text.push_str(&format!("  {group}\n"));
        }
        text.push_str(&format!("    {:<10}{}\n", spec.name, spec.summary));
    }
    Ok(text)
}
