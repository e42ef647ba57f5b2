//! Static command table and statement parsing.
//!
//! Every mnemonic maps to exactly one [`Command`] with a fixed argument shape;
//! there is no runtime handler lookup.

use std::ops::RangeInclusive;

use crate::base::error::CrumbError;
use crate::hostlist::ListKind;

/// A parsed, strongly-typed shell statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectAllCookies,
    SelectCookiesByHost(String),
    SelectList(ListKind, Option<String>),
    List,
    Count,
    NextPage,
    PreviousPage,
    View(usize),
    AddHost(String),
    /// Page-relative number ranges, unexpanded.
    DeleteNumbers(Vec<RangeInclusive<usize>>),
    DeleteAll,
    DeleteExpired,
    DeleteBlacklisted,
    Help(Option<String>),
    /// Save host lists and exit.
    Quit,
    /// Exit without saving host lists.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Required(&'static str),
    Optional(&'static str),
}

/// One row of the command table.
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Accepted spellings that `h` does not list.
    pub aliases: &'static [&'static str],
    pub group: &'static str,
    pub arity: Arity,
    pub summary: &'static str,
    /// Extra usage notes shown by `h <command>`.
    pub notes: &'static str,
}

impl CommandSpec {
    pub fn usage(&self) -> String {
        match self.arity {
            Arity::None => self.name.to_string(),
            Arity::Required(arg) => format!("{} <{arg}>", self.name),
            Arity::Optional(arg) => format!("{} [{arg}]", self.name),
        }
    }
}

const fn spec(
    name: &'static str,
    group: &'static str,
    arity: Arity,
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        aliases: &[],
        group,
        arity,
        summary,
        notes: "",
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    spec("sca", "Select", Arity::None, "Select all cookies in DB."),
    spec("sch", "Select", Arity::Required("host"), "Select all cookies matching host."),
    spec("sba", "Select", Arity::None, "Select all entries in blacklist."),
    spec("sbh", "Select", Arity::Required("host"), "Select all blacklist entries matching host."),
    spec("swa", "Select", Arity::None, "Select all entries in whitelist."),
    spec("swh", "Select", Arity::Required("host"), "Select all whitelist entries matching host."),
    CommandSpec {
        name: "l",
        // Muscle memory.
        aliases: &["ls"],
        group: "List",
        arity: Arity::None,
        summary: "List the current page of the selection.",
        notes: "",
    },
    spec("c", "List", Arity::None, "Count all entries in the selection."),
    spec("n", "List", Arity::None, "Next page."),
    spec("p", "List", Arity::None, "Previous page."),
    spec("v", "View", Arity::Required("num"), "View details for an entry, referenced by number."),
    spec("ah", "Add", Arity::Required("host"), "Add a host to the selected black/white list."),
    CommandSpec {
        name: "dn",
        aliases: &[],
        group: "Delete",
        arity: Arity::Required("number_range"),
        summary: "Delete one or more entries by number.",
        notes: "Examples:\n  dn 3\n  dn 6-12\n  dn 6,9,3,11,14-17",
    },
    CommandSpec {
        name: "da",
        aliases: &[],
        group: "Delete",
        arity: Arity::None,
        summary: "Delete all entries in selection.",
        notes: "Cookies whose host matches a whitelist entry are not deleted.",
    },
    spec("de", "Delete", Arity::None, "Delete expired cookies from the selection."),
    CommandSpec {
        name: "db",
        aliases: &[],
        group: "Delete",
        arity: Arity::None,
        summary: "Delete selected cookies whose hosts are found in the blacklist.",
        notes: "Cookies whose host matches a whitelist entry are not deleted.",
    },
    spec("h", "Other", Arity::Optional("command"), "Provide usage documentation for commands."),
    spec("x", "Other", Arity::None, "Exit without saving black/white lists."),
    spec("q", "Other", Arity::None, "Save black/white lists and exit."),
];

/// Find a command by name or alias.
pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == token || spec.aliases.contains(&token))
}

impl Command {
    /// Parse one statement. Blank statements yield `None`.
    pub fn parse(statement: &str) -> Result<Option<Command>, CrumbError> {
        let mut tokens = statement.split_whitespace();
        let Some(token) = tokens.next() else {
            return Ok(None);
        };
        let spec = lookup(token)
            .ok_or_else(|| CrumbError::usage("Unknown command. Try 'h' for help."))?;

        let arg = match spec.arity {
            Arity::None => None,
            Arity::Required(name) => Some(
                tokens
                    .next()
                    .map(str::to_string)
                    .ok_or_else(|| CrumbError::missing_arg(name))?,
            ),
            Arity::Optional(_) => tokens.next().map(str::to_string),
        };

        let command = match (spec.name, arg) {
            ("sca", _) => Command::SelectAllCookies,
            ("sch", Some(host)) => Command::SelectCookiesByHost(host),
            ("sba", _) => Command::SelectList(ListKind::Blacklist, None),
            ("sbh", host) => Command::SelectList(ListKind::Blacklist, host),
            ("swa", _) => Command::SelectList(ListKind::Whitelist, None),
            ("swh", host) => Command::SelectList(ListKind::Whitelist, host),
            ("l", _) => Command::List,
            ("c", _) => Command::Count,
            ("n", _) => Command::NextPage,
            ("p", _) => Command::PreviousPage,
            ("v", Some(num)) => Command::View(
                num.parse::<usize>()
                    .map_err(|_| CrumbError::usage("Invalid number."))?,
            ),
            ("ah", Some(host)) => Command::AddHost(host),
            ("dn", Some(range)) => Command::DeleteNumbers(parse_numbers(&range)?),
            ("da", _) => Command::DeleteAll,
            ("de", _) => Command::DeleteExpired,
            ("db", _) => Command::DeleteBlacklisted,
            ("h", topic) => Command::Help(topic),
            ("x", _) => Command::Exit,
            ("q", _) => Command::Quit,
            (name, _) => return Err(CrumbError::usage(format!("Unhandled command '{name}'"))),
        };
        Ok(Some(command))
    }
}

/// Parse a number range such as `6,9,3,11,14-17`, in the order given.
///
/// Ranges stay unexpanded; single numbers become one-element ranges.
pub fn parse_numbers(range: &str) -> Result<Vec<RangeInclusive<usize>>, CrumbError> {
    let mut ranges = Vec::new();
    for part in range.split(',') {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(CrumbError::usage(
                "Argument 'number_range' contains invalid characters.",
            ));
        }
        let invalid = || CrumbError::usage(format!("Number range invalid or unsupported: '{part}'"));

        match part.split_once('-') {
            None => {
                let number = part.parse::<usize>().map_err(|_| invalid())?;
                ranges.push(number..=number);
            }
            Some((start, end)) => {
                let start: usize = start.parse().map_err(|_| invalid())?;
                let end: usize = end.parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                ranges.push(start..=end);
            }
        }
    }
    Ok(ranges)
}
