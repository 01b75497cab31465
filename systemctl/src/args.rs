//! Command line scanning.
//!
//! Flags may appear anywhere and unknown ones are skipped silently.
//! Tokens are classified one at a time. Recognized flags set state and
//! other dash-prefixed tokens, `--` included, are dropped. The remaining
//! words are the command followed by its targets, so a target never
//! starts with `-`.

use crate::error::{Error, Result};
use crate::scope::Scope;
use tracing::debug;

/// A scanned systemctl command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name, e.g. `enable`
    pub command: String,
    /// Services named after the command, in order
    pub targets: Vec<String>,
    /// `--now`: also start/stop on enable/disable
    pub now: bool,
    /// `--user` / `--system`
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Now,
    User,
    System,
    /// `-q`, `--quiet`, `-v`, `--verbose`
    Cosmetic,
    Unknown,
}

impl Flag {
    fn classify(token: &str) -> Option<Flag> {
        let flag = match token {
            "--now" => Flag::Now,
            "--user" => Flag::User,
            "--system" => Flag::System,
            "-q" | "--quiet" | "-v" | "--verbose" => Flag::Cosmetic,
            t if t.starts_with('-') => Flag::Unknown,
            _ => return None,
        };
        Some(flag)
    }
}

/// Scan a full argument vector. The first element is the program name
/// and is skipped.
pub fn parse<I, S>(args: I) -> Result<ParsedCommand>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut now = false;
    let mut scope = Scope::System;
    let mut positional = Vec::new();

    for token in args.into_iter().skip(1).map(Into::into) {
        match Flag::classify(&token) {
            Some(Flag::Now) => now = true,
            Some(Flag::User) => scope = Scope::User,
            Some(Flag::System) => scope = Scope::System,
            Some(Flag::Cosmetic) => {}
            Some(Flag::Unknown) => debug!(flag = %token, "Ignoring unrecognized flag"),
            None => positional.push(token),
        }
    }

    let mut positional = positional.into_iter();
    let command = positional.next().ok_or(Error::NoCommand)?;

    let parsed = ParsedCommand {
        command,
        targets: positional.collect(),
        now,
        scope,
    };
    debug!(?parsed, "Parsed command line");
    Ok(parsed)
}
