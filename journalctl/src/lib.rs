//! journalctl front end for hosts logging to flat files.
//!
//! ```text
//! journalctl [-u UNIT] [-f] [-k] [-n N]
//! ```
//!
//! `-k` forwards to `dmesg`. `-u` searches the active log file with
//! `grep -i -e`. `-f` follows it with `tail -F`. Otherwise the file is
//! dumped with `cat`. The active log file is the first of
//! `/var/log/everything.log`, `/var/log/messages`, `/var/log/syslog` and
//! `/var/log/rc.log` that exists.

pub mod cli;
pub mod mode;
pub mod source;

pub use cli::Cli;
pub use mode::ViewMode;

use anyhow::Context;
use clap::Parser;
use config::{JournalctlConfig, ShimConfig};
use exec::{FailureTally, Runner};
use std::ffi::OsString;
use tracing::debug;

/// Forwards log queries to the host's text tools.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: JournalctlConfig,
    propagate_failures: bool,
}

impl Viewer {
    pub fn new(config: JournalctlConfig, propagate_failures: bool) -> Self {
        Self {
            config,
            propagate_failures,
        }
    }

    pub fn from_config(config: &ShimConfig) -> Self {
        Self::new(config.journalctl.clone(), config.propagate_failures)
    }

    /// Run the query described by `cli` and return the exit code.
    pub fn execute(&self, cli: &Cli, runner: &mut dyn Runner) -> i32 {
        if !cli.matches.is_empty() {
            debug!(matches = ?cli.matches, "Ignoring journal field matches");
        }

        let mode = ViewMode::select(cli);
        let invocation = mode.render(|| source::resolve(&self.config));
        debug!(?mode, command = %invocation, "Forwarding log query");

        let mut tally = FailureTally::new();
        tally.run(runner, &invocation);
        tally.exit_code(self.propagate_failures)
    }
}

/// Parse a full argument vector and run it. Parse errors, `--help` and
/// `--version` are printed by clap and mapped to its exit codes.
pub fn run<I, T>(args: I, viewer: &Viewer, runner: &mut dyn Runner) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => viewer.execute(&cli, runner),
        Err(e) => {
            let _ = e.print();
            e.exit_code()
        }
    }
}

/// Process entry point shared by the `journalctl` binary and the
/// multi-call `rcshim` binary.
pub fn main_with_args(args: Vec<String>) -> anyhow::Result<i32> {
    let config = config::ConfigLoader::from_env()
        .load_with_env()
        .context("Failed to load rcshim configuration")?;

    let viewer = Viewer::from_config(&config);
    let mut runner = exec::select_runner(config.dry_run);
    Ok(run(args, &viewer, &mut *runner))
}
