//! systemctl front end for OpenRC.
//!
//! Translates the commonly scripted subset of `systemctl` into
//! `rc-service`, `rc-update`, `rc-status`, the host power commands and
//! `loginctl`:
//!
//! ```text
//! systemctl [--now] [--user|--system] [-q|-v] COMMAND [SERVICE...]
//! ```
//!
//! Exit codes: 0 on success, 1 when `is-enabled` finds a disabled
//! service, 2 for usage errors (no command, missing services, unknown
//! command). Failures of the forwarded tools are not reflected in the
//! exit code unless `propagate_failures` is set in the configuration.
//!
//! # Example
//!
//! ```no_run
//! use rcshim_systemctl::{run, Controller};
//! use config::ShimConfig;
//! use exec::RecordingRunner;
//!
//! let controller = Controller::from_config(&ShimConfig::default());
//! let mut runner = RecordingRunner::new();
//! let code = run(
//!     ["systemctl", "enable", "--now", "sshd"],
//!     &controller,
//!     &mut runner,
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! );
//! assert_eq!(code, 0);
//! ```

pub mod args;
pub mod controller;
pub mod enablement;
pub mod error;
pub mod scope;
pub mod table;

pub use args::{parse, ParsedCommand};
pub use controller::{unit_name, Controller, EXIT_DISABLED};
pub use error::{Error, Result, EXIT_USAGE};
pub use scope::Scope;

use anyhow::Context;
use exec::Runner;
use std::io::Write;

/// Usage line printed when no command is given.
pub const USAGE: &str = "Usage: systemctl [OPTIONS...] COMMAND [SERVICE...]";

/// Run a full argument vector and return the process exit code.
///
/// Usage errors are reported on `err` in systemctl's wording.
pub fn run<I, S>(
    args: I,
    controller: &Controller,
    runner: &mut dyn Runner,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let result = parse(args).and_then(|parsed| controller.execute(&parsed, runner, out, err));
    match result {
        Ok(code) => code,
        Err(e) => {
            report(&e, err);
            e.exit_code()
        }
    }
}

fn report(error: &Error, err: &mut dyn Write) {
    let _ = match error {
        Error::NoCommand => writeln!(err, "{}\nerror: {}", USAGE, error),
        Error::MissingTargets { .. } => writeln!(err, "error: {}", error),
        Error::UnknownCommand(_) => writeln!(err, "{}", error),
        Error::Io(_) => writeln!(err, "Error: {}", error),
    };
}

/// Process entry point shared by the `systemctl` binary and the
/// multi-call `rcshim` binary.
pub fn main_with_args(args: Vec<String>) -> anyhow::Result<i32> {
    let config = config::ConfigLoader::from_env()
        .load_with_env()
        .context("Failed to load rcshim configuration")?;

    let controller = Controller::from_config(&config);
    let mut runner = exec::select_runner(config.dry_run);

    Ok(run(
        args,
        &controller,
        &mut *runner,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    ))
}
