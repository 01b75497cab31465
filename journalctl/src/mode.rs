//! Choosing what to show.
//!
//! The flags are checked in a fixed order and the first match wins:
//! kernel, unit filter, follow, dump. A unit filter is a one-shot search,
//! so `-u NAME -f` does not follow.

use crate::cli::Cli;
use exec::Invocation;
use std::path::PathBuf;

/// Kernel ring buffer dump tool
pub const KERNEL_TOOL: &str = "dmesg";
/// Case-insensitive search tool
pub const SEARCH_TOOL: &str = "grep";
/// One-shot dump tool
pub const DUMP_TOOL: &str = "cat";
/// Rotation-tolerant follow tool
pub const FOLLOW_TOOL: &str = "tail";

/// What the viewer forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// `dmesg`
    Kernel,
    /// `grep -i -e <unit> <log>`
    ServiceFilter(String),
    /// `tail [-n N] -F <log>`
    Follow { lines: Option<usize> },
    /// `cat <log>`, or `tail -n N <log>`
    Dump { lines: Option<usize> },
}

impl ViewMode {
    /// Pick the mode for a parsed command line.
    pub fn select(cli: &Cli) -> Self {
        if cli.kernel {
            ViewMode::Kernel
        } else if let Some(unit) = cli.unit_filter() {
            let unit = unit.strip_suffix(".service").unwrap_or(unit);
            ViewMode::ServiceFilter(unit.to_string())
        } else if cli.follow {
            ViewMode::Follow { lines: cli.lines }
        } else {
            ViewMode::Dump { lines: cli.lines }
        }
    }

    /// Build the invocation. `log_source` is only called for modes that
    /// read the log file.
    pub fn render<F>(&self, log_source: F) -> Invocation
    where
        F: FnOnce() -> PathBuf,
    {
        match self {
            ViewMode::Kernel => Invocation::new(KERNEL_TOOL),
            ViewMode::ServiceFilter(unit) => Invocation::new(SEARCH_TOOL)
                .args(["-i", "-e", unit.as_str()])
                .arg(log_source().to_string_lossy()),
            ViewMode::Follow { lines } => {
                let mut inv = Invocation::new(FOLLOW_TOOL);
                if let Some(n) = lines {
                    inv = inv.arg("-n").arg(n.to_string());
                }
                inv.arg("-F").arg(log_source().to_string_lossy())
            }
            ViewMode::Dump { lines: None } => {
                Invocation::new(DUMP_TOOL).arg(log_source().to_string_lossy())
            }
            ViewMode::Dump { lines: Some(n) } => Invocation::new(FOLLOW_TOOL)
                .arg("-n")
                .arg(n.to_string())
                .arg(log_source().to_string_lossy()),
        }
    }
}
