//! Command line definition.

use clap::Parser;

/// journalctl options understood by the shim. Options that only affect
/// presentation are accepted and ignored.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "journalctl",
    about = "Query the system log (flat log files on OpenRC hosts)",
    version,
    args_override_self = true
)]
pub struct Cli {
    /// Show only lines mentioning this unit
    #[arg(short = 'u', long = "unit", value_name = "UNIT")]
    pub unit: Option<String>,

    /// Follow the log as it grows
    #[arg(short = 'f', long = "follow")]
    pub follow: bool,

    /// Show kernel messages
    #[arg(short = 'k', long = "dmesg")]
    pub kernel: bool,

    /// Show only the last N lines
    #[arg(
        short = 'n',
        long = "lines",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "10"
    )]
    pub lines: Option<usize>,

    #[arg(long = "no-pager", hide = true)]
    pub no_pager: bool,

    #[arg(short = 'e', long = "pager-end", hide = true)]
    pub pager_end: bool,

    #[arg(short = 'x', long = "catalog", hide = true)]
    pub catalog: bool,

    #[arg(
        short = 'b',
        long = "boot",
        hide = true,
        value_name = "ID",
        num_args = 0..=1,
        default_missing_value = "0"
    )]
    pub boot: Option<String>,

    /// journalctl field matches; not supported on flat files
    #[arg(hide = true, value_name = "MATCHES")]
    pub matches: Vec<String>,
}

impl Cli {
    /// Unit filter, if one was given and is non-empty.
    pub fn unit_filter(&self) -> Option<&str> {
        self.unit.as_deref().filter(|u| !u.is_empty())
    }
}
