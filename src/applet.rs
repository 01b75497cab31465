//! Applet selection for the multi-call binary.
//!
//! The binary picks a shim from the name it was invoked under, so a
//! single install can be linked as both `systemctl` and `journalctl`.
//! Run under any other name, the first argument names the applet.

use std::path::Path;

/// A shim reachable through the multi-call binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applet {
    Systemctl,
    Journalctl,
}

/// Every applet, in the order `--list` prints them.
pub const APPLETS: &[Applet] = &[Applet::Systemctl, Applet::Journalctl];

impl Applet {
    pub fn name(self) -> &'static str {
        match self {
            Applet::Systemctl => "systemctl",
            Applet::Journalctl => "journalctl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        APPLETS.iter().copied().find(|a| a.name() == name)
    }

    /// Run the applet with a full argument vector.
    pub fn main(self, args: Vec<String>) -> anyhow::Result<i32> {
        match self {
            Applet::Systemctl => systemctl::main_with_args(args),
            Applet::Journalctl => journalctl::main_with_args(args),
        }
    }
}

/// What the multi-call binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Run an applet with this argument vector (applet name first)
    Run(Applet, Vec<String>),
    /// Print the applet names
    List,
    /// Print usage and fail
    Usage,
}

/// Decide from the raw argument vector.
pub fn dispatch(args: Vec<String>) -> Dispatch {
    let invoked_as = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .and_then(Applet::from_name);

    if let Some(applet) = invoked_as {
        return Dispatch::Run(applet, args);
    }

    match args.get(1).map(String::as_str) {
        Some("--list") => Dispatch::List,
        Some(name) => match Applet::from_name(name) {
            Some(applet) => Dispatch::Run(applet, args.into_iter().skip(1).collect()),
            None => Dispatch::Usage,
        },
        None => Dispatch::Usage,
    }
}
