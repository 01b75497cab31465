//! rcshim configuration
//!
//! Both shims read one optional TOML file, `/etc/rcshim/config.toml`
//! (or the path in `RCSHIM_CONFIG`). Everything in it has a default, so
//! most hosts never need one.
//!
//! ```toml
//! propagate_failures = false
//! dry_run = false
//!
//! [systemctl]
//! runlevel = "default"
//! system_runlevel_dir = "/etc/runlevels"
//! user_runlevel_dir = ".local/share/openrc/runlevels"
//!
//! [journalctl]
//! log_candidates = ["/var/log/everything.log", "/var/log/messages"]
//! fallback_log = "/var/log/messages"
//! ```
//!
//! ```rust,no_run
//! use rcshim_config::ConfigLoader;
//!
//! let config = ConfigLoader::from_env().load_with_env().unwrap();
//! println!("runlevel: {}", config.systemctl.runlevel);
//! ```

pub mod error;
pub mod loader;
pub mod shim;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
pub use shim::{is_plain_name, JournalctlConfig, ShimConfig, SystemctlConfig, DRY_RUN_ENV};
