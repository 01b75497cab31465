//! Settings shared by the shims.
//!
//! Every field has a default matching a stock OpenRC host, so an empty
//! (or absent) configuration file yields a working setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that forces dry-run mode on or off.
pub const DRY_RUN_ENV: &str = "RCSHIM_DRY_RUN";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShimConfig {
    /// Exit with the forwarded tool's failure code instead of always 0
    pub propagate_failures: bool,
    /// Print invocations instead of executing them
    pub dry_run: bool,
    /// Service controller settings
    pub systemctl: SystemctlConfig,
    /// Log viewer settings
    pub journalctl: JournalctlConfig,
}

impl ShimConfig {
    /// Apply overrides from the environment.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DRY_RUN_ENV) {
            match parse_bool(&value) {
                Some(flag) => self.dry_run = flag,
                None => tracing::warn!(
                    value = %value,
                    "Ignoring unrecognized {} value",
                    DRY_RUN_ENV
                ),
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Service controller (`systemctl`) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemctlConfig {
    /// Runlevel that `enable`/`disable`/`is-enabled` operate on
    pub runlevel: String,
    /// Directory holding the system runlevels
    pub system_runlevel_dir: PathBuf,
    /// Directory holding the per-user runlevels, relative to `$HOME`
    pub user_runlevel_dir: PathBuf,
    /// Service control tool
    pub rc_service: String,
    /// Runlevel registration tool
    pub rc_update: String,
    /// Runlevel status tool
    pub rc_status: String,
    /// Session manager used for suspend and hibernate
    pub session_manager: String,
}

impl Default for SystemctlConfig {
    fn default() -> Self {
        Self {
            runlevel: "default".to_string(),
            system_runlevel_dir: PathBuf::from("/etc/runlevels"),
            user_runlevel_dir: PathBuf::from(".local/share/openrc/runlevels"),
            rc_service: "rc-service".to_string(),
            rc_update: "rc-update".to_string(),
            rc_status: "rc-status".to_string(),
            session_manager: "loginctl".to_string(),
        }
    }
}

impl SystemctlConfig {
    /// Directory of the configured runlevel for the whole system.
    pub fn system_runlevel_path(&self) -> PathBuf {
        self.system_runlevel_dir.join(&self.runlevel)
    }

    /// Directory of the configured runlevel for the user owning `home`.
    pub fn user_runlevel_path(&self, home: &Path) -> PathBuf {
        home.join(&self.user_runlevel_dir).join(&self.runlevel)
    }
}

/// Whether `name` is a single path component that stays inside the
/// directory it is joined onto.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '\0']) && name != "." && name != ".."
}

/// Log viewer (`journalctl`) settings.
///
/// Paths are forwarded as command-line arguments and must be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalctlConfig {
    /// Flat log files to probe, highest priority first
    pub log_candidates: Vec<PathBuf>,
    /// Log used when no candidate exists
    pub fallback_log: PathBuf,
}

impl Default for JournalctlConfig {
    fn default() -> Self {
        Self {
            log_candidates: vec![
                PathBuf::from("/var/log/everything.log"),
                PathBuf::from("/var/log/messages"),
                PathBuf::from("/var/log/syslog"),
                PathBuf::from("/var/log/rc.log"),
            ],
            fallback_log: PathBuf::from("/var/log/messages"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("default"));
        assert!(is_plain_name("sshd.local"));
        for name in ["", ".", "..", "../boot", "a/b", "a\\b"] {
            assert!(!is_plain_name(name), "{:?}", name);
        }
    }

    #[test]
    fn test_default_runlevel_paths() {
        let config = SystemctlConfig::default();
        assert_eq!(
            config.system_runlevel_path(),
            PathBuf::from("/etc/runlevels/default")
        );
        assert_eq!(
            config.user_runlevel_path(Path::new("/home/alice")),
            PathBuf::from("/home/alice/.local/share/openrc/runlevels/default")
        );
    }

    #[test]
    fn test_default_log_candidates_order() {
        let config = JournalctlConfig::default();
        assert_eq!(config.log_candidates[0], PathBuf::from("/var/log/everything.log"));
        assert_eq!(config.log_candidates.len(), 4);
        assert_eq!(config.fallback_log, PathBuf::from("/var/log/messages"));
    }

    #[test]
    fn test_dry_run_env_override() {
        let mut config = ShimConfig::default();
        config.apply_env(|k| (k == DRY_RUN_ENV).then(|| "1".to_string()));
        assert!(config.dry_run);

        config.apply_env(|k| (k == DRY_RUN_ENV).then(|| "off".to_string()));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_garbage_dry_run_value_is_ignored() {
        let mut config = ShimConfig {
            dry_run: true,
            ..Default::default()
        };
        config.apply_env(|_| Some("maybe".to_string()));
        assert!(config.dry_run);
    }
}
