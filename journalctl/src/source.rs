//! Locating the active flat log file.

use config::JournalctlConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Return the first existing candidate, or `fallback` when none exists.
///
/// The fallback is returned whether or not it exists; the forwarded tool
/// reports the absence itself.
pub fn resolve_with<F>(candidates: &[PathBuf], fallback: &Path, exists: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    match candidates.iter().find(|p| exists(p)) {
        Some(path) => {
            debug!(path = %path.display(), "Using log file");
            path.clone()
        }
        None => {
            debug!(path = %fallback.display(), "No log candidate exists, using fallback");
            fallback.to_path_buf()
        }
    }
}

/// Resolve the log file on the real filesystem.
pub fn resolve(config: &JournalctlConfig) -> PathBuf {
    resolve_with(&config.log_candidates, &config.fallback_log, Path::exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fallback() {
        let config = JournalctlConfig::default();
        let resolved = resolve_with(&config.log_candidates, &config.fallback_log, |_| false);
        assert_eq!(resolved, PathBuf::from("/var/log/messages"));
    }

    #[test]
    fn test_priority_order_wins() {
        let config = JournalctlConfig::default();
        let resolved = resolve_with(&config.log_candidates, &config.fallback_log, |p| {
            p == Path::new("/var/log/syslog") || p == Path::new("/var/log/rc.log")
        });
        assert_eq!(resolved, PathBuf::from("/var/log/syslog"));
    }

    #[test]
    fn test_resolve_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalctlConfig {
            log_candidates: vec![dir.path().join("first.log"), dir.path().join("second.log")],
            fallback_log: dir.path().join("fallback.log"),
        };
        assert_eq!(resolve(&config), dir.path().join("fallback.log"));

        std::fs::write(dir.path().join("second.log"), "b\n").unwrap();
        assert_eq!(resolve(&config), dir.path().join("second.log"));

        std::fs::write(dir.path().join("first.log"), "a\n").unwrap();
        assert_eq!(resolve(&config), dir.path().join("first.log"));
    }
}
