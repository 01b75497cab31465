//! Runlevel membership checks for `is-enabled`.
//!
//! A service is enabled when its name appears as a symbolic link in the
//! runlevel directory. Only the link is checked; whether it points at a
//! valid init script is not.

use crate::scope::Scope;
use config::SystemctlConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether `name` may be looked up in a runlevel directory at all.
///
/// Rejects anything that could resolve outside the directory.
pub fn is_valid_name(name: &str) -> bool {
    config::is_plain_name(name)
}

/// Check whether `name` is linked into `runlevel_dir`.
pub fn is_enabled(runlevel_dir: &Path, name: &str) -> bool {
    if !is_valid_name(name) {
        debug!(name, "Rejecting service name");
        return false;
    }

    let path = runlevel_dir.join(name);
    match std::fs::symlink_metadata(&path) {
        Ok(meta) => meta.file_type().is_symlink(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Runlevel entry not found");
            false
        }
    }
}

/// Runlevel directory for `scope`.
///
/// User scope needs a home directory; without one there is nothing to
/// check and `None` is returned.
pub fn runlevel_dir(scope: Scope, config: &SystemctlConfig, home: Option<&Path>) -> Option<PathBuf> {
    match scope {
        Scope::System => Some(config.system_runlevel_path()),
        Scope::User => home.map(|home| config.user_runlevel_path(home)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("sshd"));
        assert!(is_valid_name("net.eth0"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("."));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("../etc"));
        assert!(!is_valid_name("a\\b"));
    }

    #[test]
    fn test_symlink_counts_even_if_dangling() {
        let dir = tempfile::tempdir().unwrap();
        symlink("/etc/init.d/does-not-exist", dir.path().join("ghost")).unwrap();
        assert!(is_enabled(dir.path(), "ghost"));
    }

    #[test]
    fn test_regular_file_is_not_enabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain"), "").unwrap();
        assert!(!is_enabled(dir.path(), "plain"));
        assert!(!is_enabled(dir.path(), "missing"));
    }

    #[test]
    fn test_traversal_is_rejected_before_lookup() {
        let root = tempfile::tempdir().unwrap();
        let runlevel = root.path().join("default");
        std::fs::create_dir(&runlevel).unwrap();
        symlink("/etc", root.path().join("etc")).unwrap();

        assert!(!is_enabled(&runlevel, "../etc"));
    }

    #[test]
    fn test_runlevel_dir_by_scope() {
        let config = SystemctlConfig::default();
        assert_eq!(
            runlevel_dir(Scope::System, &config, None),
            Some(PathBuf::from("/etc/runlevels/default"))
        );
        assert_eq!(
            runlevel_dir(Scope::User, &config, Some(Path::new("/home/bob"))),
            Some(PathBuf::from("/home/bob/.local/share/openrc/runlevels/default"))
        );
        assert_eq!(runlevel_dir(Scope::User, &config, None), None);
    }
}
