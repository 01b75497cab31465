//! Configuration loading utilities
//!
//! Locates the shim configuration file and parses it into a [`ShimConfig`].

use crate::{is_plain_name, ConfigError, Result, ShimConfig};
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rcshim/config.toml";

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "RCSHIM_CONFIG";

/// Configuration loader
pub struct ConfigLoader {
    /// Path of the configuration file
    path: PathBuf,
    /// Whether a missing file yields the default configuration
    use_defaults: bool,
}

impl ConfigLoader {
    /// Create a loader for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_defaults: true,
        }
    }

    /// Create a loader for the default system configuration
    pub fn system() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }

    /// Create a loader honoring `RCSHIM_CONFIG`, falling back to the system path
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::system(),
        }
    }

    /// Set whether to use defaults when the file is missing
    pub fn use_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }

    /// Load the configuration, without environment overrides
    pub fn load(&self) -> Result<ShimConfig> {
        if !self.path.exists() {
            if self.use_defaults {
                tracing::debug!(path = %self.path.display(), "No configuration file, using defaults");
                return Ok(ShimConfig::default());
            }
            return Err(ConfigError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let config = parse(&self.path, &content)?;
        validate_config(&config)?;

        tracing::debug!(path = %self.path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the configuration and apply environment overrides
    pub fn load_with_env(&self) -> Result<ShimConfig> {
        let mut config = self.load()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Get the configuration file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse(path: &Path, content: &str) -> Result<ShimConfig> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate configuration for common issues
fn validate_config(config: &ShimConfig) -> Result<()> {
    let sys = &config.systemctl;

    if !is_plain_name(&sys.runlevel) {
        return Err(ConfigError::Invalid(format!(
            "Invalid runlevel name: '{}'",
            sys.runlevel
        )));
    }

    let tools = [
        ("rc_service", &sys.rc_service),
        ("rc_update", &sys.rc_update),
        ("rc_status", &sys.rc_status),
        ("session_manager", &sys.session_manager),
    ];
    for (key, value) in tools {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("'{}' must not be empty", key)));
        }
    }

    if sys.user_runlevel_dir.is_absolute() {
        tracing::warn!(
            dir = %sys.user_runlevel_dir.display(),
            "user_runlevel_dir is absolute; $HOME will not be prepended"
        );
    }

    let logs = &config.journalctl;
    if let Some(path) = logs
        .log_candidates
        .iter()
        .chain(std::iter::once(&logs.fallback_log))
        .find(|path| path.to_str().is_none())
    {
        return Err(ConfigError::Invalid(format!(
            "Log path is not valid UTF-8: '{}'",
            path.display()
        )));
    }

    if config.journalctl.log_candidates.is_empty() {
        tracing::warn!("No log candidates configured; the fallback log is always used");
    }

    Ok(())
}
