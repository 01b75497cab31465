//! Executes a parsed command against the dispatch table.

use crate::args::ParsedCommand;
use crate::enablement;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::table::{self, Action, Arity};
use config::{ShimConfig, SystemctlConfig};
use exec::{FailureTally, Runner};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Exit code when `is-enabled` finds a disabled service.
pub const EXIT_DISABLED: i32 = 1;

/// Strip the systemd `.service` suffix so `sshd.service` addresses the
/// OpenRC script `sshd`.
pub fn unit_name(target: &str) -> &str {
    target.strip_suffix(".service").unwrap_or(target)
}

/// Translates systemctl commands into OpenRC invocations.
#[derive(Debug, Clone)]
pub struct Controller {
    config: SystemctlConfig,
    propagate_failures: bool,
    home: Option<PathBuf>,
}

impl Controller {
    /// Create a controller with an explicit home directory for user scope.
    pub fn new(config: SystemctlConfig, propagate_failures: bool, home: Option<PathBuf>) -> Self {
        Self {
            config,
            propagate_failures,
            home,
        }
    }

    /// Create a controller from the loaded configuration, taking the home
    /// directory from `$HOME`.
    pub fn from_config(config: &ShimConfig) -> Self {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);
        Self::new(config.systemctl.clone(), config.propagate_failures, home)
    }

    /// Execute `parsed`, returning the process exit code.
    ///
    /// Usage errors are returned before any invocation reaches `runner`.
    pub fn execute(
        &self,
        parsed: &ParsedCommand,
        runner: &mut dyn Runner,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<i32> {
        let spec = table::lookup(&parsed.command)
            .ok_or_else(|| Error::UnknownCommand(parsed.command.clone()))?;

        let mut scope = parsed.scope;
        if scope.is_user() && spec.system_only {
            writeln!(
                err,
                "Warning: --user ignored for system command '{}'",
                spec.name
            )?;
            scope = Scope::System;
        }

        if spec.arity() == Arity::RequiresTargets && parsed.targets.is_empty() {
            return Err(Error::MissingTargets {
                command: spec.name.to_string(),
            });
        }

        match spec.action {
            Action::PerTarget { primary, now } => {
                let mut tally = FailureTally::new();
                for target in &parsed.targets {
                    let inv = scope.apply(primary.render(unit_name(target), &self.config));
                    tally.run(runner, &inv);
                }
                if let (true, Some(now)) = (parsed.now, now) {
                    for target in &parsed.targets {
                        let inv = scope.apply(now.render(unit_name(target), &self.config));
                        tally.run(runner, &inv);
                    }
                }
                Ok(tally.exit_code(self.propagate_failures))
            }
            Action::CheckEnabled => self.check_enabled(scope, &parsed.targets, out),
            Action::Fixed(template) => {
                if !parsed.targets.is_empty() {
                    debug!(command = spec.name, targets = ?parsed.targets, "Ignoring targets");
                }
                let mut tally = FailureTally::new();
                tally.run(runner, &scope.apply(template.render(&self.config)));
                Ok(tally.exit_code(self.propagate_failures))
            }
        }
    }

    fn check_enabled(&self, scope: Scope, targets: &[String], out: &mut dyn Write) -> Result<i32> {
        let dir = enablement::runlevel_dir(scope, &self.config, self.home.as_deref());
        if dir.is_none() {
            debug!("HOME is not set; no user runlevel to check");
        }

        let mut all_enabled = true;
        for target in targets {
            let enabled = dir
                .as_deref()
                .is_some_and(|dir| enablement::is_enabled(dir, unit_name(target)));

            if enabled {
                writeln!(out, "{} enabled", target)?;
            } else {
                writeln!(out, "{} disabled", target)?;
                all_enabled = false;
            }
        }

        Ok(if all_enabled { 0 } else { EXIT_DISABLED })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse;
    use assert_matches::assert_matches;
    use exec::RecordingRunner;
    use pretty_assertions::assert_eq;

    fn run(
        controller: &Controller,
        args: &[&str],
    ) -> (Result<i32>, RecordingRunner, String, String) {
        let argv = std::iter::once("systemctl").chain(args.iter().copied());
        let parsed = parse(argv).unwrap();
        let mut runner = RecordingRunner::new();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let result = controller.execute(&parsed, &mut runner, &mut out, &mut err);
        (
            result,
            runner,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn controller() -> Controller {
        Controller::new(SystemctlConfig::default(), false, Some(PathBuf::from("/home/test")))
    }

    #[test]
    fn test_unit_name() {
        assert_eq!(unit_name("sshd.service"), "sshd");
        assert_eq!(unit_name("sshd"), "sshd");
        assert_eq!(unit_name("foo.socket"), "foo.socket");
    }

    #[test]
    fn test_disable_now_stops_after_deregistering() {
        let (result, runner, _, _) = run(&controller(), &["disable", "--now", "a", "b"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(
            runner.argvs(),
            vec![
                vec!["rc-update", "del", "a"],
                vec!["rc-update", "del", "b"],
                vec!["rc-service", "a", "stop"],
                vec!["rc-service", "b", "stop"],
            ]
        );
    }

    #[test]
    fn test_now_is_ignored_for_plain_verbs() {
        let (_, runner, _, _) = run(&controller(), &["--now", "restart", "sshd.service"]);
        assert_eq!(runner.argvs(), vec![vec!["rc-service", "sshd", "restart"]]);
    }

    #[test]
    fn test_user_scope_rewrites_every_invocation() {
        let (_, runner, _, err) = run(&controller(), &["--user", "--now", "enable", "mpd"]);
        assert!(err.is_empty());
        assert_eq!(
            runner.argvs(),
            vec![
                vec!["rc-update", "--user", "add", "mpd", "default"],
                vec!["rc-service", "--user", "mpd", "start"],
            ]
        );
    }

    #[test]
    fn test_user_dropped_for_listing() {
        let (result, runner, _, err) = run(&controller(), &["--user", "list-unit-files"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(err, "Warning: --user ignored for system command 'list-unit-files'\n");
        assert_eq!(runner.argvs(), vec![vec!["rc-update", "show"]]);
    }

    #[test]
    fn test_suspend_uses_session_manager() {
        let (_, runner, _, _) = run(&controller(), &["suspend"]);
        assert_eq!(runner.argvs(), vec![vec!["loginctl", "suspend"]]);
    }

    #[test]
    fn test_fixed_command_ignores_targets() {
        let (_, runner, _, _) = run(&controller(), &["reboot", "now"]);
        assert_eq!(runner.argvs(), vec![vec!["reboot"]]);
    }

    #[test]
    fn test_missing_targets_runs_nothing() {
        let (result, runner, _, _) = run(&controller(), &["--now", "enable"]);
        assert_matches!(result, Err(Error::MissingTargets { command }) if command == "enable");
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_child_failures_do_not_stop_loop() {
        let parsed = parse(["systemctl", "start", "a", "b", "c"]).unwrap();
        let mut runner = RecordingRunner::new().fail("rc-service", 3);
        let result =
            controller().execute(&parsed, &mut runner, &mut std::io::sink(), &mut std::io::sink());
        assert_eq!(result.unwrap(), 0);
        assert_eq!(runner.invocations().len(), 3);
    }

    #[test]
    fn test_child_failures_propagate_when_configured() {
        let controller = Controller::new(SystemctlConfig::default(), true, None);
        let parsed = parse(["systemctl", "start", "a", "b"]).unwrap();
        let mut runner = RecordingRunner::new().fail("rc-service", 3);
        let result =
            controller.execute(&parsed, &mut runner, &mut std::io::sink(), &mut std::io::sink());
        assert_eq!(result.unwrap(), 3);
        assert_eq!(runner.invocations().len(), 2);
    }

    #[test]
    fn test_is_enabled_without_home_reports_disabled() {
        let controller = Controller::new(SystemctlConfig::default(), false, None);
        let (result, runner, out, _) = run(&controller, &["--user", "is-enabled", "mpd"]);
        assert_eq!(result.unwrap(), EXIT_DISABLED);
        assert_eq!(out, "mpd disabled\n");
        assert!(runner.invocations().is_empty());
    }
}
