//! The command dispatch table.
//!
//! Each systemctl command maps to a [`CommandSpec`] describing what it
//! forwards to. Nothing in here runs anything; the controller walks the
//! entry and hands rendered invocations to a runner.

use config::SystemctlConfig;
use exec::Invocation;

/// Whether a command operates on named services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// At least one target is required
    RequiresTargets,
    /// Targets are ignored
    NoTargets,
}

/// Invocation rendered once per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTemplate {
    /// `rc-update add <target> <runlevel>`
    Register,
    /// `rc-update del <target>`
    Deregister,
    /// `rc-service <target> <verb>`
    Service(&'static str),
}

impl TargetTemplate {
    pub fn render(self, target: &str, config: &SystemctlConfig) -> Invocation {
        match self {
            TargetTemplate::Register => Invocation::new(&config.rc_update).args([
                "add",
                target,
                config.runlevel.as_str(),
            ]),
            TargetTemplate::Deregister => {
                Invocation::new(&config.rc_update).args(["del", target])
            }
            TargetTemplate::Service(verb) => {
                Invocation::new(&config.rc_service).args([target, verb])
            }
        }
    }
}

/// Invocation rendered once, with no target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedTemplate {
    /// `rc-status -a`
    StatusListing,
    /// `rc-update show`
    RunlevelListing,
    /// Host power command with no arguments
    Power(&'static str),
    /// `loginctl <action>`
    Session(&'static str),
}

impl FixedTemplate {
    pub fn render(self, config: &SystemctlConfig) -> Invocation {
        match self {
            FixedTemplate::StatusListing => Invocation::new(&config.rc_status).arg("-a"),
            FixedTemplate::RunlevelListing => Invocation::new(&config.rc_update).arg("show"),
            FixedTemplate::Power(program) => Invocation::new(program),
            FixedTemplate::Session(action) => {
                Invocation::new(&config.session_manager).arg(action)
            }
        }
    }
}

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run `primary` for every target, then `now` for every target when
    /// `--now` was given
    PerTarget {
        primary: TargetTemplate,
        now: Option<TargetTemplate>,
    },
    /// Report runlevel membership of every target without running anything
    CheckEnabled,
    /// Run a single invocation
    Fixed(FixedTemplate),
}

/// One dispatch table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub action: Action,
    /// `--user` is dropped with a warning for these
    pub system_only: bool,
}

impl CommandSpec {
    pub fn arity(&self) -> Arity {
        match self.action {
            Action::PerTarget { .. } | Action::CheckEnabled => Arity::RequiresTargets,
            Action::Fixed(_) => Arity::NoTargets,
        }
    }
}

const fn service(name: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        action: Action::PerTarget {
            primary: TargetTemplate::Service(name),
            now: None,
        },
        system_only: false,
    }
}

const fn system(name: &'static str, template: FixedTemplate) -> CommandSpec {
    CommandSpec {
        name,
        action: Action::Fixed(template),
        system_only: true,
    }
}

/// Every supported command.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "enable",
        action: Action::PerTarget {
            primary: TargetTemplate::Register,
            now: Some(TargetTemplate::Service("start")),
        },
        system_only: false,
    },
    CommandSpec {
        name: "disable",
        action: Action::PerTarget {
            primary: TargetTemplate::Deregister,
            now: Some(TargetTemplate::Service("stop")),
        },
        system_only: false,
    },
    service("start"),
    service("stop"),
    service("restart"),
    service("reload"),
    service("status"),
    CommandSpec {
        name: "is-enabled",
        action: Action::CheckEnabled,
        system_only: false,
    },
    system("list-units", FixedTemplate::StatusListing),
    system("list-unit-files", FixedTemplate::RunlevelListing),
    system("halt", FixedTemplate::Power("halt")),
    system("poweroff", FixedTemplate::Power("poweroff")),
    system("reboot", FixedTemplate::Power("reboot")),
    system("suspend", FixedTemplate::Session("suspend")),
    system("hibernate", FixedTemplate::Session("hibernate")),
];

/// Look up a command by name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_are_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            assert!(
                COMMANDS[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate entry: {}",
                a.name
            );
        }
    }

    #[test]
    fn test_system_only_commands() {
        let system_only: Vec<_> = COMMANDS
            .iter()
            .filter(|s| s.system_only)
            .map(|s| s.name)
            .collect();
        assert_eq!(
            system_only,
            vec![
                "list-units",
                "list-unit-files",
                "halt",
                "poweroff",
                "reboot",
                "suspend",
                "hibernate"
            ]
        );
    }

    #[test]
    fn test_arity() {
        assert_eq!(lookup("enable").unwrap().arity(), Arity::RequiresTargets);
        assert_eq!(lookup("is-enabled").unwrap().arity(), Arity::RequiresTargets);
        assert_eq!(lookup("reboot").unwrap().arity(), Arity::NoTargets);
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn test_templates_render() {
        let config = SystemctlConfig::default();
        assert_eq!(
            TargetTemplate::Register.render("sshd", &config).argv(),
            vec!["rc-update", "add", "sshd", "default"]
        );
        assert_eq!(
            TargetTemplate::Deregister.render("sshd", &config).argv(),
            vec!["rc-update", "del", "sshd"]
        );
        assert_eq!(
            TargetTemplate::Service("reload").render("sshd", &config).argv(),
            vec!["rc-service", "sshd", "reload"]
        );
        assert_eq!(
            FixedTemplate::StatusListing.render(&config).argv(),
            vec!["rc-status", "-a"]
        );
        assert_eq!(
            FixedTemplate::Session("hibernate").render(&config).argv(),
            vec!["loginctl", "hibernate"]
        );
    }

    #[test]
    fn test_render_uses_configured_tools() {
        let config = SystemctlConfig {
            rc_update: "/sbin/rc-update".to_string(),
            runlevel: "boot".to_string(),
            ..Default::default()
        };
        assert_eq!(
            TargetTemplate::Register.render("udev", &config).argv(),
            vec!["/sbin/rc-update", "add", "udev", "boot"]
        );
    }
}
