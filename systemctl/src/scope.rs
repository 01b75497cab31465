//! System versus per-user service management.

use exec::Invocation;

/// Marker OpenRC tools take to act on the per-user instance.
pub const USER_MARKER: &str = "--user";

/// Which service manager instance a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The system-wide instance
    #[default]
    System,
    /// The calling user's instance
    User,
}

impl Scope {
    /// Rewrite an invocation for this scope.
    ///
    /// User scope inserts [`USER_MARKER`] right after the program name;
    /// OpenRC tools only accept it in that position.
    pub fn apply(self, invocation: Invocation) -> Invocation {
        match self {
            Scope::System => invocation,
            Scope::User => invocation.insert_after_program(USER_MARKER),
        }
    }

    pub fn is_user(self) -> bool {
        self == Scope::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_system_scope_is_identity() {
        let inv = Invocation::new("rc-update").args(["add", "sshd", "default"]);
        assert_eq!(Scope::System.apply(inv.clone()), inv);
    }

    #[test]
    fn test_user_scope_marker_follows_program() {
        let inv = Invocation::new("rc-update").args(["add", "sshd", "default"]);
        assert_eq!(
            Scope::User.apply(inv).argv(),
            vec!["rc-update", "--user", "add", "sshd", "default"]
        );
    }
}
