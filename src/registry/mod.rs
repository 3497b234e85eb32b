//! Host command registry.
//!
//! The bot hosting this plugin owns every command, its aliases, its
//! parent/children relationships and the permission level required to run
//! it. This module exposes a read-only view of that registry:
//!
//! - [`PermissionLevel`] - The levels a command or a staff member can hold
//! - [`CommandRegistry`] - The lookup seam used by the help relay
//! - [`Registry`] - An arena-backed registry built from [`CommandSpec`] declarations
//! - [`CommandRef`] - A borrowed view over one registered command
//!
//! # Examples
//!
//! ```no_run
//! use rhelp::registry::{CommandRegistry, CommandSpec, Registry};
//!
//! let registry = Registry::new(vec![CommandSpec::new("ban")], Default::default());
//! let command = registry.get_command("ban").unwrap();
//! assert_eq!(command.qualified_name(), "ban");
//! ```

use std::fmt;

use serde::Deserialize;

mod command;

pub use crate::registry::command::{CommandRef, CommandSpec, Registry};

/// Permission level required to run a command.
///
/// Levels are ordered by their numeric value, so a staff member may run a
/// command when their own level is greater than or equal to the command's.
/// [`PermissionLevel::Invalid`] is the sentinel returned when the registry
/// knows no level for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    /// No level resolved
    Invalid,
    /// Any user
    Regular,
    /// Staff answering tickets
    #[serde(alias = "RESPONDER")]
    Supporter,
    /// Moderation staff
    #[serde(alias = "MOD")]
    Moderator,
    /// Server administrators
    #[serde(alias = "ADMIN")]
    Administrator,
    /// Bot owners
    Owner,
}

impl PermissionLevel {
    /// Upper-case name of the level, e.g. `SUPPORTER`.
    pub fn name(&self) -> &'static str {
        match self {
            PermissionLevel::Invalid => "INVALID",
            PermissionLevel::Regular => "REGULAR",
            PermissionLevel::Supporter => "SUPPORTER",
            PermissionLevel::Moderator => "MODERATOR",
            PermissionLevel::Administrator => "ADMINISTRATOR",
            PermissionLevel::Owner => "OWNER",
        }
    }

    /// Numeric value of the level.
    pub fn value(&self) -> i8 {
        match self {
            PermissionLevel::Invalid => -1,
            PermissionLevel::Regular => 1,
            PermissionLevel::Supporter => 2,
            PermissionLevel::Moderator => 3,
            PermissionLevel::Administrator => 4,
            PermissionLevel::Owner => 5,
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.value())
    }
}

/// Read-only access to the host's command registry.
///
/// The help relay only needs two things from the host: resolving a typed
/// name (or alias path) to a command, and resolving the permission level
/// of a command from its qualified name.
pub trait CommandRegistry {
    /// Resolves a command from its name, an alias, or a space separated
    /// path of names/aliases (`config set`).
    ///
    /// Returns `None` when nothing matches.
    fn get_command(&self, name: &str) -> Option<CommandRef<'_>>;

    /// Resolves the permission level of a command from its qualified name.
    ///
    /// Returns [`PermissionLevel::Invalid`] when no level is known.
    fn command_permission(&self, qualified_name: &str) -> PermissionLevel;
}
