//! Subcommand listing.

use crate::registry::CommandRef;

/// Keeps the subcommands that can be shown to a user.
///
/// Hidden commands are dropped. The remaining commands keep their
/// declaration order: no sorting, no deduplication.
pub fn filter_commands<'a>(commands: &[CommandRef<'a>]) -> Vec<CommandRef<'a>> {
    commands
        .iter()
        .filter(|command| !command.hidden())
        .copied()
        .collect()
}
