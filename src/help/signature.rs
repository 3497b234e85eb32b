//! Command signature reconstruction.
//!
//! Rebuilds the full invocation of a command, e.g. `?config set [add|put] <key> <value>`,
//! by walking its parent chain up to the root command.

use crate::registry::CommandRef;

/// Builds the invocation string of a command.
///
/// Each ancestor contributes its bare name when it has no signature or can
/// be invoked without a subcommand, otherwise its name followed by its
/// signature. Ancestors are listed root first. The command itself is
/// rendered as `[name|alias1|alias2]` when it has aliases, and its own
/// signature always follows after a single space, even when empty.
///
/// # Arguments
///
/// * `command` - The command to describe
/// * `prefix` - The bot command prefix, e.g. `?`
///
/// # Examples
///
/// ```text
/// ban          alias b, signature <user> [reason]   ?[ban|b] <user> [reason]
/// snippet add  snippet [name] runs without a child  ?snippet add <name> <value>
/// ```
pub fn get_command_signature(command: CommandRef<'_>, prefix: &str) -> String {
    let mut entries = Vec::new();
    let mut parent = command.parent();

    // Leaf to root
    while let Some(current) = parent {
        if current.signature().is_empty() || current.invoke_without_command() {
            entries.push(current.name().to_owned());
        } else {
            entries.push(format!("{} {}", current.name(), current.signature()));
        }
        parent = current.parent();
    }
    entries.reverse();
    let parent_signature = entries.join(" ");

    let name = if command.aliases().is_empty() {
        command.name().to_owned()
    } else {
        format!("[{}|{}]", command.name(), command.aliases().join("|"))
    };

    let invocation = if parent_signature.is_empty() {
        name
    } else {
        format!("{} {}", parent_signature, name)
    };

    format!("{}{} {}", prefix, invocation, command.signature())
}
