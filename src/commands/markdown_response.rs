//! Markdown response formatters for staff commands.
//!
//! These replies are sent to the staff member who issued the command, never
//! to the ticket recipient.

/// Formats the reply when the requested command does not exist.
///
/// # Examples
///
/// ```
/// # use rhelp::commands::markdown_response::format_command_not_found;
/// assert_eq!(format_command_not_found("foo"), "Bot Command `foo` not found.");
/// ```
pub fn format_command_not_found(query: &str) -> String {
    format!("Bot Command `{}` not found.", query)
}

/// Formats the reply when the help reached the recipient.
pub fn format_help_sent(query: &str) -> String {
    format!("Command help for `{}` sent to the user.", query)
}

/// Formats the reply when the help could not be delivered.
///
/// The cause is deliberately left out of the staff reply.
pub fn format_help_not_sent() -> String {
    "The command help could not get sent to the user.".to_owned()
}

/// Formats the usage of a relay command.
///
/// # Arguments
///
/// * `prefix` - The bot command prefix
/// * `name` - The relay command name, `rhelp` or `arhelp`
pub fn format_usage(prefix: &str, name: &str) -> String {
    format!("Usage: `{}{} <command>`", prefix, name)
}
