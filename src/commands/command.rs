//! Command parsing.
//!
//! Converts staff message text into structured [`Command`] enums.

use command_parser::Parser;
use log::debug;

use crate::commands::markdown_response::format_usage;

/// Prefix the parser is built with. The configured prefix is swapped for it
/// before parsing.
pub const PARSER_PREFIX: char = '?';

/// A parsed help relay command.
///
/// Both variants carry the free-text name of the command whose help must
/// be relayed, e.g. `config set`.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Relay the help signed with the staff member identity
    Rhelp(String),
    /// Relay the help signed with the support agent persona
    Arhelp(String),
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command is neither `rhelp` nor `arhelp`
    NotRelay,
    /// `rhelp` without the name of a command
    MissingRhelpArgument,
    /// `arhelp` without the name of a command
    MissingArhelpArgument,
}

impl Command {
    /// Parses a message string into a Command.
    ///
    /// The name of the command whose help is requested is kept as typed,
    /// only trimmed.
    ///
    /// # Arguments
    ///
    /// * `parser` - The command parser instance, built with [`PARSER_PREFIX`]
    /// * `prefix` - The bot command prefix, e.g. `?` or `mm.`
    /// * `body` - The message text to parse
    ///
    /// # Errors
    ///
    /// - The message is not a command - [`CommandParsingError::UnableToParse`]
    /// - The command is another bot command - [`CommandParsingError::NotRelay`]
    /// - No command name was given - [`CommandParsingError::MissingRhelpArgument`]
    ///   or [`CommandParsingError::MissingArhelpArgument`]
    pub fn parse(parser: &Parser, prefix: &str, body: &str) -> Result<Self, CommandParsingError> {
        let Some(rest) = body.strip_prefix(prefix) else {
            return Err(CommandParsingError::UnableToParse);
        };

        // The parser only knows single character prefixes
        // It also ignores the last word, so a dummy word is added at the end
        let normalized = format!("{}{} dummy", PARSER_PREFIX, rest);

        // This is normal to fail if the message is not a command
        let command = match parser.parse(&normalized) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        let query = rest
            .split_once(char::is_whitespace)
            .map(|(_, query)| query.trim())
            .unwrap_or_default()
            .to_owned();

        match command.name.as_str() {
            "rhelp" if query.is_empty() => Err(CommandParsingError::MissingRhelpArgument),
            "arhelp" if query.is_empty() => Err(CommandParsingError::MissingArhelpArgument),
            "rhelp" => {
                debug!("Parsed rhelp command - query: {}", query);
                Ok(Command::Rhelp(query))
            }
            "arhelp" => {
                debug!("Parsed arhelp command - query: {}", query);
                Ok(Command::Arhelp(query))
            }
            _ => Err(CommandParsingError::NotRelay),
        }
    }

    /// Name of the command as typed after the prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Rhelp(_) => "rhelp",
            Command::Arhelp(_) => "arhelp",
        }
    }

    /// Free-text name of the command whose help is requested.
    pub fn query(&self) -> &str {
        match self {
            Command::Rhelp(query) | Command::Arhelp(query) => query,
        }
    }
}

/// Formats a command error into a user-friendly message.
///
/// Returns `None` for messages that must not be answered (not a command, or
/// a command handled elsewhere).
pub fn format_command_error(error: CommandParsingError, prefix: &str) -> Option<String> {
    match error {
        CommandParsingError::MissingRhelpArgument => Some(format_usage(prefix, "rhelp")),
        CommandParsingError::MissingArhelpArgument => Some(format_usage(prefix, "arhelp")),
        _ => None,
    }
}
