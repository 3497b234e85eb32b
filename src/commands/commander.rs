//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for staff
//! messages. It parses them, enforces the access checks and routes relay
//! commands to their handlers.
//!
//! # Flow
//!
//! ```text
//! Staff Message → parse() → Command → parse_command() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use rhelp::commands::{Commander, CommandContext};
//! # async fn example(registry: Registry, renderer: HelpRenderer, persona: Identity, ticket: MyTicket) {
//! let commander = Commander::new("?", registry, renderer, persona);
//!
//! let command = commander.parse("?rhelp ban").unwrap();
//! let context = CommandContext {
//!     author: Identity { name: "Alice".to_string(), avatar_url: None },
//!     permission_level: PermissionLevel::Supporter,
//!     ticket: Some(&ticket),
//! };
//! if let Some(result) = commander.parse_command(&command, &context).await {
//!     println!("Reply: {}", result.response);
//! }
//! # }
//! ```

use command_parser::Parser;
use log::warn;

use crate::{
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{handle_arhelp, handle_rhelp},
        command::{Command, PARSER_PREFIX, format_command_error},
    },
    help::HelpRenderer,
    registry::{CommandRegistry, PermissionLevel},
    ticket::{Identity, Ticket},
};

/// Minimum level allowed to relay help.
const REQUIRED_LEVEL: PermissionLevel = PermissionLevel::Supporter;

/// Command orchestrator for the help relay commands.
///
/// The Commander is responsible for:
/// - Parsing raw message text into structured commands
/// - Checking the command is sent from a ticket by a supporter
/// - Routing commands to the `rhelp`/`arhelp` handlers
/// - Converting errors into user-friendly messages
///
/// # Supported Commands
///
/// - `rhelp <command>` - Relay a help signed by the staff member
/// - `arhelp <command>` - Relay a help signed by the support agent persona
pub struct Commander<R: CommandRegistry> {
    /// Command parser for processing staff messages
    parser: Parser,
    /// Bot command prefix
    prefix: String,
    /// Host command registry
    registry: R,
    /// Help embed builder
    renderer: HelpRenderer,
    /// Identity stamped by `arhelp`
    persona: Identity,
}

impl<R: CommandRegistry> Commander<R> {
    /// Creates a new Commander.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Bot command prefix, e.g. `?`
    /// * `registry` - Host command registry used for lookups and permission levels
    /// * `renderer` - Builder of the help embeds
    /// * `persona` - Anonymous identity stamped by `arhelp`
    pub fn new(prefix: &str, registry: R, renderer: HelpRenderer, persona: Identity) -> Self {
        let parser = Parser::new(PARSER_PREFIX, '-');
        Commander {
            parser,
            prefix: prefix.to_owned(),
            registry,
            renderer,
            persona,
        }
    }

    /// Parses a staff message into a relay command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - A `rhelp` or `arhelp` command with its argument
    /// * `Err(CommandParseError::NotForBot)` - Not a command, or another command
    /// * `Err(CommandParseError::InvalidCommand)` - Relay command without argument
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, &self.prefix, body).map_err(|error| {
            // Return silently if the command is not for the plugin
            // Otherwise, send an error message
            match format_command_error(error, &self.prefix) {
                Some(message) => CommandParseError::InvalidCommand(message),
                None => CommandParseError::NotForBot,
            }
        })
    }

    /// Executes a parsed command and returns the result.
    ///
    /// The command only runs when sent from a ticket by a staff member of
    /// level [`PermissionLevel::Supporter`] or above.
    ///
    /// # Returns
    ///
    /// * `Some(CommandResult)` - The reply for the staff member and the relay outcome
    /// * `None` - An access check failed, nothing must be answered
    pub async fn parse_command<T: Ticket>(
        &self,
        command: &Command,
        context: &CommandContext<'_, T>,
    ) -> Option<CommandResult> {
        let Some(ticket) = context.ticket else {
            warn!(
                "{} sent {} outside of a ticket",
                context.author.name,
                command.name()
            );
            return None;
        };

        if context.permission_level < REQUIRED_LEVEL {
            warn!(
                "{} is {} but {} requires {}",
                context.author.name,
                context.permission_level,
                command.name(),
                REQUIRED_LEVEL
            );
            return None;
        }

        let query = command.query();
        let result = match command {
            Command::Rhelp(_) => {
                handle_rhelp(&self.registry, &self.renderer, query, &context.author, ticket).await
            }
            Command::Arhelp(_) => {
                handle_arhelp(&self.registry, &self.renderer, query, &self.persona, ticket).await
            }
        };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        commands::RelayOutcome,
        registry::{CommandSpec, Registry},
        ticket::{DeliveryError, MockTicket},
    };

    fn create_test_commander() -> Commander<Registry> {
        let registry = Registry::new(
            vec![
                CommandSpec::new("ban")
                    .signature("<user> [reason]")
                    .help("Ban a user.")
                    .permission(PermissionLevel::Moderator),
                CommandSpec::new("config")
                    .invoke_without_command()
                    .subcommands(vec![CommandSpec::new("set").signature("<key> <value>")]),
            ],
            HashMap::new(),
        );
        let persona = Identity {
            name: "Modmail Support Agent".to_string(),
            avatar_url: None,
        };
        Commander::new("?", registry, HelpRenderer::new("?", 1, 1024), persona)
    }

    fn create_test_context(
        ticket: Option<&MockTicket>,
        permission_level: PermissionLevel,
    ) -> CommandContext<'_, MockTicket> {
        CommandContext {
            author: Identity {
                name: "Alice".to_string(),
                avatar_url: None,
            },
            permission_level,
            ticket,
        }
    }

    #[test]
    fn test_parse_valid_rhelp_command() {
        let commander = create_test_commander();

        let result = commander.parse("?rhelp ban");
        assert!(matches!(result, Ok(Command::Rhelp(query)) if query == "ban"));
    }

    #[test]
    fn test_parse_valid_arhelp_command() {
        let commander = create_test_commander();

        let result = commander.parse("?arhelp config set");
        assert!(matches!(result, Ok(Command::Arhelp(query)) if query == "config set"));
    }

    #[test]
    fn test_parse_missing_argument_returns_usage() {
        let commander = create_test_commander();

        match commander.parse("?rhelp") {
            Err(CommandParseError::InvalidCommand(msg)) => {
                assert_eq!(msg, "Usage: `?rhelp <command>`");
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_not_for_bot() {
        let commander = create_test_commander();

        assert!(matches!(
            commander.parse("?help ban"),
            Err(CommandParseError::NotForBot)
        ));
        assert!(matches!(
            commander.parse("This is just a regular message"),
            Err(CommandParseError::NotForBot)
        ));
    }

    #[tokio::test]
    async fn test_parse_command_outside_ticket() {
        let commander = create_test_commander();
        let context = create_test_context(None, PermissionLevel::Owner);

        let result = commander
            .parse_command(&Command::Rhelp("ban".to_string()), &context)
            .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_parse_command_insufficient_level() {
        let commander = create_test_commander();
        let mut ticket = MockTicket::new();
        ticket.expect_send_to_recipient().times(0);
        let context = create_test_context(Some(&ticket), PermissionLevel::Regular);

        let result = commander
            .parse_command(&Command::Arhelp("ban".to_string()), &context)
            .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_parse_command_not_found() {
        let commander = create_test_commander();
        let mut ticket = MockTicket::new();
        ticket.expect_send_to_recipient().times(0);
        let context = create_test_context(Some(&ticket), PermissionLevel::Supporter);

        let result = commander
            .parse_command(&Command::Rhelp("foo".to_string()), &context)
            .await
            .unwrap();

        assert_eq!(result.response, "Bot Command `foo` not found.");
        assert_eq!(result.outcome, RelayOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_parse_command_rhelp_sent() {
        let commander = create_test_commander();
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .withf(|embed| embed.author.as_ref().unwrap().name == "Alice")
            .times(1)
            .returning(|_| Ok(()));
        let context = create_test_context(Some(&ticket), PermissionLevel::Supporter);

        let result = commander
            .parse_command(&Command::Rhelp("ban".to_string()), &context)
            .await
            .unwrap();

        assert_eq!(result.response, "Command help for `ban` sent to the user.");
        assert_eq!(result.outcome, RelayOutcome::Sent);
    }

    #[tokio::test]
    async fn test_parse_command_arhelp_delivery_failure() {
        let commander = create_test_commander();
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .withf(|embed| embed.author.as_ref().unwrap().name == "Modmail Support Agent")
            .times(1)
            .returning(|_| Err(DeliveryError::Transport("connection reset".to_string())));
        let context = create_test_context(Some(&ticket), PermissionLevel::Moderator);

        let result = commander
            .parse_command(&Command::Arhelp("ban".to_string()), &context)
            .await
            .unwrap();

        assert_eq!(
            result.response,
            "The command help could not get sent to the user."
        );
        assert!(matches!(result.outcome, RelayOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_parse_then_execute_subcommand_path() {
        let commander = create_test_commander();
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .withf(|embed| embed.title == "?config set <key> <value>")
            .times(1)
            .returning(|_| Ok(()));
        let context = create_test_context(Some(&ticket), PermissionLevel::Supporter);

        let command = commander.parse("?rhelp config set").unwrap();
        let result = commander.parse_command(&command, &context).await.unwrap();

        assert_eq!(
            result.response,
            "Command help for `config set` sent to the user."
        );
    }
}
