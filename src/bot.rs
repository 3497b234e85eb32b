//! Console host for the help relay.
//!
//! This module provides the [`Bot`] implementation that plays the staff
//! side of a support ticket from a terminal. Every line read on stdin is a
//! staff message; replies meant for the staff member and embeds delivered
//! to the recipient are printed on stdout.
//!
//! # Message Processing Flow
//!
//! ```text
//! stdin line → Parse Command → Access Checks → Lookup → Render → Deliver → Reply
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use rhelp::bot::Bot;
//! # use rhelp::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! let bot = Bot::new(config)?;
//! bot.start().await?; // Runs until stdin is closed
//! # Ok(())
//! # }
//! ```

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    commands::{CommandContext, CommandParseError, Commander},
    config::{Config, OutputFormat},
    help::{HelpEmbed, HelpRenderer},
    registry::{PermissionLevel, Registry},
    ticket::{DeliveryError, Identity, Ticket},
};

/// Ticket whose recipient reads the terminal.
pub struct ConsoleTicket {
    /// How delivered embeds are printed
    format: OutputFormat,
    /// Simulates a recipient who closed their direct messages when `false`
    accepts_messages: bool,
}

impl ConsoleTicket {
    pub fn new(format: OutputFormat, accepts_messages: bool) -> Self {
        ConsoleTicket {
            format,
            accepts_messages,
        }
    }

    /// Renders an embed the way it is printed to the recipient.
    fn render(&self, embed: &HelpEmbed) -> Result<String, DeliveryError> {
        if !self.accepts_messages {
            return Err(DeliveryError::RecipientUnreachable(
                "the recipient does not accept messages".to_owned(),
            ));
        }

        match self.format {
            OutputFormat::Markdown => Ok(embed.to_markdown()),
            OutputFormat::Json => serde_json::to_string_pretty(embed)
                .map_err(|e| DeliveryError::Transport(e.to_string())),
        }
    }
}

impl Ticket for ConsoleTicket {
    async fn send_to_recipient(&self, embed: &HelpEmbed) -> Result<(), DeliveryError> {
        let rendered = self.render(embed)?;
        println!("[to recipient]\n{}", rendered);
        Ok(())
    }
}

/// Console bot relaying command help to the recipient of a ticket.
///
/// # Examples
///
/// ```no_run
/// # use rhelp::bot::Bot;
/// # use rhelp::config::Config;
/// # async fn example() -> Result<(), anyhow::Error> {
/// let bot = Bot::new(Config::load("config.yaml")?)?;
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct Bot {
    /// Command parser and executor
    commander: Commander<Registry>,
    /// The ticket the staff member is answering
    ticket: ConsoleTicket,
    /// Identity of the staff member typing
    staff: Identity,
    /// Permission level of the staff member
    staff_level: PermissionLevel,
    /// Whether messages are sent from inside the ticket
    in_ticket: bool,
}

impl Bot {
    /// Creates a new Bot from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the command prefix is empty, contains a
    /// whitespace, or starts with the option marker `-`.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let prefix = config.bot.prefix;
        if prefix.is_empty() {
            anyhow::bail!("the command prefix cannot be empty");
        }
        if prefix.contains(char::is_whitespace) {
            anyhow::bail!("the command prefix cannot contain a whitespace");
        }
        if prefix.starts_with('-') {
            anyhow::bail!("the command prefix cannot start with '-'");
        }

        let registry = Registry::new(config.commands, config.permissions);
        if registry.is_empty() {
            warn!("no command registered, every lookup will fail");
        }
        info!("{} commands registered", registry.len());

        let renderer = HelpRenderer::new(&prefix, config.bot.main_color, config.bot.field_limit);
        let commander = Commander::new(&prefix, registry, renderer, config.persona.into());

        Ok(Bot {
            commander,
            ticket: ConsoleTicket::new(
                config.console.format,
                config.console.recipient_accepts_messages,
            ),
            staff: config.console.staff,
            staff_level: config.console.staff_level,
            in_ticket: config.console.in_ticket,
        })
    }

    /// Reads staff messages from stdin until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        info!("reading messages of {} from stdin", self.staff.name);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(reply) = self.handle_message(&line).await {
                println!("[to {}] {}", self.staff.name, reply);
            }
        }

        info!("stdin closed, stopping");
        Ok(())
    }

    /// Handles a staff message and returns the reply to show them, if any.
    async fn handle_message(&self, body: &str) -> Option<String> {
        let command = match self.commander.parse(body) {
            Ok(command) => command,
            // Return silently if the command is not for the bot
            Err(CommandParseError::NotForBot) => return None,
            // Send error message if the command is invalid
            Err(CommandParseError::InvalidCommand(message)) => return Some(message),
        };

        debug!("handling {:?}", command);

        let context = CommandContext {
            author: self.staff.clone(),
            permission_level: self.staff_level,
            ticket: self.in_ticket.then_some(&self.ticket),
        };

        let result = self.commander.parse_command(&command, &context).await?;
        debug!("{} ended with {:?}", command.name(), result.outcome);

        Some(result.response)
    }
}
