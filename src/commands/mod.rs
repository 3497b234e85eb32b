//! Staff command parsing and help relay.
//!
//! This module provides the command processing pipeline allowing staff
//! members to send the help of a bot command to the user they are helping
//! in a ticket.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting a staff message into a structured [`command::Command`]
//! 2. **Access checks** - The message must come from a ticket, sent by a supporter or above
//! 3. **Lookup** - Resolving the requested command in the host registry
//! 4. **Rendering** - Building the help embed and stamping its author
//! 5. **Delivery** - Sending the embed to the ticket recipient
//! 6. **Response** - Reporting the outcome back to the staff member
//!
//! # Architecture
//!
//! ```text
//! Staff Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + parse_command()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────► command::Command
//!      │
//!      └── parse_command() ──► access checks
//!                                   │
//!                                   ▼
//!                          ┌─────────────────┐
//!                          │ Action Handlers │
//!                          │  - handle_rhelp │
//!                          │  - handle_arhelp│
//!                          └─────────────────┘
//!                                   │
//!                                   ▼
//!                          ┌────────────────────┐
//!                          │  CommandResult     │
//!                          │  - response        │
//!                          │  - outcome         │
//!                          └────────────────────┘
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `rhelp` | `<command>` | Send the help of a command, signed with your own name |
//! | `arhelp` | `<command>` | Same, signed by the anonymous support agent persona |
//!
//! # Error Handling
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): Messages that aren't
//!   commands or are for other commands.
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): Missing argument,
//!   answered with a usage message.
//! - **Lookup and delivery failures** are regular results: the staff member
//!   gets a reply and [`CommandResult::outcome`] tells them apart.

use crate::{registry::PermissionLevel, ticket::DeliveryError, ticket::Identity};

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::commander::Commander;

/// Runtime context of a staff command.
///
/// # Fields
///
/// * `author` - Identity of the staff member who sent the command
/// * `permission_level` - Level of the staff member
/// * `ticket` - Ticket the command was sent from, if any
#[derive(Debug)]
pub struct CommandContext<'a, T> {
    /// Identity of the command issuer
    pub author: Identity,
    /// Permission level of the command issuer
    pub permission_level: PermissionLevel,
    /// Ticket where the command was issued
    pub ticket: Option<&'a T>,
}

/// How a help relay ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// No command matches the requested name
    NotFound,
    /// The help was delivered to the recipient
    Sent,
    /// The help could not be delivered
    Failed(DeliveryError),
}

/// Result of command execution.
///
/// # Fields
///
/// * `response` - Message to send back to the staff member
/// * `outcome` - What happened to the help embed
#[derive(Debug)]
pub struct CommandResult {
    /// Response message
    pub response: String,
    /// Outcome of the relay
    pub outcome: RelayOutcome,
}

/// Errors that can occur during command parsing.
///
/// * `NotForBot` - Message is not a help relay command. Should be ignored.
/// * `InvalidCommand` - Command is missing its argument. Contains the
///   message to display.
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this plugin (silent error)
    NotForBot,
    /// Invalid command syntax with error message
    InvalidCommand(String),
}
