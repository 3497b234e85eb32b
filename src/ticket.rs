//! Support ticket seam.
//!
//! A ticket pairs a staff member with the end user (the recipient) they are
//! helping. The host owns tickets and their messaging channel; this module
//! only describes what the help relay needs from them.

use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::help::HelpEmbed;

/// Display identity of a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Display name
    pub name: String,
    /// Avatar shown next to the name
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Reason why an embed could not reach the recipient of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The recipient does not accept messages from the bot
    #[error("recipient unreachable: {0}")]
    RecipientUnreachable(String),
    /// The transport failed while sending
    #[error("transport error: {0}")]
    Transport(String),
}

/// An active support ticket.
///
/// This trait abstracts the host's messaging channel for easier testing
/// with mocks.
#[automock]
pub trait Ticket {
    /// Sends an embed to the recipient of the ticket.
    async fn send_to_recipient(&self, embed: &HelpEmbed) -> Result<(), DeliveryError>;
}
