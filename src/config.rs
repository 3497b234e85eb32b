//! Configuration file structures for the rhelp bot.
//!
//! The configuration is a YAML file whose values can be overridden with
//! environment variables prefixed by `RHELP_`, nested keys being separated
//! by `__` (e.g. `RHELP_BOT__PREFIX`).
//!
//! # Configuration File Format
//!
//! ```yaml
//! bot:
//!   prefix: "?"
//!   main_color: 0x5865F2
//!   field_limit: 1024
//!
//! persona:
//!   name: "Modmail Support Agent"
//!   icon_url: "https://discordapp.com/assets/f78426a064bc9dd24847519259bc42af.png"
//!
//! commands:
//!   - name: ban
//!     signature: "<user> [reason]"
//!     help: "Ban a user from the server."
//!     permission_level: MODERATOR
//!   - name: config
//!     invoke_without_command: true
//!     permission_level: ADMINISTRATOR
//!     subcommands:
//!       - name: set
//!         signature: "<key> <value>"
//!         help: "Set a configuration value."
//!
//! permissions:
//!   "config set": OWNER
//!
//! console:
//!   staff:
//!     name: "Alice"
//!     avatar_url: "https://example.com/alice.png"
//!   staff_level: SUPPORTER
//!   in_ticket: true
//!   recipient_accepts_messages: true
//!   format: markdown
//! ```

use std::collections::HashMap;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::{
    registry::{CommandSpec, PermissionLevel},
    ticket::Identity,
};

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Bot wide settings
    #[serde(default)]
    pub bot: Bot,
    /// Identity stamped by `arhelp`
    #[serde(default)]
    pub persona: Persona,
    /// Commands registered by the host bot
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
    /// Permission levels overriding the declared ones, by qualified name
    #[serde(default)]
    pub permissions: HashMap<String, PermissionLevel>,
    /// Console session settings
    #[serde(default)]
    pub console: Console,
}

impl Config {
    /// Loads the configuration from a YAML file, applying `RHELP_`
    /// environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("RHELP_").split("__"))
            .extract()
    }
}

/// Bot wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Bot {
    /// Command prefix, also shown in the help signatures
    pub prefix: String,
    /// Accent color of the help embeds
    pub main_color: u32,
    /// Maximum number of characters of the subcommand list, 0 for no limit
    pub field_limit: usize,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            prefix: "?".to_owned(),
            main_color: 0x5865F2,
            field_limit: 1024,
        }
    }
}

/// Anonymous identity used by `arhelp`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub name: String,
    pub icon_url: Option<String>,
}

impl Default for Persona {
    fn default() -> Self {
        Persona {
            name: "Modmail Support Agent".to_owned(),
            icon_url: Some(
                "https://discordapp.com/assets/f78426a064bc9dd24847519259bc42af.png".to_owned(),
            ),
        }
    }
}

impl From<Persona> for Identity {
    fn from(persona: Persona) -> Self {
        Identity {
            name: persona.name,
            avatar_url: persona.icon_url,
        }
    }
}

/// Output format of the embeds delivered in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Console session settings.
///
/// The console plays the staff side of a single ticket: every line typed is
/// a message from `staff`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Console {
    /// Identity of the staff member typing
    pub staff: Identity,
    /// Permission level of the staff member
    pub staff_level: PermissionLevel,
    /// Whether the messages are sent from a ticket
    pub in_ticket: bool,
    /// Whether the recipient accepts messages from the bot
    pub recipient_accepts_messages: bool,
    /// Format of the delivered embeds
    pub format: OutputFormat,
}

impl Default for Console {
    fn default() -> Self {
        Console {
            staff: Identity {
                name: "Supporter".to_owned(),
                avatar_url: None,
            },
            staff_level: PermissionLevel::Supporter,
            in_ticket: true,
            recipient_accepts_messages: true,
            format: OutputFormat::Markdown,
        }
    }
}
