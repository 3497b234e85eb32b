//! Command help formatting.
//!
//! Turns a registered command into a [`HelpEmbed`] ready to be sent to the
//! recipient of a ticket:
//!
//! - [`signature`] - Rebuilds the full invocation of a command from its ancestry
//! - [`subcommands`] - Keeps the subcommands visible to users
//! - [`renderer`] - Assembles signature, description, permission level and subcommand tree
//! - [`embed`] - The embed value, its JSON shape and its Markdown rendering

mod embed;
mod renderer;
mod signature;
mod subcommands;

pub use crate::help::{embed::HelpEmbed, renderer::HelpRenderer};
