//! rhelp - Relay bot command help to the recipient of a support ticket.
//!
//! Staff members answering a ticket often need to explain to the user how a
//! bot command works. `rhelp` looks the command up in the bot registry,
//! renders its help (signature, description, permission level, subcommands)
//! as an embed and sends it to the ticket recipient.
//!
//! # Bot Commands
//!
//! - `?rhelp <command>` - Send the help of `<command>`, signed with your own name
//! - `?arhelp <command>` - Same, signed by the anonymous "Modmail Support Agent"
//!
//! Both commands only work inside a ticket, for staff members of level
//! `SUPPORTER` or above. `<command>` can be a name, an alias, or a path to a
//! subcommand such as `config set`.
//!
//! # Configuration
//!
//! See the [`config`] module for the YAML format. Any value can be
//! overridden with an environment variable prefixed by `RHELP_`:
//!
//! ```bash
//! export RHELP_BOT__PREFIX="!"
//! export RHELP_BOT__FIELD_LIMIT=2048
//! export RHELP_CONSOLE__FORMAT=json
//! ```
//!
//! # Usage
//!
//! ```bash
//! rhelp --config config.yaml
//! ```
//!
//! Each line typed is a staff message of the configured ticket.
//!
//! # Architecture
//!
//! - [`registry`] - Host command registry and permission levels
//! - [`help`] - Signature building, subcommand listing and embed rendering
//! - [`ticket`] - Ticket seam used to reach the recipient
//! - [`commands`] - Command parsing, access checks and relay handlers
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`bot`] - Console host reading staff messages from stdin
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::path::Path;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod help;
mod registry;
mod ticket;

/// Command-line arguments.
///
/// # Examples
///
/// ```bash
/// rhelp --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `RHELP_` environment variables, nested
    /// keys separated by `__` (e.g. `RHELP_BOT__PREFIX`).
    #[arg(short, long)]
    config: String,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting rhelp {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    if !Path::new(&args.config).is_file() {
        error!("Config file {} not found", args.config);
        return;
    }

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped with error: {}", e);
    }
}
