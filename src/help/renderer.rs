//! Help embed rendering.
//!
//! Combines the signature, the help text and the permission level of a
//! command into a [`HelpEmbed`]. Group commands also list their visible
//! subcommands as a tree:
//!
//! ```text
//! ├─ set - Set a configuration value
//! ├─ get - Read a configuration value
//! └─ reset - Restore the defaults
//! ```

use log::debug;

use crate::{
    help::{embed::HelpEmbed, signature::get_command_signature, subcommands::filter_commands},
    registry::{CommandRef, CommandRegistry, PermissionLevel},
};

const NO_DESCRIPTION: &str = "No Description.";
const PERMISSION_LEVEL_FIELD: &str = "Permission Level";
const SUBCOMMANDS_FIELD: &str = "Sub Command(s)";

/// Builds [`HelpEmbed`]s for registered commands.
#[derive(Debug, Clone)]
pub struct HelpRenderer {
    /// Command prefix shown in signatures
    prefix: String,
    /// Accent color of the embeds
    color: u32,
    /// Maximum number of characters of the subcommand field, 0 for no limit
    field_limit: usize,
}

impl HelpRenderer {
    /// Creates a new [`HelpRenderer`].
    ///
    /// # Arguments
    ///
    /// * `prefix` - The bot command prefix, e.g. `?`
    /// * `color` - Accent color of the embeds as `0xRRGGBB`
    /// * `field_limit` - Maximum characters of the subcommand list, `0` disables truncation
    pub fn new(prefix: &str, color: u32, field_limit: usize) -> Self {
        HelpRenderer {
            prefix: prefix.to_owned(),
            color,
            field_limit,
        }
    }

    /// Renders the help of a command.
    ///
    /// The title is the trimmed signature of the command and the description
    /// its help text, or `No Description.`. A group command gets a
    /// `Permission Level` field followed by a `Sub Command(s)` field listing
    /// its visible subcommands. Any other command carries its permission
    /// level in the footer.
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry resolving the permission level of the command
    /// * `command` - The command to describe
    pub fn render<R: CommandRegistry + ?Sized>(
        &self,
        registry: &R,
        command: CommandRef<'_>,
    ) -> HelpEmbed {
        let signature = get_command_signature(command, &self.prefix);
        let permission_level =
            format_permission_level(registry.command_permission(&command.qualified_name()));

        let description = command
            .help()
            .filter(|help| !help.is_empty())
            .unwrap_or(NO_DESCRIPTION);
        let mut embed = HelpEmbed::new(signature.trim(), description, self.color);

        if command.is_group() {
            embed.add_field(PERMISSION_LEVEL_FIELD, &permission_level, false);

            let subcommands = filter_commands(&command.subcommands());
            if subcommands.is_empty() {
                // Chat backends reject empty field values
                debug!("no visible subcommand for {}", command.qualified_name());
            } else {
                embed.add_field(
                    SUBCOMMANDS_FIELD,
                    &format_subcommand_tree(&subcommands, self.field_limit),
                    true,
                );
            }
        } else {
            embed.set_footer(&format!("Permission level: {}", permission_level));
        }

        embed
    }
}

/// Formats a permission level, `NONE` for [`PermissionLevel::Invalid`].
pub fn format_permission_level(level: PermissionLevel) -> String {
    match level {
        PermissionLevel::Invalid => "NONE".to_owned(),
        level => level.to_string(),
    }
}

/// Formats subcommands as a tree, one `├─ name - short doc` line each and
/// `└─` for the last one.
///
/// With a non-zero `limit`, whole lines are kept while they fit and the
/// rest is summarized by a final `… and N more` line. The summary line is
/// always present once a line was dropped, even if it alone exceeds `limit`.
pub fn format_subcommand_tree(commands: &[CommandRef<'_>], limit: usize) -> String {
    let lines: Vec<String> = commands
        .iter()
        .enumerate()
        .map(|(i, command)| {
            let branch = if i + 1 == commands.len() {
                "└─"
            } else {
                "├─"
            };
            format!("{} {} - {}\n", branch, command.name(), command.short_doc())
        })
        .collect();

    if limit == 0 {
        return lines.concat();
    }

    let mut kept = 0;
    let mut used = 0;
    for line in &lines {
        let length = line.chars().count();
        if used + length > limit {
            break;
        }
        used += length;
        kept += 1;
    }

    if kept == lines.len() {
        return lines.concat();
    }

    debug!(
        "subcommand list exceeds {} characters, keeping {} of {} lines",
        limit,
        kept,
        lines.len()
    );

    // Drop lines until the summary fits
    loop {
        let summary = format!("… and {} more\n", lines.len() - kept);
        if kept == 0 || used + summary.chars().count() <= limit {
            return lines[..kept].concat() + &summary;
        }
        kept -= 1;
        used -= lines[kept].chars().count();
    }
}
