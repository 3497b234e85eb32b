//! Help relay handlers.
//!
//! `rhelp` and `arhelp` only differ by the identity stamped on the embed:
//! the staff member for `rhelp`, the support agent persona for `arhelp`.

use log::{debug, info, warn};

use crate::{
    commands::{
        CommandResult, RelayOutcome,
        markdown_response::{format_command_not_found, format_help_not_sent, format_help_sent},
    },
    help::HelpRenderer,
    registry::CommandRegistry,
    ticket::{Identity, Ticket},
};

/// Sends the help of `query` to the ticket recipient on behalf of the staff
/// member who asked for it.
pub async fn handle_rhelp<R, T>(
    registry: &R,
    renderer: &HelpRenderer,
    query: &str,
    author: &Identity,
    ticket: &T,
) -> CommandResult
where
    R: CommandRegistry + ?Sized,
    T: Ticket,
{
    debug!("handling rhelp command");

    relay_help(registry, renderer, query, author, ticket).await
}

/// Sends the help of `query` to the ticket recipient on behalf of the
/// support agent persona.
pub async fn handle_arhelp<R, T>(
    registry: &R,
    renderer: &HelpRenderer,
    query: &str,
    persona: &Identity,
    ticket: &T,
) -> CommandResult
where
    R: CommandRegistry + ?Sized,
    T: Ticket,
{
    debug!("handling arhelp command");

    relay_help(registry, renderer, query, persona, ticket).await
}

async fn relay_help<R, T>(
    registry: &R,
    renderer: &HelpRenderer,
    query: &str,
    author: &Identity,
    ticket: &T,
) -> CommandResult
where
    R: CommandRegistry + ?Sized,
    T: Ticket,
{
    let Some(command) = registry.get_command(query) else {
        info!("command {} not found", query);
        return CommandResult {
            response: format_command_not_found(query),
            outcome: RelayOutcome::NotFound,
        };
    };

    let mut embed = renderer.render(registry, command);
    embed.set_author(&author.name, author.avatar_url.as_deref());

    match ticket.send_to_recipient(&embed).await {
        Ok(()) => {
            info!(
                "help of {} sent to the recipient as {}",
                command.qualified_name(),
                author.name
            );
            CommandResult {
                response: format_help_sent(query),
                outcome: RelayOutcome::Sent,
            }
        }
        Err(e) => {
            warn!(
                "failed to send help of {} to the recipient: {}",
                command.qualified_name(),
                e
            );
            CommandResult {
                response: format_help_not_sent(),
                outcome: RelayOutcome::Failed(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::registry::{CommandSpec, PermissionLevel, Registry};
    use crate::ticket::{DeliveryError, MockTicket};

    fn create_test_registry() -> Registry {
        Registry::new(
            vec![
                CommandSpec::new("ban")
                    .signature("<user> [reason]")
                    .help("Ban a user.")
                    .permission(PermissionLevel::Moderator),
            ],
            HashMap::new(),
        )
    }

    fn create_test_author() -> Identity {
        Identity {
            name: "Alice".to_string(),
            avatar_url: Some("https://example.com/alice.png".to_string()),
        }
    }

    fn create_test_persona() -> Identity {
        Identity {
            name: "Modmail Support Agent".to_string(),
            avatar_url: Some("https://example.com/agent.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_handle_rhelp_not_found() {
        let registry = create_test_registry();
        let renderer = HelpRenderer::new("?", 1, 1024);
        let mut ticket = MockTicket::new();
        ticket.expect_send_to_recipient().times(0);

        let result = handle_rhelp(&registry, &renderer, "foo", &create_test_author(), &ticket).await;

        assert_eq!(result.response, "Bot Command `foo` not found.");
        assert_eq!(result.outcome, RelayOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_handle_rhelp_sent_with_author_identity() {
        let registry = create_test_registry();
        let renderer = HelpRenderer::new("?", 1, 1024);
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .withf(|embed| {
                let author = embed.author.as_ref().unwrap();
                embed.title == "?ban <user> [reason]"
                    && author.name == "Alice"
                    && author.icon_url.as_deref() == Some("https://example.com/alice.png")
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = handle_rhelp(&registry, &renderer, "ban", &create_test_author(), &ticket).await;

        assert_eq!(result.response, "Command help for `ban` sent to the user.");
        assert_eq!(result.outcome, RelayOutcome::Sent);
    }

    #[tokio::test]
    async fn test_handle_arhelp_sent_with_persona() {
        let registry = create_test_registry();
        let renderer = HelpRenderer::new("?", 1, 1024);
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .withf(|embed| embed.author.as_ref().unwrap().name == "Modmail Support Agent")
            .times(1)
            .returning(|_| Ok(()));

        let result =
            handle_arhelp(&registry, &renderer, "ban", &create_test_persona(), &ticket).await;

        assert_eq!(result.response, "Command help for `ban` sent to the user.");
        assert_eq!(result.outcome, RelayOutcome::Sent);
    }

    #[tokio::test]
    async fn test_handle_arhelp_delivery_failure() {
        let registry = create_test_registry();
        let renderer = HelpRenderer::new("?", 1, 1024);
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .times(1)
            .returning(|_| {
                Err(DeliveryError::RecipientUnreachable(
                    "direct messages closed".to_string(),
                ))
            });

        let result =
            handle_arhelp(&registry, &renderer, "ban", &create_test_persona(), &ticket).await;

        assert_eq!(
            result.response,
            "The command help could not get sent to the user."
        );
        assert_eq!(
            result.outcome,
            RelayOutcome::Failed(DeliveryError::RecipientUnreachable(
                "direct messages closed".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_has_same_reply() {
        let registry = create_test_registry();
        let renderer = HelpRenderer::new("?", 1, 1024);
        let mut ticket = MockTicket::new();
        ticket
            .expect_send_to_recipient()
            .times(1)
            .returning(|_| Err(DeliveryError::Transport("timeout".to_string())));

        let result = handle_rhelp(&registry, &renderer, "ban", &create_test_author(), &ticket).await;

        assert_eq!(
            result.response,
            "The command help could not get sent to the user."
        );
        assert!(matches!(
            result.outcome,
            RelayOutcome::Failed(DeliveryError::Transport(_))
        ));
    }
}
