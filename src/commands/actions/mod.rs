//! Command action handlers.
//!
//! Each handler receives the registry, the renderer and the ticket of the
//! command, relays the help and returns a
//! [`CommandResult`](crate::commands::CommandResult) with the reply for the
//! staff member.
//!
//! - [`handle_rhelp`] - Relay a help signed by the staff member
//! - [`handle_arhelp`] - Relay a help signed by the support agent persona

mod relay;

pub use crate::commands::actions::relay::{handle_arhelp, handle_rhelp};
