//! Arena-backed command registry.
//!
//! Commands are declared as a tree of [`CommandSpec`]s (usually from the
//! configuration file) and flattened into a [`Registry`] arena. Each node
//! keeps a non-owning [`CommandId`] back-reference to its parent, so the
//! ancestry of any command can be walked without shared ownership.

use std::{collections::HashMap, fmt};

use log::debug;
use serde::Deserialize;

use crate::registry::{CommandRegistry, PermissionLevel};

/// Declaration of a host command.
///
/// A command declared with a `subcommands` list, even an empty one, is a
/// group command.
///
/// # YAML
///
/// ```yaml
/// name: config
/// signature: "[key]"
/// help: "Change the bot configuration."
/// permission_level: ADMINISTRATOR
/// invoke_without_command: true
/// subcommands:
///   - name: set
///     aliases: [add]
///     signature: "<key> <value>"
///     help: "Set a configuration value."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandSpec {
    /// Primary name of the command
    pub name: String,
    /// Alternative names
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Argument signature, e.g. `<user> [reason]`
    #[serde(default)]
    pub signature: String,
    /// Long help text
    #[serde(default)]
    pub help: Option<String>,
    /// Short description, defaults to the first line of `help`
    #[serde(default)]
    pub brief: Option<String>,
    /// Hidden commands are never listed as subcommands
    #[serde(default)]
    pub hidden: bool,
    /// Whether a group can run without one of its subcommands
    #[serde(default)]
    pub invoke_without_command: bool,
    /// Level required to run the command
    #[serde(default)]
    pub permission_level: Option<PermissionLevel>,
    /// Children of a group command
    #[serde(default)]
    pub subcommands: Option<Vec<CommandSpec>>,
}

/// Index of a command inside a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(usize);

struct CommandNode {
    name: String,
    aliases: Vec<String>,
    signature: String,
    help: Option<String>,
    brief: Option<String>,
    hidden: bool,
    invoke_without_command: bool,
    permission_level: Option<PermissionLevel>,
    group: bool,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

impl CommandNode {
    fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.iter().any(|alias| alias == word)
    }
}

/// Registry of every command known to the host.
///
/// Root commands and the children of each group keep their declaration
/// order.
pub struct Registry {
    /// Every command, parents always before their children
    nodes: Vec<CommandNode>,
    /// Top level commands
    roots: Vec<CommandId>,
    /// Permission levels overriding the declared ones, by qualified name
    overrides: HashMap<String, PermissionLevel>,
}

impl Registry {
    /// Builds a registry from command declarations.
    ///
    /// # Arguments
    ///
    /// * `specs` - Top level command declarations
    /// * `overrides` - Permission levels keyed by qualified name, taking
    ///   precedence over the levels declared on the commands
    pub fn new(specs: Vec<CommandSpec>, overrides: HashMap<String, PermissionLevel>) -> Self {
        let mut registry = Registry {
            nodes: Vec::new(),
            roots: Vec::new(),
            overrides,
        };

        for spec in specs {
            let id = registry.insert(spec, None);
            registry.roots.push(id);
        }

        debug!("registry built with {} commands", registry.nodes.len());

        registry
    }

    fn insert(&mut self, spec: CommandSpec, parent: Option<CommandId>) -> CommandId {
        let id = CommandId(self.nodes.len());
        self.nodes.push(CommandNode {
            name: spec.name,
            aliases: spec.aliases,
            signature: spec.signature,
            help: spec.help,
            brief: spec.brief,
            hidden: spec.hidden,
            invoke_without_command: spec.invoke_without_command,
            permission_level: spec.permission_level,
            group: spec.subcommands.is_some(),
            parent,
            children: Vec::new(),
        });

        for subcommand in spec.subcommands.into_iter().flatten() {
            let child = self.insert(subcommand, Some(id));
            self.nodes[id.0].children.push(child);
        }

        id
    }

    /// Returns a view over the command with the given id.
    pub fn command(&self, id: CommandId) -> CommandRef<'_> {
        CommandRef { registry: self, id }
    }

    /// Number of registered commands, subcommands included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: CommandId) -> &CommandNode {
        &self.nodes[id.0]
    }

    /// Finds among `candidates` the command named `word`, falling back to
    /// the first one having `word` as an alias.
    fn find(&self, candidates: &[CommandId], word: &str) -> Option<CommandId> {
        candidates
            .iter()
            .find(|id| self.node(**id).name == word)
            .or_else(|| candidates.iter().find(|id| self.node(**id).matches(word)))
            .copied()
    }
}

impl CommandRegistry for Registry {
    fn get_command(&self, name: &str) -> Option<CommandRef<'_>> {
        let mut words = name.split_whitespace();
        let mut id = self.find(&self.roots, words.next()?)?;

        for word in words {
            // Only groups can be walked into
            let node = self.node(id);
            if !node.group {
                return None;
            }
            id = self.find(&node.children, word)?;
        }

        Some(self.command(id))
    }

    fn command_permission(&self, qualified_name: &str) -> PermissionLevel {
        if let Some(level) = self.overrides.get(qualified_name) {
            return *level;
        }

        self.get_command(qualified_name)
            .and_then(|command| self.node(command.id).permission_level)
            .unwrap_or(PermissionLevel::Invalid)
    }
}

/// Borrowed view over a registered command.
#[derive(Clone, Copy)]
pub struct CommandRef<'a> {
    registry: &'a Registry,
    id: CommandId,
}

impl<'a> CommandRef<'a> {
    fn node(&self) -> &'a CommandNode {
        self.registry.node(self.id)
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn aliases(&self) -> &'a [String] {
        &self.node().aliases
    }

    /// Argument signature, empty when the command takes no argument.
    pub fn signature(&self) -> &'a str {
        &self.node().signature
    }

    pub fn help(&self) -> Option<&'a str> {
        self.node().help.as_deref()
    }

    /// One-line description: the brief if any, otherwise the first line of
    /// the help text, otherwise an empty string.
    pub fn short_doc(&self) -> &'a str {
        let node = self.node();
        if let Some(brief) = &node.brief {
            return brief;
        }
        match &node.help {
            Some(help) => help.lines().next().unwrap_or_default(),
            None => "",
        }
    }

    pub fn hidden(&self) -> bool {
        self.node().hidden
    }

    pub fn invoke_without_command(&self) -> bool {
        self.node().invoke_without_command
    }

    /// Whether the command is a group holding subcommands.
    pub fn is_group(&self) -> bool {
        self.node().group
    }

    /// Parent group, `None` for a top level command.
    pub fn parent(&self) -> Option<CommandRef<'a>> {
        self.node().parent.map(|id| self.registry.command(id))
    }

    /// Subcommands in declaration order, hidden ones included.
    pub fn subcommands(&self) -> Vec<CommandRef<'a>> {
        self.node()
            .children
            .iter()
            .map(|id| self.registry.command(*id))
            .collect()
    }

    /// Full path of the command, ancestors first, separated by spaces.
    pub fn qualified_name(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{} {}", parent.qualified_name(), self.name()),
            None => self.name().to_owned(),
        }
    }
}

impl fmt::Debug for CommandRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRef")
            .field("id", &self.id)
            .field("qualified_name", &self.qualified_name())
            .finish()
    }
}

#[cfg(test)]
impl CommandSpec {
    pub fn new(name: &str) -> Self {
        CommandSpec {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = signature.to_owned();
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_owned());
        self
    }

    pub fn brief(mut self, brief: &str) -> Self {
        self.brief = Some(brief.to_owned());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn invoke_without_command(mut self) -> Self {
        self.invoke_without_command = true;
        self
    }

    pub fn permission(mut self, level: PermissionLevel) -> Self {
        self.permission_level = Some(level);
        self
    }

    pub fn subcommands(mut self, subcommands: Vec<CommandSpec>) -> Self {
        self.subcommands = Some(subcommands);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registry() -> Registry {
        let specs = vec![
            CommandSpec::new("ban")
                .signature("<user> [reason]")
                .help("Ban a user.\nThe user cannot join again.")
                .permission(PermissionLevel::Moderator),
            CommandSpec::new("config")
                .aliases(&["cfg"])
                .invoke_without_command()
                .permission(PermissionLevel::Administrator)
                .subcommands(vec![
                    CommandSpec::new("set")
                        .aliases(&["add"])
                        .signature("<key> <value>")
                        .brief("Set a value"),
                    CommandSpec::new("get").signature("<key>").hidden(),
                ]),
            CommandSpec::new("ping"),
        ];
        let mut overrides = HashMap::new();
        overrides.insert("config set".to_string(), PermissionLevel::Owner);
        Registry::new(specs, overrides)
    }

    #[test]
    fn test_registry_len() {
        let registry = create_test_registry();
        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
        assert!(Registry::new(vec![], HashMap::new()).is_empty());
    }

    #[test]
    fn test_get_command_by_name_and_alias() {
        let registry = create_test_registry();

        assert_eq!(registry.get_command("ban").unwrap().name(), "ban");
        assert_eq!(registry.get_command("cfg").unwrap().name(), "config");
        assert!(registry.get_command("unknown").is_none());
        assert!(registry.get_command("").is_none());
    }

    #[test]
    fn test_get_command_walks_subcommands() {
        let registry = create_test_registry();

        let set = registry.get_command("config set").unwrap();
        assert_eq!(set.qualified_name(), "config set");

        let set_by_alias = registry.get_command("cfg   add").unwrap();
        assert_eq!(set_by_alias.qualified_name(), set.qualified_name());

        // Hidden commands can still be resolved
        assert_eq!(registry.get_command("config get").unwrap().name(), "get");
    }

    #[test]
    fn test_get_command_rejects_invalid_paths() {
        let registry = create_test_registry();

        assert!(registry.get_command("config unknown").is_none());
        // ban is not a group
        assert!(registry.get_command("ban set").is_none());
        assert!(registry.get_command("set").is_none());
    }

    #[test]
    fn test_command_ref_accessors() {
        let registry = create_test_registry();

        let config = registry.get_command("config").unwrap();
        assert!(config.is_group());
        assert!(config.invoke_without_command());
        assert!(config.parent().is_none());
        assert_eq!(config.aliases(), &["cfg".to_string()]);

        let names: Vec<&str> = config.subcommands().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["set", "get"]);

        let set = registry.get_command("config set").unwrap();
        assert!(!set.is_group());
        assert_eq!(set.parent().unwrap().qualified_name(), config.qualified_name());
        assert_eq!(set.signature(), "<key> <value>");
    }

    #[test]
    fn test_short_doc() {
        let registry = create_test_registry();

        assert_eq!(registry.get_command("ban").unwrap().short_doc(), "Ban a user.");
        assert_eq!(
            registry.get_command("config set").unwrap().short_doc(),
            "Set a value"
        );
        assert_eq!(registry.get_command("ping").unwrap().short_doc(), "");
        assert!(registry.get_command("ping").unwrap().help().is_none());
    }

    #[test]
    fn test_command_permission() {
        let registry = create_test_registry();

        assert_eq!(
            registry.command_permission("ban"),
            PermissionLevel::Moderator
        );
        // Override wins over the declaration
        assert_eq!(
            registry.command_permission("config set"),
            PermissionLevel::Owner
        );
        // Nothing declared
        assert_eq!(
            registry.command_permission("config get"),
            PermissionLevel::Invalid
        );
        assert_eq!(
            registry.command_permission("unknown"),
            PermissionLevel::Invalid
        );
    }

    #[test]
    fn test_empty_group_is_still_a_group() {
        let registry = Registry::new(
            vec![CommandSpec::new("tags").subcommands(vec![])],
            HashMap::new(),
        );

        let tags = registry.get_command("tags").unwrap();
        assert!(tags.is_group());
        assert!(tags.subcommands().is_empty());
    }

    #[test]
    fn test_deserialize_spec_from_yaml_shape() {
        let spec: CommandSpec = serde_json::from_str(
            r#"{
                "name": "config",
                "permission_level": "ADMIN",
                "subcommands": [{ "name": "set", "aliases": ["add"] }]
            }"#,
        )
        .unwrap();

        assert_eq!(spec.permission_level, Some(PermissionLevel::Administrator));
        assert_eq!(spec.subcommands.as_ref().unwrap()[0].aliases, vec!["add"]);
        assert!(!spec.hidden);
        assert_eq!(spec.signature, "");
    }
}
