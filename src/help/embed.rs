//! Help display value sent to ticket recipients.
//!
//! [`HelpEmbed`] serializes to the embed object accepted by Discord-like
//! chat backends, and can be rendered as Markdown for transports that only
//! carry text.

use serde::Serialize;

/// A titled field of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Identity stamped on the embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Help of a single command, built fresh for each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEmbed {
    /// Command signature
    pub title: String,
    /// Command help text
    pub description: String,
    /// Accent color as `0xRRGGBB`
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
}

impl HelpEmbed {
    pub fn new(title: &str, description: &str, color: u32) -> Self {
        HelpEmbed {
            title: title.to_owned(),
            description: description.to_owned(),
            color,
            fields: Vec::new(),
            footer: None,
            author: None,
        }
    }

    pub fn add_field(&mut self, name: &str, value: &str, inline: bool) {
        self.fields.push(EmbedField {
            name: name.to_owned(),
            value: value.to_owned(),
            inline,
        });
    }

    pub fn set_footer(&mut self, text: &str) {
        self.footer = Some(EmbedFooter {
            text: text.to_owned(),
        });
    }

    /// Stamps the embed with the identity it is sent on behalf of.
    pub fn set_author(&mut self, name: &str, icon_url: Option<&str>) {
        self.author = Some(EmbedAuthor {
            name: name.to_owned(),
            icon_url: icon_url.map(str::to_owned),
        });
    }

    /// Renders the embed as Markdown.
    ///
    /// ```text
    /// > From **Alice**
    ///
    /// **?ban <user> [reason]**
    ///
    /// Ban a user.
    ///
    /// **Permission Level**
    /// MODERATOR [3]
    ///
    /// *Permission level: MODERATOR [3]*
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut sections = Vec::new();

        if let Some(author) = &self.author {
            sections.push(format!("> From **{}**", author.name));
        }
        sections.push(format!("**{}**", self.title));
        sections.push(self.description.clone());
        for field in &self.fields {
            sections.push(format!("**{}**\n{}", field.name, field.value.trim_end()));
        }
        if let Some(footer) = &self.footer {
            sections.push(format!("*{}*", footer.text));
        }

        sections.join("\n\n")
    }
}
