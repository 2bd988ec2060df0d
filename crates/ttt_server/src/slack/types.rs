//! Slash-command request and response payloads.

use serde::{Deserialize, Serialize};

use crate::game::PlayerRef;

/// Form body Slack posts for a slash command invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashRequest {
    /// Slack team id.
    pub team_id: String,
    /// Channel the command ran in.
    pub channel_id: String,
    /// Human-readable channel name.
    pub channel_name: String,
    /// Id of the invoking user.
    pub user_id: String,
    /// Name of the invoking user.
    pub user_name: String,
    /// The slash command itself, e.g. `/ttt`.
    pub command: String,
    /// Everything typed after the command word.
    pub text: String,
    /// Opaque verification token.
    pub token: String,
}

/// Visibility of a response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Visible to the whole channel.
    InChannel,
    /// Visible only to the invoking user.
    Ephemeral,
}

/// A message attachment in Slack's classic attachment format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Optional attachment title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Attachment body, mrkdwn formatted.
    pub text: String,
    /// Sidebar color hex code.
    pub color: String,
    /// Fields rendered as mrkdwn.
    pub mrkdwn_in: Vec<String>,
}

impl Attachment {
    /// Creates an attachment with mrkdwn enabled for the text body.
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
            color: color.into(),
            mrkdwn_in: vec!["text".to_string()],
        }
    }

    /// Adds a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// JSON body returned to Slack in answer to a slash command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackResponse {
    /// Primary message text.
    pub text: String,
    /// Message visibility, `in_channel` unless narrowed.
    pub response_type: ResponseType,
    /// Attachments, omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<Attachment>,
}

impl SlackResponse {
    /// Creates a channel-visible response.
    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_type: ResponseType::InChannel,
            attachments: Vec::new(),
        }
    }

    /// Creates a response visible only to the invoking user.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_type: ResponseType::Ephemeral,
            attachments: Vec::new(),
        }
    }

    /// Appends an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Formats a player as a linked Slack mention, `<@id|name>`.
pub fn user_display(player: &PlayerRef) -> String {
    format!("<@{}|{}>", player.id(), player.name())
}
