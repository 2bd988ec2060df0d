//! Slack integration: slash-command payloads, response JSON, and the Web
//! API client used to validate challenged users.

mod client;
mod types;

pub use client::{MembershipError, MembershipResolver, SlackClient};
pub use types::{user_display, Attachment, ResponseType, SlackResponse, SlashRequest};
