//! Slack Web API client used for token auth and opponent validation.

use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Membership lookup error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Membership error: {} at {}:{}", message, file, line)]
pub struct MembershipError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl MembershipError {
    /// Creates a new membership error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for MembershipError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Slack API request failed: {}", err))
    }
}

/// Resolves a challenged user against the team and channel.
///
/// Invoked once per start command, before any game is created. An
/// unresolved name (unknown user, or a user outside the channel) is a
/// business outcome, not an error.
#[async_trait]
pub trait MembershipResolver: Send + Sync {
    /// Returns the user's id when the named user exists in the team and is
    /// a member of the given channel, `None` otherwise.
    async fn resolve_opponent(
        &self,
        name: &str,
        channel_id: &str,
    ) -> Result<Option<String>, MembershipError>;
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Member {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct ConversationMembersResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    members: Vec<String>,
}

/// Slack Web API client.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl SlackClient {
    /// Creates a client against the public Slack API.
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(api_token, "https://slack.com/api".to_string())
    }

    /// Creates a client against a custom endpoint, for tests.
    pub fn with_base_url(api_token: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token,
            base_url,
        }
    }

    /// Verifies the API token against `auth.test`. Run once at startup,
    /// before the server starts accepting commands.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when the call fails or Slack rejects the
    /// token.
    #[instrument(skip(self))]
    pub async fn auth_test(&self) -> Result<(), MembershipError> {
        let envelope: ApiEnvelope = self
            .http
            .post(format!("{}/auth.test", self.base_url))
            .bearer_auth(&self.api_token)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(MembershipError::new(format!(
                "auth.test rejected the token: {}",
                envelope.error.unwrap_or_else(|| "unknown".to_string())
            )));
        }
        info!("Authenticated by Slack");
        Ok(())
    }

    async fn user_id_by_name(&self, name: &str) -> Result<Option<String>, MembershipError> {
        let response: UsersListResponse = self
            .http
            .get(format!("{}/users.list", self.base_url))
            .bearer_auth(&self.api_token)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(MembershipError::new(format!(
                "users.list failed: {}",
                response.error.unwrap_or_else(|| "unknown".to_string())
            )));
        }

        Ok(response
            .members
            .into_iter()
            .find(|member| member.name == name)
            .map(|member| member.id))
    }

    async fn channel_members(&self, channel_id: &str) -> Result<Vec<String>, MembershipError> {
        let response: ConversationMembersResponse = self
            .http
            .get(format!("{}/conversations.members", self.base_url))
            .bearer_auth(&self.api_token)
            .query(&[("channel", channel_id)])
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(MembershipError::new(format!(
                "conversations.members failed: {}",
                response.error.unwrap_or_else(|| "unknown".to_string())
            )));
        }
        Ok(response.members)
    }
}

#[async_trait]
impl MembershipResolver for SlackClient {
    #[instrument(skip(self))]
    async fn resolve_opponent(
        &self,
        name: &str,
        channel_id: &str,
    ) -> Result<Option<String>, MembershipError> {
        let Some(user_id) = self.user_id_by_name(name).await? else {
            debug!(name, "User not found in team");
            return Ok(None);
        };

        let members = self.channel_members(channel_id).await?;
        if members.iter().any(|id| *id == user_id) {
            debug!(name, user_id, "Opponent resolved");
            Ok(Some(user_id))
        } else {
            warn!(name, channel_id, "User is not a member of the channel");
            Ok(None)
        }
    }
}
