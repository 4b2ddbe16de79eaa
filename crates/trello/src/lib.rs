//! Trello REST adapter.
//!
//! Implements [`board::CardMembership`] with two calls against the Trello API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | add member | `POST /1/cards/{card}/idMembers?value={member}` |
//! | remove member | `DELETE /1/cards/{card}/idMembers/{member}` |
//!
//! Both authenticate with the `key` and `token` query parameters.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, authentication, and mapping HTTP
//! outcomes onto [`board::MembershipError`] live here. No retries are made;
//! a failed call is reported once and the caller decides what to do with it.

use std::time::Duration;

use async_trait::async_trait;
use board::{CardId, CardMembership, MemberId, MembershipError};
use reqwest::{Method, Url};
use thiserror::Error;
use tracing::{debug, instrument};

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com";

/// API key and token pair.
///
/// `Debug` redacts both values so credentials never reach a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    token: String,
}

impl Credentials {
    /// Creates a credential pair, returning `None` if either value is empty.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let token = token.into();
        if key.is_empty() || token.is_empty() {
            None
        } else {
            Some(Self { key, token })
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("key", &"***").field("token", &"***").finish()
    }
}

/// Transport settings for [`TrelloClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Overall request timeout. `None` keeps the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: concat!("trello-callback/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The client could not be constructed.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The configured base URL is not an absolute http(s) URL.
    #[error("Invalid Trello base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client failed to initialise.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Trello API client.
///
/// Cheap to share behind an `Arc`; the inner [`reqwest::Client`] owns the
/// connection pool.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl TrelloClient {
    /// Creates a client for the given credentials and transport settings.
    ///
    /// # Errors
    ///
    /// [`ClientBuildError::InvalidBaseUrl`] if `config.base_url` cannot serve
    /// as a base for API paths, or [`ClientBuildError::Http`] if the HTTP
    /// client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self { http: builder.build()?, base_url, credentials })
    }

    /// The API origin requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/1/cards/{card}/idMembers[/{member}]` with each segment
    /// percent-encoded.
    fn card_members_url(&self, card: &CardId, member: Option<&MemberId>) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` guarantees the URL can be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["1", "cards", card.as_str(), "idMembers"]);
            if let Some(member) = member {
                segments.push(member.as_str());
            }
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        extra_query: &[(&str, &str)],
    ) -> Result<(), MembershipError> {
        let response = self
            .http
            .request(method, url)
            .query(extra_query)
            .query(&[("key", self.credentials.key.as_str()), ("token", self.credentials.token.as_str())])
            .send()
            .await
            // The request URL carries the token; keep it out of the error text.
            .map_err(|e| MembershipError::Transport { message: e.without_url().to_string() })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Trello accepted request");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MembershipError::Rejected { status: status.as_u16(), body })
    }
}

#[async_trait]
impl CardMembership for TrelloClient {
    #[instrument(name = "trello_add_member", skip_all, fields(card_id = %card, member_id = %member))]
    async fn add_member_to_card(
        &self,
        card: &CardId,
        member: &MemberId,
    ) -> Result<(), MembershipError> {
        let url = self.card_members_url(card, None);
        self.send(Method::POST, url, &[("value", member.as_str())]).await
    }

    #[instrument(
        name = "trello_remove_member",
        skip_all,
        fields(card_id = %card, member_id = %member)
    )]
    async fn remove_member_from_card(
        &self,
        card: &CardId,
        member: &MemberId,
    ) -> Result<(), MembershipError> {
        let url = self.card_members_url(card, Some(member));
        self.send(Method::DELETE, url, &[]).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    let invalid = |reason: String| ClientBuildError::InvalidBaseUrl { url: raw.to_string(), reason };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TrelloClient {
        TrelloClient::new(
            Credentials::new("key", "token").unwrap(),
            ClientConfig { base_url: base.to_string(), ..ClientConfig::default() },
        )
        .unwrap()
    }

    #[test]
    fn credentials_require_both_values() {
        assert!(Credentials::new("", "token").is_none());
        assert!(Credentials::new("key", "").is_none());
        assert!(Credentials::new("key", "token").is_some());
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let rendered = format!("{:?}", Credentials::new("secret-key", "secret-token").unwrap());
        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn add_url_targets_member_list() {
        let url = client("https://api.trello.com")
            .card_members_url(&CardId::new("card-1").unwrap(), None);
        assert_eq!(url.as_str(), "https://api.trello.com/1/cards/card-1/idMembers");
    }

    #[test]
    fn remove_url_targets_member_sub_resource() {
        let url = client("https://api.trello.com/").card_members_url(
            &CardId::new("card-1").unwrap(),
            Some(&MemberId::new("member-1").unwrap()),
        );
        assert_eq!(url.as_str(), "https://api.trello.com/1/cards/card-1/idMembers/member-1");
    }

    #[test]
    fn url_segments_are_percent_encoded() {
        let url = client("https://api.trello.com")
            .card_members_url(&CardId::new("a/b").unwrap(), None);
        assert_eq!(url.as_str(), "https://api.trello.com/1/cards/a%2Fb/idMembers");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let result = TrelloClient::new(
            Credentials::new("key", "token").unwrap(),
            ClientConfig { base_url: "ftp://api.trello.com".to_string(), ..ClientConfig::default() },
        );
        assert!(matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let result = TrelloClient::new(
            Credentials::new("key", "token").unwrap(),
            ClientConfig { base_url: "api.trello.com".to_string(), ..ClientConfig::default() },
        );
        assert!(matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. })));
    }
}
