//! HTTP client for the GitHub GraphQL contribution calendar.
//!
//! Sends a single parameterized query per call, maps HTTP and GraphQL
//! failures onto [`FetchError`], and validates the body against the typed
//! calendar schema before returning it. Retries live one layer up in the
//! fetcher.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, SecondsFormat, TimeDelta, Utc};
use octograph_core::{AppConfig, ContributionCalendar, TimeRange, DEFAULT_API_URL};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::FetchError;

const CONTRIBUTIONS_QUERY: &str = "query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          firstDay
          contributionDays {
            contributionCount
            date
            color
            contributionLevel
          }
        }
      }
    }
  }
}";

/// UTC instants bounding a contribution query: start of the first day through
/// the last second of the final day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl FetchWindow {
    #[must_use]
    pub fn for_range(range: &TimeRange) -> Self {
        let from = range.start().and_time(NaiveTime::MIN).and_utc();
        let to = (range.end().and_time(NaiveTime::MIN) + TimeDelta::seconds(86_399)).and_utc();
        Self { from, to }
    }
}

#[derive(Deserialize)]
struct GraphQlEnvelope {
    data: ResponseData,
}

#[derive(Deserialize)]
struct ResponseData {
    user: UserNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: CollectionNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    contribution_calendar: ContributionCalendar,
}

/// Client for the GitHub GraphQL API.
///
/// Use [`GitHubClient::from_config`] in production or
/// [`GitHubClient::with_endpoint`] to point at a mock server in tests.
pub struct GitHubClient {
    client: Client,
    token: String,
    endpoint: Url,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("token", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Builds a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingCredential`] if no token is configured,
    /// before any network activity.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let token = config
            .github_token
            .as_deref()
            .ok_or(FetchError::MissingCredential)?;
        Self::with_endpoint(
            token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_url,
        )
    }

    /// Creates a client pointed at the public GitHub GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::with_endpoint`].
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        Self::with_endpoint(token, timeout_secs, user_agent, DEFAULT_API_URL)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// - [`FetchError::MissingCredential`] if `token` is blank.
    /// - [`FetchError::InvalidUrl`] if `endpoint` does not parse.
    /// - [`FetchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_endpoint(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        endpoint: &str,
    ) -> Result<Self, FetchError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| FetchError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the contribution calendar for `username` over `range`.
    ///
    /// One request, no retries.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Authentication`] on HTTP 401.
    /// - [`FetchError::RateLimited`] on HTTP 429.
    /// - [`FetchError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`FetchError::GraphQl`] if the body carries GraphQL `errors`.
    /// - [`FetchError::SchemaValidation`] if the body is not a calendar.
    /// - [`FetchError::Http`] on network failure or timeout.
    pub async fn fetch_calendar(
        &self,
        username: &str,
        range: &TimeRange,
    ) -> Result<ContributionCalendar, FetchError> {
        let window = FetchWindow::for_range(range);
        let context = format!(
            "contributions(login={username}, from={}, to={})",
            range.start(),
            range.end()
        );
        let body = self
            .request_json(&build_query_body(username, &window), &context)
            .await?;
        check_graphql_errors(&body)?;

        let envelope: GraphQlEnvelope =
            serde_json::from_value(body).map_err(|e| FetchError::SchemaValidation {
                context,
                source: Arc::new(e),
            })?;

        Ok(envelope.data.user.contributions_collection.contribution_calendar)
    }

    async fn request_json(&self, payload: &Value, context: &str) -> Result<Value, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, %context, "sending GitHub GraphQL request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Authentication);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::SchemaValidation {
            context: context.to_owned(),
            source: Arc::new(e),
        })
    }
}

fn build_query_body(username: &str, window: &FetchWindow) -> Value {
    json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": {
            "login": username,
            "from": window.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            "to": window.to.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    })
}

/// GitHub reports unknown users and bad arguments with HTTP 200 plus an
/// `errors` array.
fn check_graphql_errors(body: &Value) -> Result<(), FetchError> {
    let Some(errors) = body
        .get("errors")
        .and_then(Value::as_array)
        .filter(|e| !e.is_empty())
    else {
        return Ok(());
    };

    let message = errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(FetchError::GraphQl(message))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
