//! Cached, de-duplicated, retrying contribution fetches.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use octograph_core::{
    AppConfig, CacheDuration, CalendarError, CalendarSpan, ContributionCalendar, TimeRange,
};

use crate::cache::{CacheKey, ContributionCache, Plan, SharedFetch};
use crate::client::GitHubClient;
use crate::error::FetchError;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Observable state of one contribution query.
#[derive(Debug, Clone)]
pub enum QueryState {
    /// Query disabled or no username given; nothing was requested.
    Idle,
    /// A request is running and no data is available yet.
    Loading,
    Success {
        data: Arc<ContributionCalendar>,
        /// Served from cache past its freshness window while a refresh runs.
        stale: bool,
    },
    Error(FetchError),
}

impl QueryState {
    /// Wraps caller-supplied data. No request is made and no cache is touched.
    #[must_use]
    pub fn supplied(data: ContributionCalendar) -> Self {
        Self::Success {
            data: Arc::new(data),
            stale: false,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn data(&self) -> Option<&ContributionCalendar> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Parameters of a contribution query.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    username: String,
    range: TimeRange,
    cache_duration: Duration,
    enabled: bool,
}

impl FetchRequest {
    /// Builds an enabled request with the default ten-minute cache duration.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] if `span` names an
    /// unrepresentable year.
    pub fn new(
        username: impl Into<String>,
        span: impl Into<CalendarSpan>,
    ) -> Result<Self, CalendarError> {
        let range = span.into().resolve()?;
        Ok(Self {
            username: username.into().trim().to_owned(),
            range,
            cache_duration: CacheDuration::default().to_duration()?,
            enabled: true,
        })
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDurationFormat`] for unparseable text.
    pub fn with_cache_duration(
        mut self,
        duration: impl Into<CacheDuration>,
    ) -> Result<Self, CalendarError> {
        self.cache_duration = duration.into().to_duration()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    #[must_use]
    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    /// Disabled requests and blank usernames never reach the network.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.username.is_empty()
    }

    #[must_use]
    pub fn key(&self) -> CacheKey {
        CacheKey::new(&self.username, &self.range)
    }
}

/// Fetches contribution calendars through a shared cache.
///
/// Identical concurrent requests share one network call. Each network call is
/// retried on transient failures and runs on its own task, so it completes
/// and fills the cache even if every caller stops waiting.
#[derive(Debug, Clone)]
pub struct ContributionFetcher {
    client: Arc<GitHubClient>,
    cache: Arc<ContributionCache>,
    retry: RetryPolicy,
}

impl ContributionFetcher {
    #[must_use]
    pub fn new(client: GitHubClient, cache: Arc<ContributionCache>) -> Self {
        Self {
            client: Arc::new(client),
            cache,
            retry: RetryPolicy::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`FetchError::MissingCredential`] if no token is configured.
    pub fn from_config(
        config: &AppConfig,
        cache: Arc<ContributionCache>,
    ) -> Result<Self, FetchError> {
        let client = GitHubClient::from_config(config)?;
        Ok(Self::new(client, cache)
            .with_retry_policy(RetryPolicy::new(config.max_retries, config.retry_backoff_base_ms)))
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ContributionCache> {
        &self.cache
    }

    /// Resolves the query: cached data when fresh, stale data plus a
    /// background refresh when stale, otherwise the result of a (possibly
    /// shared) network request. Never returns [`QueryState::Loading`].
    pub async fn fetch_contributions(&self, request: &FetchRequest) -> QueryState {
        self.resolve(request, false).await
    }

    /// Like [`ContributionFetcher::fetch_contributions`] but ignores cached
    /// freshness. Still joins a request that is already running.
    pub async fn refetch(&self, request: &FetchRequest) -> QueryState {
        self.resolve(request, true).await
    }

    /// Current state without waiting or starting a request.
    #[must_use]
    pub fn peek(&self, request: &FetchRequest) -> QueryState {
        if !request.is_active() {
            return QueryState::Idle;
        }
        let snap = self.cache.snapshot(&request.key(), request.cache_duration);
        match (snap.data, snap.pending, snap.last_error) {
            (Some(data), _, _) => QueryState::Success {
                data,
                stale: snap.stale,
            },
            (None, true, _) => QueryState::Loading,
            (None, false, Some(err)) => QueryState::Error(err),
            (None, false, None) => QueryState::Idle,
        }
    }

    async fn resolve(&self, request: &FetchRequest, force: bool) -> QueryState {
        if !request.is_active() {
            return QueryState::Idle;
        }
        let key = request.key();
        let plan = self.cache.plan(&key, request.cache_duration, force, || {
            self.spawn_fetch(key.clone(), request.username().to_owned(), *request.range())
        });

        match plan {
            Plan::Fresh(data) => {
                tracing::debug!(username = %key.username, "contribution cache hit");
                QueryState::Success { data, stale: false }
            }
            Plan::Stale(data) => QueryState::Success { data, stale: true },
            Plan::Wait(fetch) => match fetch.await {
                Ok(data) => QueryState::Success { data, stale: false },
                Err(err) => QueryState::Error(err),
            },
        }
    }

    fn spawn_fetch(&self, key: CacheKey, username: String, range: TimeRange) -> SharedFetch {
        let client = Arc::clone(&self.client);
        let cache = Arc::clone(&self.cache);
        let retry = self.retry.clone();
        let task_key = key.clone();

        tracing::info!(
            username = %key.username,
            from = %key.from,
            to = %key.to,
            "fetching contribution calendar"
        );

        let handle = tokio::spawn(async move {
            let result = retry_with_backoff(&retry, || {
                client.fetch_calendar(&username, &range)
            })
            .await
            .map(Arc::new);
            cache.complete(&task_key, &result);
            result
        });

        let cache = Arc::clone(&self.cache);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_err) => {
                    let err = FetchError::TaskAborted(join_err.to_string());
                    cache.complete(&key, &Err(err.clone()));
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
