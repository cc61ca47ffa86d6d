//! GitHub contribution calendar client with caching, request sharing and
//! retry.

pub mod cache;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod retry;

pub use cache::{CacheKey, CacheSnapshot, ContributionCache};
pub use client::{FetchWindow, GitHubClient};
pub use error::FetchError;
pub use fetcher::{ContributionFetcher, FetchRequest, QueryState};
pub use retry::RetryPolicy;
