//! Process-wide contribution cache with in-flight request sharing.
//!
//! Each key holds at most one cached calendar, at most one running request,
//! and the last error seen for that key. An entry is fresh for the request's
//! cache duration, served stale while a background refresh runs until twice
//! that duration, and dropped after. Errors expire on the same schedule, and
//! a key with no data, no error and no running request is removed from the
//! map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use futures::future::{BoxFuture, Shared};
use octograph_core::{ContributionCalendar, TimeRange};

use crate::error::FetchError;

pub(crate) type SharedFetch =
    Shared<BoxFuture<'static, Result<Arc<ContributionCalendar>, FetchError>>>;

/// Identity of a cached calendar. Usernames are compared case-insensitively,
/// as GitHub logins are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub username: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl CacheKey {
    #[must_use]
    pub fn new(username: &str, range: &TimeRange) -> Self {
        Self {
            username: username.trim().to_lowercase(),
            from: range.start(),
            to: range.end(),
        }
    }
}

struct CachedEntry {
    data: Arc<ContributionCalendar>,
    fetched_at: Instant,
}

struct FailedFetch {
    error: FetchError,
    failed_at: Instant,
}

#[derive(Default)]
struct Slot {
    entry: Option<CachedEntry>,
    in_flight: Option<SharedFetch>,
    last_error: Option<FailedFetch>,
    /// Cache duration of the latest request for this key. Unset for slots
    /// only ever primed, which then expire once a request touches them.
    fresh_for: Option<Duration>,
}

impl Slot {
    fn evict_expired(&mut self, now: Instant) {
        let Some(fresh_for) = self.fresh_for else {
            return;
        };
        let keep_for = fresh_for.saturating_mul(2);
        let expired = |at: Instant| now.duration_since(at) >= keep_for;

        if self.entry.as_ref().is_some_and(|e| expired(e.fetched_at)) {
            self.entry = None;
        }
        if self
            .last_error
            .as_ref()
            .is_some_and(|f| expired(f.failed_at))
        {
            self.last_error = None;
        }
    }

    fn is_vacant(&self) -> bool {
        self.entry.is_none() && self.last_error.is_none() && self.pending().is_none()
    }

    /// A resolved shared future is finished work, not a pending request.
    fn pending(&self) -> Option<SharedFetch> {
        self.in_flight
            .as_ref()
            .filter(|f| f.peek().is_none())
            .cloned()
    }
}

/// What a caller should do after consulting the cache.
pub(crate) enum Plan {
    Fresh(Arc<ContributionCalendar>),
    /// Stale data returned now; a refresh has been started or is running.
    Stale(Arc<ContributionCalendar>),
    Wait(SharedFetch),
}

/// Non-blocking view of one key.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub data: Option<Arc<ContributionCalendar>>,
    pub stale: bool,
    pub pending: bool,
    pub last_error: Option<FetchError>,
}

#[derive(Default)]
pub struct ContributionCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl std::fmt::Debug for ContributionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributionCache")
            .field("keys", &self.lock().len())
            .finish()
    }
}

impl ContributionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a slot half-written, so the
    // poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Slot>> {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Decides between cached data and a network request under one lock, so
    /// concurrent callers for the same key start at most one request.
    ///
    /// `start` is called only when a new request is needed, and must not block.
    pub(crate) fn plan<F>(
        &self,
        key: &CacheKey,
        fresh_for: Duration,
        force: bool,
        start: F,
    ) -> Plan
    where
        F: FnOnce() -> SharedFetch,
    {
        let mut slots = self.lock();
        let now = Instant::now();
        slots.entry(key.clone()).or_default().fresh_for = Some(fresh_for);
        sweep(&mut slots, now);

        let slot = slots.entry(key.clone()).or_default();
        slot.fresh_for = Some(fresh_for);
        let pending = slot.pending();

        let cached = slot
            .entry
            .as_ref()
            .map(|e| (Arc::clone(&e.data), now.duration_since(e.fetched_at)));

        match cached {
            Some((data, age)) if !force && age < fresh_for => Plan::Fresh(data),
            Some((data, _)) if !force => {
                if pending.is_none() {
                    tracing::debug!(
                        username = %key.username,
                        "serving stale calendar, refreshing in background"
                    );
                    slot.in_flight = Some(start());
                }
                Plan::Stale(data)
            }
            _ => Plan::Wait(pending.unwrap_or_else(|| {
                let fetch = start();
                slot.in_flight = Some(fetch.clone());
                fetch
            })),
        }
    }

    /// Records the outcome of a finished request. Success replaces the entry
    /// wholesale; failure keeps any previous entry and remembers the error.
    pub(crate) fn complete(
        &self,
        key: &CacheKey,
        result: &Result<Arc<ContributionCalendar>, FetchError>,
    ) {
        let mut slots = self.lock();
        let slot = slots.entry(key.clone()).or_default();
        slot.in_flight = None;
        match result {
            Ok(data) => {
                slot.entry = Some(CachedEntry {
                    data: Arc::clone(data),
                    fetched_at: Instant::now(),
                });
                slot.last_error = None;
            }
            Err(err) => {
                tracing::warn!(
                    username = %key.username,
                    error = %err,
                    "contribution fetch failed"
                );
                slot.last_error = Some(FailedFetch {
                    error: err.clone(),
                    failed_at: Instant::now(),
                });
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self, key: &CacheKey, fresh_for: Duration) -> CacheSnapshot {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(key) else {
            return CacheSnapshot::default();
        };
        let now = Instant::now();
        slot.fresh_for = Some(fresh_for);
        slot.evict_expired(now);

        let snapshot = CacheSnapshot {
            stale: slot
                .entry
                .as_ref()
                .is_some_and(|e| now.duration_since(e.fetched_at) >= fresh_for),
            data: slot.entry.as_ref().map(|e| Arc::clone(&e.data)),
            pending: slot.pending().is_some(),
            last_error: slot.last_error.as_ref().map(|f| f.error.clone()),
        };
        if slot.is_vacant() {
            slots.remove(key);
        }
        snapshot
    }

    /// Stores prefetched data as if it had just been fetched.
    pub fn prime(&self, key: CacheKey, data: ContributionCalendar) {
        self.complete(&key, &Ok(Arc::new(data)));
    }

    /// Drops the cached entry and error for `key`. A running request is left
    /// to finish and will repopulate the entry.
    pub fn invalidate(&self, key: &CacheKey) {
        let mut slots = self.lock();
        if let Some(slot) = slots.get_mut(key) {
            slot.entry = None;
            slot.last_error = None;
            if slot.is_vacant() {
                slots.remove(key);
            }
        }
    }

    /// Number of keys holding cached data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().filter(|s| s.entry.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &CacheKey, age: Duration) {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(key) else {
            return;
        };
        let then = Instant::now()
            .checked_sub(age)
            .expect("test clock should allow backdating");
        if let Some(entry) = slot.entry.as_mut() {
            entry.fetched_at = then;
        }
        if let Some(failed) = slot.last_error.as_mut() {
            failed.failed_at = then;
        }
    }
}

/// Expires stale data and errors across all keys and drops vacant slots.
fn sweep(slots: &mut HashMap<CacheKey, Slot>, now: Instant) {
    slots.retain(|_, slot| {
        slot.evict_expired(now);
        !slot.is_vacant()
    });
}
