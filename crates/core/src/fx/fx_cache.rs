//! Value-plus-timestamp cache for slow-changing reference values.

use chrono::{DateTime, Duration, Utc};

/// A single cached value with its fetch time and a time-to-live.
///
/// Owned by whoever performs the lookup and injected as a dependency;
/// never process-global.
#[derive(Debug, Clone)]
pub struct TimeBoxedCache<T> {
    ttl: Duration,
    entry: Option<(T, DateTime<Utc>)>,
}

impl<T: Clone> TimeBoxedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached value, when present and younger than the TTL.
    pub fn get(&self, now: DateTime<Utc>) -> Option<T> {
        self.entry.as_ref().and_then(|(value, fetched_at)| {
            if now - *fetched_at < self.ttl {
                Some(value.clone())
            } else {
                None
            }
        })
    }

    /// Replaces the cached value.
    pub fn put(&mut self, value: T, now: DateTime<Utc>) {
        self.entry = Some((value, now));
    }

    /// Drops the cached value.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
