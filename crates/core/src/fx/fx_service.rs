//! Exchange-index service: a source behind a time-boxed cache.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::fx_cache::TimeBoxedCache;
use super::fx_traits::ExchangeIndexSource;
use crate::errors::{Error, Result};

use async_trait::async_trait;

use balanza_open_data::trm::TrmClient;

/// Default cache lifetime; the index is published once per business day.
const DEFAULT_TTL_MINUTES: i64 = 60;

/// Serves the exchange index, refreshing through the source only when
/// the cached value has aged out.
pub struct ExchangeIndexService {
    source: Arc<dyn ExchangeIndexSource>,
    cache: Mutex<TimeBoxedCache<Decimal>>,
}

impl ExchangeIndexService {
    pub fn new(source: Arc<dyn ExchangeIndexSource>) -> Self {
        Self::with_ttl(source, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    pub fn with_ttl(source: Arc<dyn ExchangeIndexSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: Mutex::new(TimeBoxedCache::new(ttl)),
        }
    }

    /// The current index, from cache when fresh.
    pub async fn get_index(&self) -> Result<Decimal> {
        let now = Utc::now();
        let mut cache = self.cache.lock().await;
        if let Some(value) = cache.get(now) {
            return Ok(value);
        }

        let value = self.source.current_index().await?;
        cache.put(value, now);
        Ok(value)
    }
}

/// Portal-backed index source.
pub struct PortalExchangeIndexSource {
    client: TrmClient,
}

impl PortalExchangeIndexSource {
    pub fn new(client: TrmClient) -> Self {
        Self { client }
    }
}

impl Default for PortalExchangeIndexSource {
    fn default() -> Self {
        Self::new(TrmClient::new())
    }
}

#[async_trait]
impl ExchangeIndexSource for PortalExchangeIndexSource {
    async fn current_index(&self) -> Result<Decimal> {
        let index = self
            .client
            .latest()
            .await
            .map_err(|e| Error::ExchangeIndex(e.to_string()))?;
        Ok(index.value)
    }
}
