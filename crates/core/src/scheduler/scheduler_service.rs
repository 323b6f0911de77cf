//! The batch scheduler: a bounded worker pool driving the per-block
//! pipeline (external fetch → local fallback → resolve → compute) and a
//! lock-protected, deterministically sorted result accumulator.

use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use log::error;

use crate::balances::query_cache::SliceKey;
use crate::balances::{resolve_balances, BalanceMapping, BalanceStoreTrait, Period, StoreQueryCache};
use crate::constants::FALLBACK_WORKERS;
use crate::entities::{Entity, EntityClass};
use crate::errors::{Error, Result};
use crate::external::ExternalBalanceSource;
use crate::indicators::{ChartVariant, IndicatorCalculator, IndicatorResult};
use crate::scheduler::blocks_model::{EntityBalance, RequestBlock};

/// Drives batches of independent blocks across a bounded worker pool.
///
/// Holds one external source per population; each block routes to the
/// pipeline its entity class names. The only shared mutable state across
/// workers is the result accumulator (lock-protected) and the per-batch
/// query cache; both are scoped to one run.
pub struct BatchScheduler {
    solidaria: Arc<dyn ExternalBalanceSource>,
    financiera: Arc<dyn ExternalBalanceSource>,
    store: Arc<dyn BalanceStoreTrait>,
    workers: usize,
}

impl BatchScheduler {
    pub fn new(
        solidaria: Arc<dyn ExternalBalanceSource>,
        financiera: Arc<dyn ExternalBalanceSource>,
        store: Arc<dyn BalanceStoreTrait>,
    ) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKERS);
        Self {
            solidaria,
            financiera,
            store,
            workers,
        }
    }

    /// Overrides the worker-pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    fn source_for(&self, class: EntityClass) -> Arc<dyn ExternalBalanceSource> {
        match class {
            EntityClass::Solidaria => Arc::clone(&self.solidaria),
            EntityClass::Financiera => Arc::clone(&self.financiera),
        }
    }

    /// Resolved balance rows per (entity, account) for every block,
    /// sorted ascending by (year, month).
    pub async fn run_balances(&self, blocks: Vec<RequestBlock>) -> Result<Vec<EntityBalance>> {
        let results: Arc<Mutex<Vec<EntityBalance>>> = Arc::new(Mutex::new(Vec::new()));
        let cache = Arc::new(Mutex::new(StoreQueryCache::new()));

        stream::iter(blocks)
            .map(|block| {
                let results = Arc::clone(&results);
                let cache = Arc::clone(&cache);
                async move {
                    match self.balances_for_block(&block, &cache).await {
                        Ok(rows) => append(&results, rows),
                        Err(err) => {
                            error!("Block {} ({:?}) failed: {}", block.period, block.class, err)
                        }
                    }
                }
            })
            .buffer_unordered(self.workers)
            .collect::<Vec<()>>()
            .await;

        drain_sorted(&results, |row| (row.year, row.month))
    }

    /// Indicator sets per entity for every block, sorted ascending by
    /// (year, month). Also resolves the immediately preceding period for
    /// the averaged denominators.
    pub async fn run_indicators(&self, blocks: Vec<RequestBlock>) -> Result<Vec<IndicatorResult>> {
        let results: Arc<Mutex<Vec<IndicatorResult>>> = Arc::new(Mutex::new(Vec::new()));
        let cache = Arc::new(Mutex::new(StoreQueryCache::new()));

        stream::iter(blocks)
            .map(|block| {
                let results = Arc::clone(&results);
                let cache = Arc::clone(&cache);
                async move {
                    match self.indicators_for_block(&block, &cache).await {
                        Ok(rows) => append(&results, rows),
                        Err(err) => {
                            error!("Block {} ({:?}) failed: {}", block.period, block.class, err)
                        }
                    }
                }
            })
            .buffer_unordered(self.workers)
            .collect::<Vec<()>>()
            .await;

        drain_sorted(&results, |row| (row.year, row.month))
    }

    async fn balances_for_block(
        &self,
        block: &RequestBlock,
        cache: &Arc<Mutex<StoreQueryCache>>,
    ) -> Result<Vec<EntityBalance>> {
        let resolved = self
            .resolve_block(block, block.period, &block.account_codes, cache)
            .await?;

        let mut rows = Vec::with_capacity(block.entities.len() * block.account_codes.len());
        for entity in &block.entities {
            let key = entity.formatted_nit();
            for code in &block.account_codes {
                rows.push(EntityBalance {
                    entity_key: key.clone(),
                    entity_name: entity.short_name.clone(),
                    year: block.period.year,
                    month: block.period.month,
                    account_code: code.clone(),
                    amount: resolved.amount(&key, code),
                });
            }
        }
        Ok(rows)
    }

    async fn indicators_for_block(
        &self,
        block: &RequestBlock,
        cache: &Arc<Mutex<StoreQueryCache>>,
    ) -> Result<Vec<IndicatorResult>> {
        let calculator = IndicatorCalculator::new(ChartVariant::for_class(block.class));
        // Indicator formulas need the whole catalogue, not just the codes
        // the block happened to name.
        let codes = calculator.required_accounts();

        let current = self.resolve_block(block, block.period, &codes, cache).await?;
        let prior = self
            .resolve_block(block, block.period.prior(), &codes, cache)
            .await?;

        Ok(block
            .entities
            .iter()
            .map(|entity| calculator.compute(entity, block.period, &current, &prior))
            .collect())
    }

    /// One fetch-and-resolve pass: external slice first, local store
    /// (through the per-batch cache) only for what the external source
    /// did not cover with a non-zero value.
    async fn resolve_block(
        &self,
        block: &RequestBlock,
        period: Period,
        account_codes: &[String],
        cache: &Arc<Mutex<StoreQueryCache>>,
    ) -> Result<BalanceMapping> {
        let source = self.source_for(block.class);
        let filter = block.entity_filter();
        let external = source
            .fetch_mapping(period.year, period.month, account_codes, Some(&filter))
            .await;

        let local_rows = if needs_local_fallback(&external, &block.entities, account_codes) {
            let key = SliceKey::new(period.year, period.month, account_codes);
            let mut guard = cache
                .lock()
                .map_err(|e| Error::Unexpected(format!("query cache poisoned: {}", e)))?;
            guard.get_or_load(key, || {
                self.store
                    .query(period.year, period.month, account_codes, &[])
            })?
        } else {
            Arc::new(Vec::new())
        };

        Ok(resolve_balances(
            &external,
            &local_rows,
            &block.entities,
            account_codes,
        ))
    }
}

/// True when any (entity, account) pair lacks a non-zero external value,
/// i.e. the local store still has something to contribute.
fn needs_local_fallback(
    external: &BalanceMapping,
    entities: &[Entity],
    account_codes: &[String],
) -> bool {
    entities.iter().any(|entity| {
        let nit_key = entity.formatted_nit();
        let computed_key = entity.computed_nit_key();
        let name_key = entity.name_key();
        account_codes.iter().any(|code| {
            let value = external
                .get(&nit_key, code)
                .or_else(|| {
                    computed_key
                        .as_deref()
                        .and_then(|key| external.get(key, code))
                })
                .or_else(|| external.get(&name_key, code));
            !matches!(value, Some(v) if !v.is_zero())
        })
    })
}

/// Appends under the accumulator lock; a poisoned lock loses this
/// block's rows but never the batch.
fn append<T>(results: &Arc<Mutex<Vec<T>>>, rows: Vec<T>) {
    match results.lock() {
        Ok(mut guard) => guard.extend(rows),
        Err(err) => error!("Result accumulator poisoned, dropping block rows: {}", err),
    }
}

/// Final sort, once, after all blocks complete, under the lock.
fn drain_sorted<T, K, F>(results: &Arc<Mutex<Vec<T>>>, key: F) -> Result<Vec<T>>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let mut guard = results
        .lock()
        .map_err(|e| Error::Unexpected(format!("result accumulator poisoned: {}", e)))?;
    guard.sort_by_key(key);
    Ok(std::mem::take(&mut *guard))
}
