//! Single-entry memo for local-store queries.
//!
//! Many blocks in one batch share a (year, month) slice; re-reading the
//! same rows per block is pure waste. The cache keeps only the most
//! recently loaded key: a repeated call with the same key returns the
//! cached rows, any other key evicts and replaces the entry. A miss only
//! costs an extra query, never stale data, because the key is always
//! re-validated.
//!
//! The cache is created by the scheduler for one batch run and discarded
//! at batch end; it is never process-global state.

use std::sync::Arc;

use super::balances_model::AccountBalance;
use crate::errors::Result;

/// Cache key: one (year, month, account-code-set) slice. Codes are kept
/// sorted so equal sets compare equal regardless of request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceKey {
    year: i32,
    month: u32,
    account_codes: Vec<String>,
}

impl SliceKey {
    pub fn new(year: i32, month: u32, account_codes: &[String]) -> Self {
        let mut codes = account_codes.to_vec();
        codes.sort_unstable();
        Self {
            year,
            month,
            account_codes: codes,
        }
    }
}

/// Last-query memo over local-store rows.
#[derive(Debug, Default)]
pub struct StoreQueryCache {
    entry: Option<(SliceKey, Arc<Vec<AccountBalance>>)>,
}

impl StoreQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rows when `key` matches the resident entry,
    /// otherwise runs `loader` and replaces the entry with its result.
    pub fn get_or_load<F>(&mut self, key: SliceKey, loader: F) -> Result<Arc<Vec<AccountBalance>>>
    where
        F: FnOnce() -> Result<Vec<AccountBalance>>,
    {
        if let Some((resident, rows)) = &self.entry {
            if *resident == key {
                return Ok(Arc::clone(rows));
            }
        }

        let rows = Arc::new(loader()?);
        self.entry = Some((key, Arc::clone(&rows)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(name: &str, code: &str) -> AccountBalance {
        AccountBalance {
            entity_name: name.to_string(),
            year: 2023,
            month: 6,
            account_code: code.to_string(),
            amount: dec!(100.00),
        }
    }

    #[test]
    fn test_repeated_key_hits_cache() {
        let mut cache = StoreQueryCache::new();
        let key = SliceKey::new(2023, 6, &["100000".to_string()]);

        let mut loads = 0;
        let first = cache
            .get_or_load(key.clone(), || {
                loads += 1;
                Ok(vec![row("COOP A", "100000")])
            })
            .unwrap();
        let second = cache
            .get_or_load(key, || {
                loads += 1;
                Ok(vec![])
            })
            .unwrap();

        assert_eq!(loads, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_order_insensitive_to_account_order() {
        let a = SliceKey::new(2023, 6, &["140000".to_string(), "100000".to_string()]);
        let b = SliceKey::new(2023, 6, &["100000".to_string(), "140000".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_key_evicts_single_entry() {
        let mut cache = StoreQueryCache::new();
        let june = SliceKey::new(2023, 6, &["100000".to_string()]);
        let july = SliceKey::new(2023, 7, &["100000".to_string()]);

        cache
            .get_or_load(june.clone(), || Ok(vec![row("COOP A", "100000")]))
            .unwrap();
        let replaced = cache
            .get_or_load(july, || Ok(vec![row("COOP B", "100000")]))
            .unwrap();
        assert_eq!(replaced[0].entity_name, "COOP B");

        // June was evicted; its loader runs again.
        let mut reloaded = false;
        cache
            .get_or_load(june, || {
                reloaded = true;
                Ok(vec![])
            })
            .unwrap();
        assert!(reloaded);
    }

    #[test]
    fn test_loader_error_leaves_cache_usable() {
        let mut cache = StoreQueryCache::new();
        let key = SliceKey::new(2023, 6, &["100000".to_string()]);

        let err = cache.get_or_load(key.clone(), || {
            Err(crate::errors::DatabaseError::QueryFailed("boom".to_string()).into())
        });
        assert!(err.is_err());

        let rows = cache
            .get_or_load(key, || Ok(vec![row("COOP A", "100000")]))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
