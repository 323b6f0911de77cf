//! Adapter from portal rows to the merged balance mapping.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use balanza_open_data::{BalanceRecord, OpenDataProvider};

use crate::balances::BalanceMapping;
use crate::entities::{normalize_name_key, normalize_published_nit};
use crate::external::ExternalBalanceSource;

/// [`ExternalBalanceSource`] backed by one open-data provider.
pub struct PortalBalanceSource {
    provider: Arc<dyn OpenDataProvider>,
}

impl PortalBalanceSource {
    pub fn new(provider: Arc<dyn OpenDataProvider>) -> Self {
        Self { provider }
    }

    /// Folds raw records into the mapping. Rows carrying neither a NIT
    /// nor a name cannot be joined to anything and are dropped.
    fn fold(records: Vec<BalanceRecord>) -> BalanceMapping {
        let mut mapping = BalanceMapping::new();
        for record in records {
            let key = record
                .nit
                .as_deref()
                .and_then(normalize_published_nit)
                .or_else(|| {
                    record
                        .entity_name
                        .as_deref()
                        .map(normalize_name_key)
                        .filter(|name| !name.is_empty())
                });
            match key {
                Some(key) => mapping.add(&key, &record.account_code, record.amount),
                None => debug!(
                    "Dropping portal row without entity key (account {})",
                    record.account_code
                ),
            }
        }
        mapping
    }
}

#[async_trait]
impl ExternalBalanceSource for PortalBalanceSource {
    async fn fetch_mapping(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_filter: Option<&[String]>,
    ) -> BalanceMapping {
        let records = self
            .provider
            .fetch_balances(year, month, account_codes, entity_filter)
            .await;
        debug!(
            "{}: {} records for {}-{:02}",
            self.provider.id(),
            records.len(),
            year,
            month
        );
        Self::fold(records)
    }
}
