//! Supervised-financial-institution balance provider.
//!
//! These datasets are keyed by legal name and reject unfiltered queries
//! of any useful size, so the entity filter is always pushed down and
//! chunked to respect the portal's filter-length limit.

use async_trait::async_trait;
use log::warn;

use crate::datasets::{vintage_for_year, FINANCIERA_VINTAGES};
use crate::models::BalanceRecord;
use crate::provider::client::PortalClient;
use crate::provider::OpenDataProvider;

const PROVIDER_ID: &str = "FINANCIERA";

/// Provider for the supervised-institution account-plan population.
pub struct FinancieraProvider {
    client: PortalClient,
}

impl FinancieraProvider {
    pub fn new() -> Self {
        Self {
            client: PortalClient::new(),
        }
    }
}

impl Default for FinancieraProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenDataProvider for FinancieraProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_balances(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_filter: Option<&[String]>,
    ) -> Vec<BalanceRecord> {
        let Some(vintage) = vintage_for_year(&FINANCIERA_VINTAGES, year) else {
            warn!("{}: no dataset covers reporting year {}", PROVIDER_ID, year);
            return Vec::new();
        };

        self.client
            .fetch_slice(vintage, year, month, account_codes, entity_filter)
            .await
    }
}
