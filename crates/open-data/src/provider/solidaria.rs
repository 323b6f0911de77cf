//! Solidarity-sector (cooperative) balance provider.
//!
//! The cooperative datasets tolerate omission of the entity filter and
//! return the whole population for the period, which is cheaper than
//! chunked identifier queries. The provider therefore always fetches the
//! full slice and filters client-side when a NIT list is given.

use async_trait::async_trait;
use log::warn;

use crate::datasets::{vintage_for_year, SOLIDARIA_VINTAGES};
use crate::models::BalanceRecord;
use crate::provider::client::PortalClient;
use crate::provider::OpenDataProvider;

const PROVIDER_ID: &str = "SOLIDARIA";

/// Provider for the cooperative account-plan population.
pub struct SolidariaProvider {
    client: PortalClient,
}

impl SolidariaProvider {
    pub fn new() -> Self {
        Self {
            client: PortalClient::new(),
        }
    }
}

impl Default for SolidariaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenDataProvider for SolidariaProvider {
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
        let Some(vintage) = vintage_for_year(&SOLIDARIA_VINTAGES, year) else {
            warn!("{}: no dataset covers reporting year {}", PROVIDER_ID, year);
            return Vec::new();
        };

        let rows = self
            .client
            .fetch_slice(vintage, year, month, account_codes, None)
            .await;

        match entity_filter {
            Some(nits) if !nits.is_empty() => rows
                .into_iter()
                .filter(|record| {
                    record
                        .nit
                        .as_deref()
                        .map(|nit| nit_matches(nit, nits))
                        .unwrap_or(false)
                })
                .collect(),
            _ => rows,
        }
    }
}

/// A published NIT may carry a `-D` check-digit suffix; comparison is on
/// the digits before it.
fn nit_matches(published: &str, wanted: &[String]) -> bool {
    let base = published.split('-').next().unwrap_or(published).trim();
    wanted.iter().any(|w| w == base || w == published.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nit_matches_plain() {
        assert!(nit_matches("900123456", &["900123456".to_string()]));
    }

    #[test]
    fn test_nit_matches_with_check_digit_suffix() {
        assert!(nit_matches("900123456-7", &["900123456".to_string()]));
    }

    #[test]
    fn test_nit_does_not_match_other_entity() {
        assert!(!nit_matches("800987654", &["900123456".to_string()]));
    }
}
