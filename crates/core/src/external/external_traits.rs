//! Contract for the external balance source.

use async_trait::async_trait;

use crate::balances::BalanceMapping;

/// An external source of balance slices.
///
/// Infallible by contract: retry and degradation live inside the
/// implementation, and a failed slice is indistinguishable from an empty
/// one — the resolver then falls back to the local store.
#[async_trait]
pub trait ExternalBalanceSource: Send + Sync {
    /// Fetches and merges the external rows for one slice into a mapping
    /// keyed by formatted NIT (or legal name for name-keyed datasets).
    async fn fetch_mapping(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_filter: Option<&[String]>,
    ) -> BalanceMapping;
}
