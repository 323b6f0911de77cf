//! Portal provider trait and implementations.
//!
//! A provider fetches one (year, month, account-code-set) slice for its
//! population. Fetches are deliberately infallible at this boundary:
//! a slice that cannot be fetched degrades to the rows accumulated before
//! the failure (possibly none), and reconciliation falls back to the
//! local store for whatever is missing.

mod client;
mod financiera;
mod solidaria;

pub use financiera::FinancieraProvider;
pub use solidaria::SolidariaProvider;

use async_trait::async_trait;

use crate::models::BalanceRecord;

/// A balance source backed by one open-data population.
#[async_trait]
pub trait OpenDataProvider: Send + Sync {
    /// Stable identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Fetches the balance rows for `(year, month)` restricted to
    /// `account_codes`, optionally narrowed to an entity-identifier list.
    ///
    /// Never errors: transient timeouts are retried up to the fixed
    /// ceiling, everything else aborts the slice, and in both cases the
    /// rows accumulated so far are returned.
    async fn fetch_balances(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_filter: Option<&[String]>,
    ) -> Vec<BalanceRecord>;
}
