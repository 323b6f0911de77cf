//! Local balance-store contract.
//!
//! The store holds the regulator's own last-filed balance rows and is the
//! fallback when the portal has nothing for a slice. It is read-only for
//! this engine and assumed reliable: a failure here is infrastructure,
//! not business, and aborts only the block that hit it.

use super::balances_model::AccountBalance;
use crate::errors::Result;

/// Trait defining the contract for local balance-store reads.
///
/// Implementations live in the storage crate; the engine only sees this
/// trait. Rows are keyed by legal entity name. Reads are synchronous;
/// callers that need them off the async path wrap them themselves.
pub trait BalanceStoreTrait: Send + Sync {
    /// Persisted rows for `(year, month)` matching any of `account_codes`,
    /// restricted to `entity_names` (normalized legal names).
    fn query(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_names: &[String],
    ) -> Result<Vec<AccountBalance>>;

    /// Single-account lookup used by per-account balance displays.
    fn query_account(
        &self,
        year: i32,
        month: u32,
        account_code: &str,
        entity_names: &[String],
    ) -> Result<Vec<AccountBalance>>;
}
