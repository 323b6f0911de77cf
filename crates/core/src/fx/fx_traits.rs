//! Contract for the exchange-index source.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;

/// A source of the current exchange index (representative market rate).
#[async_trait]
pub trait ExchangeIndexSource: Send + Sync {
    /// Fetches the most recent published index value.
    async fn current_index(&self) -> Result<Decimal>;
}
