//! Balance domain: periods, mappings, the local-store contract, the
//! per-batch query cache, and the source-preference resolver.

pub mod balances_model;
pub mod balances_traits;
pub mod query_cache;
pub mod resolver;


pub use balances_model::{AccountBalance, BalanceMapping, Period};
pub use balances_traits::BalanceStoreTrait;
pub use query_cache::StoreQueryCache;
pub use resolver::resolve_balances;
