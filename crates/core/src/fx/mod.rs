//! Exchange-index lookup with an explicit time-boxed cache.
//!
//! The representative market rate changes slowly; callers hold it in a
//! value-plus-timestamp cache owned by the service instance instead of
//! process-wide mutable state.

pub mod fx_cache;
pub mod fx_service;
pub mod fx_traits;

pub use fx_cache::TimeBoxedCache;
pub use fx_service::{ExchangeIndexService, PortalExchangeIndexSource};
pub use fx_traits::ExchangeIndexSource;
