//! Open-data portal clients for supervised-entity account balances.
//!
//! This crate fetches monthly account balances published on the national
//! open-data portal, for the two regulated populations:
//!
//! - the solidarity sector (credit cooperatives), and
//! - supervised financial institutions.
//!
//! Each population has its own datasets, and dataset column names change
//! across reporting-year vintages; [`datasets`] keeps the per-vintage
//! descriptors. Fetches retry transient timeouts with a fixed delay and
//! degrade to whatever rows were accumulated, so a portal outage never
//! aborts a reconciliation batch.

pub mod datasets;
pub mod errors;
pub mod models;
pub mod parse;
pub mod provider;
pub mod trm;

pub use errors::{OpenDataError, RetryClass};
pub use models::BalanceRecord;
pub use provider::{FinancieraProvider, OpenDataProvider, SolidariaProvider};
