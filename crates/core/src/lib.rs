//! Balanza Core - Balance reconciliation and indicator engine.
//!
//! This crate reconciles monthly account balances of regulated entities
//! from two disjoint sources (the open-data portals and the regulator's
//! own persisted store) into one balance-per-entity-per-account view,
//! and derives the financial-health indicator catalogue per entity and
//! reporting period. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod balances;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod external;
pub mod fx;
pub mod indicators;
pub mod scheduler;

// Re-export common types
pub use balances::{AccountBalance, BalanceMapping, Period};
pub use entities::{Entity, EntityClass};
pub use indicators::{ChartVariant, IndicatorResult};
pub use scheduler::{BatchScheduler, RequestBlock};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
