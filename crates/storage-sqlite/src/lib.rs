//! SQLite reader for the local balance store.
//!
//! The local store is a snapshot database of last-filed balance rows,
//! produced outside this engine. This crate is the only place Diesel
//! dependencies exist; the engine sees the store exclusively through
//! `balanza_core::balances::BalanceStoreTrait` and never writes to it.

pub mod balances;
pub mod db;
pub mod errors;
pub mod schema;

pub use balances::BalanceRepository;
pub use db::{create_pool, get_connection, DbConnection, DbPool};
pub use errors::{IntoCore, StorageError};

// Re-export from balanza-core for convenience
pub use balanza_core::errors::{DatabaseError, Error, Result};
