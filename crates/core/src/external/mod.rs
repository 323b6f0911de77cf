//! External-source seam: the engine-side contract over the open-data
//! providers, plus the adapter that turns portal rows into a
//! [`BalanceMapping`](crate::balances::BalanceMapping).

pub mod external_service;
pub mod external_traits;

pub use external_service::PortalBalanceSource;
pub use external_traits::ExternalBalanceSource;
