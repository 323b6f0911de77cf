//! Block scheduling: batch request shapes and the bounded worker pool
//! that drives fetch → resolve → compute per block.

pub mod blocks_model;
pub mod scheduler_service;


pub use blocks_model::{
    expand_total_accounts, BalanceBatchRequest, EntityBalance, EntityRequest, OneOrMany,
    RequestBlock, TotalAccountsRequest,
};
pub use scheduler_service::BatchScheduler;
