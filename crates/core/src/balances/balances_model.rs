//! Balance models: reporting periods, persisted rows, and the merged
//! entity → account → amount mapping.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A (year, month) reporting slice. Orders ascending by year then month,
/// which is the one ordering contract batch output relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange(month).into());
        }
        Ok(Self { year, month })
    }

    /// The immediately preceding reporting period.
    pub fn prior(&self) -> Period {
        if self.month == 1 {
            Period {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Period {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One persisted balance row from the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Legal name of the entity as filed.
    pub entity_name: String,
    pub year: i32,
    /// Reporting month, 1..=12.
    pub month: u32,
    pub account_code: String,
    /// Fixed-point amount, two fraction digits.
    pub amount: Decimal,
}

/// Merged balance view for one (year, month): entity key → account code
/// → accumulated amount.
///
/// Amounts for the same (entity, account) always sum, never overwrite;
/// the external feed may return several rows per account and chunked
/// fetches merge here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceMapping {
    accounts: HashMap<String, HashMap<String, Decimal>>,
}

impl BalanceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates `amount` into (entity_key, account_code).
    pub fn add(&mut self, entity_key: &str, account_code: &str, amount: Decimal) {
        let entry = self
            .accounts
            .entry(entity_key.to_string())
            .or_default()
            .entry(account_code.to_string())
            .or_insert(Decimal::ZERO);
        *entry += amount;
    }

    /// The accumulated amount for (entity_key, account_code), if any
    /// rows contributed to it.
    pub fn get(&self, entity_key: &str, account_code: &str) -> Option<Decimal> {
        self.accounts
            .get(entity_key)
            .and_then(|by_account| by_account.get(account_code))
            .copied()
    }

    /// The accumulated amount, or zero when nothing contributed.
    pub fn amount(&self, entity_key: &str, account_code: &str) -> Decimal {
        self.get(entity_key, account_code).unwrap_or(Decimal::ZERO)
    }

    /// Sum over a set of account codes for one entity. Missing codes
    /// contribute zero.
    pub fn sum(&self, entity_key: &str, account_codes: &[&str]) -> Decimal {
        account_codes
            .iter()
            .map(|code| self.amount(entity_key, code))
            .sum()
    }

    /// Whether the mapping holds any row for this entity key.
    pub fn contains_entity(&self, entity_key: &str) -> bool {
        self.accounts.contains_key(entity_key)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn entity_keys(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }
}
