//! Batch request and result shapes.
//!
//! A batch is a list of independent blocks, each naming a period, one or
//! many account codes, and the target entities. The "total accounts"
//! variant instead names symbolic account categories and entity-class
//! codes; it expands into per-class blocks routed to the matching
//! pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balances::Period;
use crate::entities::{Entity, EntityClass};
use crate::errors::{Result, ValidationError};
use crate::indicators::{AccountCategory, ChartVariant};

/// Accepts either a single value or a list in caller JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

/// One target entity as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRequest {
    /// Tax identifier digits.
    pub nit: String,
    pub check_digit: u8,
    pub short_name: String,
    /// Legal name; the local-store join key.
    #[serde(alias = "legalName")]
    pub display_name: String,
}

impl EntityRequest {
    pub fn into_entity(self, class: EntityClass) -> Result<Entity> {
        if !self.nit.chars().all(|c| c.is_ascii_digit()) || self.nit.is_empty() {
            return Err(ValidationError::InvalidInput(format!(
                "NIT must be digits, got '{}'",
                self.nit
            ))
            .into());
        }
        Ok(Entity {
            nit: self.nit,
            check_digit: self.check_digit,
            legal_name: self.display_name.clone(),
            short_name: self.short_name,
            class,
            supervisory_code: None,
        })
    }
}

/// One caller-supplied block of the plain batch shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBatchRequest {
    pub year: i32,
    pub month: u32,
    #[serde(alias = "accountCode")]
    pub account_codes: OneOrMany<String>,
    pub entities: Vec<EntityRequest>,
    /// Numeric entity-class code routing the block to a pipeline.
    pub entity_class: i32,
}

impl BalanceBatchRequest {
    pub fn into_block(self) -> Result<RequestBlock> {
        let class = EntityClass::from_code(self.entity_class)
            .ok_or(ValidationError::UnknownEntityClass(self.entity_class))?;
        let period = Period::new(self.year, self.month)?;
        let entities = self
            .entities
            .into_iter()
            .map(|e| e.into_entity(class))
            .collect::<Result<Vec<_>>>()?;
        Ok(RequestBlock {
            period,
            account_codes: self.account_codes.into(),
            entities,
            class,
        })
    }
}

/// The "total accounts" batch shape: symbolic categories over whole
/// entity classes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalAccountsRequest {
    pub year: i32,
    pub month: u32,
    pub categories: OneOrMany<AccountCategory>,
    pub entity_classes: OneOrMany<i32>,
}

/// Expands a total-accounts request into one block per entity class,
/// resolving each symbolic category against the class's chart. The
/// entity registry supplies the per-class populations.
pub fn expand_total_accounts(
    request: TotalAccountsRequest,
    registry: &[Entity],
) -> Result<Vec<RequestBlock>> {
    let period = Period::new(request.year, request.month)?;
    let categories: Vec<AccountCategory> = request.categories.into();
    let class_codes: Vec<i32> = request.entity_classes.into();

    let mut blocks = Vec::with_capacity(class_codes.len());
    for code in class_codes {
        let class =
            EntityClass::from_code(code).ok_or(ValidationError::UnknownEntityClass(code))?;
        let chart = ChartVariant::for_class(class);
        let account_codes = categories
            .iter()
            .map(|c| c.code_for(chart).to_string())
            .collect();
        let entities: Vec<Entity> = registry
            .iter()
            .filter(|e| e.class == class)
            .cloned()
            .collect();
        blocks.push(RequestBlock {
            period,
            account_codes,
            entities,
            class,
        });
    }
    Ok(blocks)
}

/// One unit of reconciliation work. Blocks are independent; the only
/// ordering contract is the final (year, month) sort of the aggregated
/// results.
#[derive(Debug, Clone)]
pub struct RequestBlock {
    pub period: Period,
    pub account_codes: Vec<String>,
    pub entities: Vec<Entity>,
    /// Routes the block to the Solidaria or Financiera pipeline.
    pub class: EntityClass,
}

impl RequestBlock {
    /// Entity-filter values for the portal fetch: raw NIT digits for the
    /// NIT-keyed datasets, legal names for the name-keyed ones.
    pub fn entity_filter(&self) -> Vec<String> {
        match self.class {
            EntityClass::Solidaria => self.entities.iter().map(|e| e.nit.clone()).collect(),
            EntityClass::Financiera => self.entities.iter().map(|e| e.legal_name.clone()).collect(),
        }
    }
}

/// One resolved balance row of the batch output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBalance {
    pub entity_key: String,
    pub entity_name: String,
    pub year: i32,
    pub month: u32,
    pub account_code: String,
    pub amount: Decimal,
}
