//! Source-preference balance resolution.
//!
//! External portal data is the authoritative, fresher source; the local
//! store is the regulator's own last-filed snapshot used as a safety net
//! for periods the portal has not yet published. For each (entity,
//! account): external wins when present and non-zero, else the local
//! amount, else zero. Resolution never errors; an entity found under
//! neither key resolves to zero.

use rust_decimal::Decimal;

use super::balances_model::{AccountBalance, BalanceMapping};
use crate::entities::{normalize_name_key, Entity};

/// Merges the external mapping and local rows into one mapping for the
/// target entities, keyed by formatted NIT.
///
/// External rows are keyed by formatted tax id (or legal name on
/// name-keyed datasets) while local rows are keyed by legal name; each
/// candidate value is looked up by whichever key applies to its source.
/// Every requested (entity, account) pair is present in the output, zero
/// included, so downstream calculators see a complete view.
pub fn resolve_balances(
    external: &BalanceMapping,
    local_rows: &[AccountBalance],
    entities: &[Entity],
    account_codes: &[String],
) -> BalanceMapping {
    let mut local = BalanceMapping::new();
    for row in local_rows {
        local.add(
            &normalize_name_key(&row.entity_name),
            &row.account_code,
            row.amount,
        );
    }

    let mut resolved = BalanceMapping::new();
    for entity in entities {
        let nit_key = entity.formatted_nit();
        let computed_key = entity.computed_nit_key();
        let name_key = entity.name_key();

        for code in account_codes {
            let external_value = lookup_external(
                external,
                &nit_key,
                computed_key.as_deref(),
                &name_key,
                code,
            );

            let amount = match external_value {
                Some(value) if value != Decimal::ZERO => value,
                _ => local.amount(&name_key, code),
            };

            resolved.add(&nit_key, code, amount);
        }
    }
    resolved
}

/// External lookup across the keys a dataset may have used for this
/// entity: declared-check-digit NIT, recomputed-check-digit NIT, legal
/// name.
fn lookup_external(
    external: &BalanceMapping,
    nit_key: &str,
    computed_key: Option<&str>,
    name_key: &str,
    account_code: &str,
) -> Option<Decimal> {
    if let Some(value) = external.get(nit_key, account_code) {
        return Some(value);
    }
    if let Some(key) = computed_key {
        if let Some(value) = external.get(key, account_code) {
            return Some(value);
        }
    }
    external.get(name_key, account_code)
}
