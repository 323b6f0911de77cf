//! Database models for local balance rows.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use balanza_core::balances::AccountBalance;
use balanza_core::constants::MONEY_SCALE;
use balanza_core::entities::normalize_name_key;

/// Helper to parse a stored amount string into a Decimal, with a
/// fallback through f64 for scientific notation. Unparseable values
/// log and read as zero; a snapshot row never aborts a query.
fn parse_stored_amount(value_str: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse stored amount '{}': {}. Falling back to ZERO.",
                    value_str,
                    e_decimal
                );
                Decimal::ZERO
            }
        },
    }
}

/// One row of the `saldos` snapshot table.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::saldos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceRowDb {
    pub id: i32,
    pub razon_social: String,
    pub anio: i32,
    pub mes: i32,
    pub codigo_cuenta: String,
    pub valor: String,
}

impl From<BalanceRowDb> for AccountBalance {
    fn from(db: BalanceRowDb) -> Self {
        AccountBalance {
            entity_name: normalize_name_key(&db.razon_social),
            year: db.anio,
            month: db.mes.max(0) as u32,
            account_code: db.codigo_cuenta,
            amount: parse_stored_amount(&db.valor).round_dp(MONEY_SCALE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(valor: &str) -> BalanceRowDb {
        BalanceRowDb {
            id: 1,
            razon_social: "  Cooperativa de Ahorro El Roble  ".to_string(),
            anio: 2023,
            mes: 6,
            codigo_cuenta: "100000".to_string(),
            valor: valor.to_string(),
        }
    }

    #[test]
    fn test_conversion_normalizes_name_and_rounds() {
        let balance = AccountBalance::from(row("1234567.891"));
        assert_eq!(balance.entity_name, "COOPERATIVA DE AHORRO EL ROBLE");
        assert_eq!(balance.amount, dec!(1234567.89));
    }

    #[test]
    fn test_scientific_notation_parses_through_f64() {
        let balance = AccountBalance::from(row("1.5e3"));
        assert_eq!(balance.amount, dec!(1500.00));
    }

    #[test]
    fn test_garbage_amount_reads_as_zero() {
        let balance = AccountBalance::from(row("n/a"));
        assert_eq!(balance.amount, Decimal::ZERO);
    }
}
