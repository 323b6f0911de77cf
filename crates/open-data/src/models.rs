//! Row models for portal responses.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Raw row as deserialized from a portal dataset.
///
/// Column names drift across vintages, so every field carries the known
/// aliases and everything is optional; [`RawBalanceRow::into_record`]
/// normalizes a raw row into a [`BalanceRecord`] or drops it when the
/// account code is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBalanceRow {
    /// Tax identifier, when the dataset is NIT-keyed.
    #[serde(default)]
    pub nit: Option<String>,

    /// Legal name, when the dataset is name-keyed.
    #[serde(default, alias = "razon_social")]
    pub nombre_entidad: Option<String>,

    /// Chart-of-accounts code.
    #[serde(default, alias = "cuenta")]
    pub codigo_cuenta: Option<String>,

    /// Monetary value. Arrives as a display-formatted string on most
    /// vintages and as a plain JSON number on a few, hence `Value`.
    #[serde(default, alias = "valor")]
    pub valor_en_pesos: Option<Value>,
}

impl RawBalanceRow {
    /// Normalizes the raw row, parsing the value with
    /// [`parse_money_value`](crate::parse::parse_money_value).
    /// Rows without an account code carry no usable information and map to
    /// `None`.
    pub fn into_record(self) -> Option<BalanceRecord> {
        let account_code = self.codigo_cuenta?;
        let amount = self
            .valor_en_pesos
            .as_ref()
            .map(crate::parse::parse_money_value)
            .unwrap_or(Decimal::ZERO);
        Some(BalanceRecord {
            nit: self.nit,
            entity_name: self.nombre_entidad,
            account_code,
            amount,
        })
    }
}

/// One normalized balance row from the portal.
///
/// Depending on the dataset vintage the row is keyed by NIT, by legal
/// name, or both; downstream reconciliation looks an entity up by
/// whichever key is present.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRecord {
    /// Raw tax identifier as published (digits, possibly with a trailing
    /// check digit after a dash).
    pub nit: Option<String>,
    /// Legal name as published.
    pub entity_name: Option<String>,
    /// Chart-of-accounts code.
    pub account_code: String,
    /// Parsed amount; unparseable published values coerce to zero.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_row_aliases_old_vintage() {
        let row: RawBalanceRow = serde_json::from_str(
            r#"{"nit":"900123456","cuenta":"100000","valor":"500000000.00"}"#,
        )
        .unwrap();
        let record = row.into_record().unwrap();
        assert_eq!(record.account_code, "100000");
        assert_eq!(record.amount, dec!(500000000.00));
    }

    #[test]
    fn test_raw_row_new_vintage_fields() {
        let row: RawBalanceRow = serde_json::from_str(
            r#"{"nombre_entidad":"BANCO EJEMPLO","codigo_cuenta":"140000","valor_en_pesos":"1250.50"}"#,
        )
        .unwrap();
        let record = row.into_record().unwrap();
        assert_eq!(record.entity_name.as_deref(), Some("BANCO EJEMPLO"));
        assert_eq!(record.amount, dec!(1250.50));
    }

    #[test]
    fn test_row_without_account_code_is_dropped() {
        let row: RawBalanceRow =
            serde_json::from_str(r#"{"nit":"900123456","valor":"10"}"#).unwrap();
        assert!(row.into_record().is_none());
    }

    #[test]
    fn test_missing_value_coerces_to_zero() {
        let row: RawBalanceRow =
            serde_json::from_str(r#"{"nit":"900123456","cuenta":"100000"}"#).unwrap();
        assert_eq!(row.into_record().unwrap().amount, Decimal::ZERO);
    }
}
