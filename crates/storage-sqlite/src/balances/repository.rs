use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::saldos::dsl::*;

use balanza_core::balances::{AccountBalance, BalanceStoreTrait};
use balanza_core::errors::Result;

use super::model::BalanceRowDb;

/// Read-only repository over the local balance snapshot.
pub struct BalanceRepository {
    pool: Arc<DbPool>,
}

impl BalanceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Loads a (year, month) slice filtered by account codes, then
    /// restricts to `entity_names` in memory. Stored legal names carry
    /// whatever casing and padding the filing had; the name key is only
    /// comparable after normalization, which SQLite cannot apply.
    fn load_slice(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_names: &[String],
    ) -> Result<Vec<AccountBalance>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = saldos
            .filter(anio.eq(year))
            .filter(mes.eq(month as i32))
            .filter(codigo_cuenta.eq_any(account_codes))
            .select(BalanceRowDb::as_select())
            .load::<BalanceRowDb>(&mut conn)
            .into_core()?;

        let mut balances: Vec<AccountBalance> =
            rows.into_iter().map(AccountBalance::from).collect();
        if !entity_names.is_empty() {
            balances.retain(|b| entity_names.contains(&b.entity_name));
        }
        Ok(balances)
    }
}

impl BalanceStoreTrait for BalanceRepository {
    fn query(
        &self,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_names: &[String],
    ) -> Result<Vec<AccountBalance>> {
        self.load_slice(year, month, account_codes, entity_names)
    }

    fn query_account(
        &self,
        year: i32,
        month: u32,
        account_code: &str,
        entity_names: &[String],
    ) -> Result<Vec<AccountBalance>> {
        self.load_slice(year, month, &[account_code.to_string()], entity_names)
    }
}
