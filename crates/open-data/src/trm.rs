//! Representative-market-rate (exchange index) lookup.
//!
//! A slow-changing reference value published daily on the portal. Callers
//! are expected to hold the result in a time-boxed cache rather than
//! re-fetching it on every use.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::datasets::PORTAL_BASE_URL;
use crate::errors::OpenDataError;
use crate::parse::parse_money_value;

const TRM_DATASET_ID: &str = "32sa-8pi3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One published exchange-index observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeIndex {
    /// Pesos per unit.
    pub value: Decimal,
    /// First day the observation applies to.
    pub valid_from: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct TrmRow {
    #[serde(default)]
    valor: Option<serde_json::Value>,
    #[serde(default)]
    vigenciadesde: Option<String>,
}

/// Client for the exchange-index dataset.
pub struct TrmClient {
    client: Client,
}

impl TrmClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Fetches the most recent published observation.
    pub async fn latest(&self) -> Result<ExchangeIndex, OpenDataError> {
        let url = format!(
            "{}/{}.json?$order=vigenciadesde%20DESC&$limit=1",
            PORTAL_BASE_URL, TRM_DATASET_ID
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OpenDataError::from_reqwest(TRM_DATASET_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenDataError::Status {
                dataset: TRM_DATASET_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let rows: Vec<TrmRow> = response.json().await.map_err(|e| {
            OpenDataError::MalformedBody {
                dataset: TRM_DATASET_ID.to_string(),
                message: e.to_string(),
            }
        })?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OpenDataError::MalformedBody {
                dataset: TRM_DATASET_ID.to_string(),
                message: "empty result".to_string(),
            })?;

        let value = row
            .valor
            .as_ref()
            .map(parse_money_value)
            .unwrap_or(Decimal::ZERO);
        let valid_from = row.vigenciadesde.as_deref().and_then(parse_portal_date);

        Ok(ExchangeIndex { value, valid_from })
    }
}

impl Default for TrmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Portal timestamps look like `2023-06-15T00:00:00.000`; only the date
/// part matters here.
fn parse_portal_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
