//! Shared HTTP plumbing for the portal providers.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use crate::datasets::{month_name, DatasetVintage, PORTAL_BASE_URL};
use crate::errors::{OpenDataError, RetryClass};
use crate::models::{BalanceRecord, RawBalanceRow};

/// Attempt ceiling for timeout-classified failures.
pub(crate) const MAX_FETCH_ATTEMPTS: u32 = 20;

/// Fixed delay between attempts.
pub(crate) const RETRY_DELAY: Duration = Duration::from_secs(2);

/// The portal rejects filter expressions beyond a length limit; entity
/// identifier lists are chunked to stay under it.
pub(crate) const ENTITY_CHUNK_SIZE: usize = 86;

/// Rows per page; high enough to cover a full monthly slice.
const PAGE_LIMIT: u32 = 50_000;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin wrapper over `reqwest::Client` that knows how to build the
/// portal's filtered queries and apply the retry policy.
pub(crate) struct PortalClient {
    client: Client,
}

impl PortalClient {
    pub(crate) fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Fetches one (year, month, accounts) slice, chunking the entity
    /// filter when present. Returns whatever rows were accumulated when a
    /// chunk fails; chunk results merge by summation downstream.
    pub(crate) async fn fetch_slice(
        &self,
        vintage: &DatasetVintage,
        year: i32,
        month: u32,
        account_codes: &[String],
        entity_filter: Option<&[String]>,
    ) -> Vec<BalanceRecord> {
        let Some(month_label) = month_name(month) else {
            warn!(
                "Skipping fetch from {}: invalid reporting month {}",
                vintage.dataset_id, month
            );
            return Vec::new();
        };

        let mut accumulated = Vec::new();
        match entity_filter {
            None => {
                let url = build_url(vintage, year, month_label, account_codes, None);
                self.fetch_into(vintage.dataset_id, &url, &mut accumulated)
                    .await;
            }
            Some(identifiers) => {
                for chunk in identifiers.chunks(ENTITY_CHUNK_SIZE) {
                    let url = build_url(vintage, year, month_label, account_codes, Some(chunk));
                    if !self
                        .fetch_into(vintage.dataset_id, &url, &mut accumulated)
                        .await
                    {
                        break;
                    }
                }
            }
        }
        accumulated
    }

    /// One query with the retry policy applied. Appends parsed rows to
    /// `out` and reports whether the query eventually succeeded.
    async fn fetch_into(&self, dataset: &str, url: &str, out: &mut Vec<BalanceRecord>) -> bool {
        match with_retry(dataset, || self.get_rows(dataset, url)).await {
            Some(rows) => {
                debug!("Fetched {} rows from {}", rows.len(), dataset);
                out.extend(rows.into_iter().filter_map(RawBalanceRow::into_record));
                true
            }
            None => false,
        }
    }

    async fn get_rows(
        &self,
        dataset: &str,
        url: &str,
    ) -> Result<Vec<RawBalanceRow>, OpenDataError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OpenDataError::from_reqwest(dataset, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenDataError::Status {
                dataset: dataset.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OpenDataError::from_reqwest(dataset, e))?;

        serde_json::from_str::<Vec<RawBalanceRow>>(&body).map_err(|e| {
            OpenDataError::MalformedBody {
                dataset: dataset.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Runs `attempt` under the retry policy: timeout-classified failures
/// retry after a fixed delay up to the attempt ceiling, anything else
/// aborts immediately. `None` means the slice degrades to local data.
async fn with_retry<F, Fut>(dataset: &str, mut attempt: F) -> Option<Vec<RawBalanceRow>>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<Vec<RawBalanceRow>, OpenDataError>>,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(rows) => return Some(rows),
            Err(err) => match err.retry_class() {
                RetryClass::AfterDelay if attempts < MAX_FETCH_ATTEMPTS => {
                    debug!(
                        "Timeout on {} (attempt {}/{}), retrying",
                        dataset, attempts, MAX_FETCH_ATTEMPTS
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                RetryClass::AfterDelay => {
                    warn!(
                        "Giving up on {} after {} attempts; slice degrades to local data",
                        dataset, attempts
                    );
                    return None;
                }
                RetryClass::Abort => {
                    warn!("{}; slice degrades to local data", err);
                    return None;
                }
            },
        }
    }
}

/// Builds the filtered query URL for one chunk.
fn build_url(
    vintage: &DatasetVintage,
    year: i32,
    month_label: &str,
    account_codes: &[String],
    entity_chunk: Option<&[String]>,
) -> String {
    let mut clauses = vec![
        format!("anio = '{}'", year),
        format!("mes = '{}'", month_label),
        format!(
            "{} in({})",
            vintage.account_field,
            quoted_list(account_codes)
        ),
    ];
    if let Some(chunk) = entity_chunk {
        clauses.push(format!("{} in({})", vintage.entity_field, quoted_list(chunk)));
    }
    let filter = clauses.join(" AND ");
    format!(
        "{}/{}.json?$limit={}&$where={}",
        PORTAL_BASE_URL,
        vintage.dataset_id,
        PAGE_LIMIT,
        urlencoding::encode(&filter)
    )
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::SOLIDARIA_VINTAGES;

    #[test]
    fn test_build_url_encodes_filter() {
        let url = build_url(
            &SOLIDARIA_VINTAGES[0],
            2023,
            "JUNIO",
            &["100000".to_string(), "140000".to_string()],
            None,
        );
        assert!(url.starts_with(
            "https://www.datos.gov.co/resource/78mw-y37e.json?$limit=50000&$where="
        ));
        let decoded = urlencoding::decode(url.split("$where=").nth(1).unwrap()).unwrap();
        assert_eq!(
            decoded,
            "anio = '2023' AND mes = 'JUNIO' AND codigo_cuenta in('100000','140000')"
        );
    }

    #[test]
    fn test_build_url_with_entity_chunk() {
        let url = build_url(
            &SOLIDARIA_VINTAGES[0],
            2023,
            "JUNIO",
            &["100000".to_string()],
            Some(&["900123456".to_string(), "800987654".to_string()]),
        );
        let decoded = urlencoding::decode(url.split("$where=").nth(1).unwrap()).unwrap();
        assert!(decoded.ends_with("AND nit in('900123456','800987654')"));
    }

    #[test]
    fn test_quoted_list_escapes_quotes() {
        assert_eq!(
            quoted_list(&["COOP D'ORO".to_string()]),
            "'COOP D''ORO'"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_stops_at_attempt_ceiling() {
        let mut attempts = 0u32;
        let result = with_retry("78mw-y37e", || {
            attempts += 1;
            async {
                Err(OpenDataError::Timeout {
                    dataset: "78mw-y37e".to_string(),
                })
            }
        })
        .await;

        assert!(result.is_none());
        assert_eq!(attempts, MAX_FETCH_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_after_transient_timeouts() {
        let mut attempts = 0u32;
        let result = with_retry("78mw-y37e", || {
            attempts += 1;
            let fail = attempts < 3;
            async move {
                if fail {
                    Err(OpenDataError::Timeout {
                        dataset: "78mw-y37e".to_string(),
                    })
                } else {
                    Ok(Vec::new())
                }
            }
        })
        .await;

        assert_eq!(attempts, 3);
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_non_retryable_error_aborts_first_attempt() {
        let mut attempts = 0u32;
        let result = with_retry("78mw-y37e", || {
            attempts += 1;
            async {
                Err(OpenDataError::Status {
                    dataset: "78mw-y37e".to_string(),
                    status: 500,
                })
            }
        })
        .await;

        assert!(result.is_none());
        assert_eq!(attempts, 1);
    }
}
