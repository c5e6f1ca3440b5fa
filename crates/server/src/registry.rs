use std::future::Future;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{AppError, RegistryCase, RegistrySettings, SearchQuery};

// ── Errors ──────────────────────────────────────────────────────────

/// Failure reported by a case registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no case matches the search")]
    NotFound,
    #[error("registry did not respond in time")]
    Timeout,
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("registry rejected the query: {0}")]
    InvalidQuery(String),
}

impl RegistryError {
    /// Timeouts and outages may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Unavailable(_))
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound => AppError::not_found(err.to_string()),
            RegistryError::Timeout => AppError::timeout(err.to_string()),
            RegistryError::Unavailable(_) => AppError::upstream(err.to_string()),
            RegistryError::InvalidQuery(_) => AppError::bad_request(err.to_string()),
        }
    }
}

// ── Trait ────────────────────────────────────────────────────────────

/// Lookup of case records in an external court registry.
pub trait CaseRegistry: Send + Sync {
    /// Resolve a search to a single case record.
    fn resolve_case(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<RegistryCase, RegistryError>> + Send;
}

// ── Simulated registry ──────────────────────────────────────────────

/// A registry entry: the case plus the diary number it was filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryRecord {
    #[serde(default)]
    pub diary_number: Option<String>,
    pub case: RegistryCase,
}

fn matches(record: &RegistryRecord, query: &SearchQuery) -> bool {
    let case = &record.case;
    match query {
        SearchQuery::Cnr { cnr_number } => case.cnr_number.eq_ignore_ascii_case(cnr_number.trim()),
        SearchQuery::CaseNumber {
            case_type,
            case_number,
            year,
        } => {
            case.case_type.eq_ignore_ascii_case(case_type.trim())
                && case
                    .case_number
                    .contains(&format!("{}/{}", case_number.trim(), year))
        }
        SearchQuery::DiaryNumber { diary_number, year } => {
            record.diary_number.as_deref() == Some(diary_number.trim())
                && case.filing_date.year() == *year
        }
        SearchQuery::PartyName { party_name, year } => {
            let needle = party_name.trim().to_lowercase();
            (case.petitioner.to_lowercase().contains(&needle)
                || case.respondent.to_lowercase().contains(&needle))
                && case.filing_date.year() == *year
        }
    }
}

/// In-memory registry with artificial latency, standing in for the court's
/// case-status service.
#[derive(Debug, Default)]
pub struct SimulatedRegistry {
    records: RwLock<Vec<RegistryRecord>>,
    latency: Duration,
}

impl SimulatedRegistry {
    pub fn new(records: Vec<RegistryRecord>, latency: Duration) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    pub fn from_settings(records: Vec<RegistryRecord>, settings: &RegistrySettings) -> Self {
        Self::new(records, Duration::from_millis(settings.simulated_latency_ms))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<RegistryRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<RegistryRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a record, replacing any existing record with the same CNR.
    pub fn publish(&self, record: RegistryRecord) {
        let mut records = self.write();
        match records
            .iter_mut()
            .find(|r| r.case.cnr_number.eq_ignore_ascii_case(&record.case.cnr_number))
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CaseRegistry for SimulatedRegistry {
    async fn resolve_case(&self, query: &SearchQuery) -> Result<RegistryCase, RegistryError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        query
            .validate(Utc::now().year())
            .map_err(|e| RegistryError::InvalidQuery(e.message))?;

        let found = self
            .read()
            .iter()
            .find(|r| matches(r, query))
            .map(|r| r.case.clone());

        match found {
            Some(case) => {
                tracing::debug!(
                    search_type = query.search_type(),
                    cnr = %case.cnr_number,
                    "registry match"
                );
                Ok(case)
            }
            None => Err(RegistryError::NotFound),
        }
    }
}

// ── Retry policy ────────────────────────────────────────────────────

/// Wraps a registry with a per-attempt timeout and linear-backoff retries
/// for transient failures.
#[derive(Debug)]
pub struct RetryingRegistry<R> {
    inner: R,
    settings: RegistrySettings,
}

impl<R> RetryingRegistry<R> {
    pub fn new(inner: R, settings: RegistrySettings) -> Self {
        Self { inner, settings }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: CaseRegistry> CaseRegistry for RetryingRegistry<R> {
    async fn resolve_case(&self, query: &SearchQuery) -> Result<RegistryCase, RegistryError> {
        let mut attempt = 0;
        loop {
            let result =
                match tokio::time::timeout(self.settings.timeout(), self.inner.resolve_case(query))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(RegistryError::Timeout),
                };

            match result {
                Err(err) if err.is_transient() && attempt < self.settings.max_retries => {
                    attempt += 1;
                    let delay = self.settings.backoff(attempt);
                    tracing::warn!(
                        search_type = query.search_type(),
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "registry lookup failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}
