use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared_types::{AppError, LegalCase, UpsertCaseRequest};

/// Records plus their first-insertion order.
#[derive(Debug, Default)]
struct StoreInner {
    order: Vec<String>,
    cases: HashMap<String, LegalCase>,
}

/// The authoritative set of tracked cases, keyed by id.
///
/// Reads take a shared lock and copy out; `upsert` is the only mutation and
/// holds the exclusive lock only for the final swap, after validation.
#[derive(Debug, Default)]
pub struct CaseStore {
    inner: RwLock<StoreInner>,
}

impl CaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with already-validated cases, in order.
    /// A later case with a repeated id replaces the earlier one.
    pub fn with_cases(cases: impl IntoIterator<Item = LegalCase>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.write();
            for case in cases {
                Self::put(&mut inner, case);
            }
        }
        store
    }

    // Writers only swap whole records, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn put(inner: &mut StoreInner, case: LegalCase) -> Option<LegalCase> {
        let id = case.id.clone();
        let previous = inner.cases.insert(id.clone(), case);
        if previous.is_none() {
            inner.order.push(id);
        }
        previous
    }

    /// Insert or replace a case.
    ///
    /// The request is validated first; on failure the store is untouched.
    /// A replaced case keeps its original position.
    pub fn upsert(&self, req: UpsertCaseRequest) -> Result<LegalCase, AppError> {
        let case = LegalCase::try_from(req)?;

        let mut inner = self.write();
        if let Some(existing) = inner.cases.get(&case.id) {
            if case.history.len() < existing.history.len() {
                tracing::warn!(
                    case_id = %case.id,
                    stored = existing.history.len(),
                    incoming = case.history.len(),
                    "upsert shortens case history"
                );
            }
        }
        if let (Some(hearing), Some(latest)) = (case.next_hearing_date, case.latest_history()) {
            if latest.next_purpose.is_none() {
                tracing::debug!(
                    case_id = %case.id,
                    %hearing,
                    "hearing scheduled but latest proceeding names no next purpose"
                );
            }
        }

        let replaced = Self::put(&mut inner, case.clone()).is_some();
        tracing::debug!(case_id = %case.id, replaced, "case upserted");
        Ok(case)
    }

    /// Fetch one case by id.
    pub fn get(&self, id: &str) -> Result<LegalCase, AppError> {
        self.read()
            .cases
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Find a tracked case by its CNR.
    pub fn find_by_cnr(&self, cnr: &str) -> Option<LegalCase> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.cases.get(id))
            .find(|c| c.cnr_number.eq_ignore_ascii_case(cnr.trim()))
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().cases.contains_key(id)
    }

    /// Copy of every case in insertion order.
    pub fn snapshot(&self) -> Vec<LegalCase> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.cases.get(id).cloned())
            .collect()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.read().order.clone()
    }

    pub fn len(&self) -> usize {
        self.read().cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
