use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{Datelike, NaiveDate, Utc};
use shared_types::{
    AppConfig, AppError, CalendarMonth, CaseSummary, LegalCase, RefreshOutcome, RegistryCase,
    SearchQuery, SettingsUpdate, TimelineEntry, UpsertCaseRequest,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::task::JoinHandle;

use crate::calendar;
use crate::error_convert::ValidateRequest;
use crate::calendar_sync::{CalendarSync, LoggingCalendarSync};
use crate::query::{self, CaseFilter};
use crate::registry::{CaseRegistry, RetryingRegistry, SimulatedRegistry};
use crate::store::CaseStore;
use crate::timeline;

type LockMap = Mutex<HashMap<String, Arc<AsyncMutex<()>>>>;

/// Exclusive hold on one key of the lock map. The map entry is removed when
/// the last holder or waiter for the key lets go.
struct KeyGuard<'a> {
    locks: &'a LockMap,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

/// The service wired up by the binary.
pub type DefaultService = CaseService<RetryingRegistry<SimulatedRegistry>, LoggingCalendarSync>;

/// Case tracking operations over a store and its external providers.
///
/// Read operations work on a store snapshot. Mutations of one case id are
/// serialized by a per-id lock held across registry and calendar calls.
pub struct CaseService<R, C> {
    store: Arc<CaseStore>,
    registry: R,
    calendar: C,
    config: RwLock<AppConfig>,
    locks: LockMap,
}

impl<R: CaseRegistry, C: CalendarSync> CaseService<R, C> {
    pub fn new(store: Arc<CaseStore>, registry: R, calendar: C, config: AppConfig) -> Self {
        Self {
            store,
            registry,
            calendar,
            config: RwLock::new(config),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<CaseStore> {
        &self.store
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Current configuration, including settings changed at runtime.
    pub fn config(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the user-editable settings. Server, feature and registry
    /// sections are fixed at startup.
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<AppConfig, AppError> {
        update.validate_request()?;

        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.refresh = update.refresh;
        config.notifications = update.notifications;
        config.reminders = update.reminders;
        tracing::info!(
            auto_refresh = config.refresh.auto_refresh,
            interval = ?config.refresh.interval,
            "settings updated"
        );
        Ok(config.clone())
    }

    async fn lock_key(&self, key: &str) -> KeyGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(key.to_string()).or_default().clone()
        };
        let mut held = KeyGuard {
            locks: &self.locks,
            key: key.to_string(),
            guard: None,
        };
        held.guard = Some(lock.lock_owned().await);
        held
    }

    fn ensure_tracked(&self, case_id: &str) -> Result<(), AppError> {
        if self.store.contains(case_id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Case {case_id} not found")))
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn query_cases(&self, filter: &CaseFilter) -> Vec<LegalCase> {
        query::query_cases(&self.store.snapshot(), filter)
    }

    pub fn calendar_buckets(&self, year: i32, month: u32) -> Result<CalendarMonth, AppError> {
        calendar::calendar_buckets(&self.store.snapshot(), year, month)
    }

    pub fn history_timeline(&self, case_id: &str) -> Result<Vec<TimelineEntry>, AppError> {
        let case = self.store.get(case_id)?;
        Ok(timeline::build_timeline(&case))
    }

    pub fn get_case(&self, case_id: &str) -> Result<LegalCase, AppError> {
        self.store.get(case_id)
    }

    pub fn summary(&self) -> CaseSummary {
        query::summarize(&self.store.snapshot())
    }

    pub fn upcoming_hearings(&self, from: NaiveDate) -> Vec<LegalCase> {
        calendar::upcoming_hearings(&self.store.snapshot(), from)
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub async fn upsert_case(&self, req: UpsertCaseRequest) -> Result<LegalCase, AppError> {
        let _guard = self.lock_key(req.id.trim()).await;
        self.store.upsert(req)
    }

    /// Resolve a registry search and start tracking the result.
    ///
    /// A case whose CNR is already tracked is updated in place under its
    /// existing id.
    pub async fn import_case(&self, query: SearchQuery) -> Result<LegalCase, AppError> {
        query.validate(Utc::now().year())?;
        let found = self.registry.resolve_case(&query).await?;

        // Two imports of one CNR must agree on the local id.
        let _cnr_guard = self
            .lock_key(&format!("cnr:{}", found.cnr_number.to_ascii_uppercase()))
            .await;

        let existing = self.store.find_by_cnr(&found.cnr_number);
        let id = existing
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let _guard = self.lock_key(&id).await;
        let existing = match existing {
            Some(_) => Some(self.store.get(&id)?),
            None => None,
        };

        let case = self.apply_registry_case(id, found, existing.as_ref())?;
        tracing::info!(
            case_id = %case.id,
            search_type = query.search_type(),
            cnr = %case.cnr_number,
            "case imported"
        );
        Ok(self.sync_if_enabled(case).await)
    }

    /// Re-fetch a tracked case from the registry by its CNR.
    pub async fn refresh_case(&self, case_id: &str) -> Result<LegalCase, AppError> {
        self.ensure_tracked(case_id)?;
        let _guard = self.lock_key(case_id).await;

        let current = self.store.get(case_id)?;
        let found = self
            .registry
            .resolve_case(&SearchQuery::by_cnr(&current.cnr_number))
            .await?;

        let case = self.apply_registry_case(current.id.clone(), found, Some(&current))?;
        tracing::debug!(
            case_id = %case.id,
            history = case.history.len(),
            status = %case.status,
            "case refreshed"
        );
        Ok(self.sync_if_enabled(case).await)
    }

    /// Refresh every case that is still before the court.
    pub async fn refresh_all(&self) -> Vec<RefreshOutcome> {
        let ids: Vec<String> = query::active_cases(&self.store.snapshot())
            .into_iter()
            .map(|c| c.id)
            .collect();

        let mut outcomes = Vec::with_capacity(ids.len());
        for case_id in ids {
            let outcome = match self.refresh_case(&case_id).await {
                Ok(_) => RefreshOutcome {
                    case_id,
                    refreshed: true,
                    error: None,
                },
                Err(err) => {
                    tracing::warn!(case_id = %case_id, error = %err, "case refresh failed");
                    RefreshOutcome {
                        case_id,
                        refreshed: false,
                        error: Some(err.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.refreshed).count();
        tracing::info!(total = outcomes.len(), failed, "refresh pass complete");
        outcomes
    }

    pub async fn set_calendar_sync(
        &self,
        case_id: &str,
        enabled: bool,
    ) -> Result<LegalCase, AppError> {
        self.ensure_tracked(case_id)?;
        let _guard = self.lock_key(case_id).await;

        let mut req = UpsertCaseRequest::from(&self.store.get(case_id)?);
        req.sync_calendar = enabled;
        let case = self.store.upsert(req)?;
        tracing::info!(case_id = %case.id, enabled, "calendar sync toggled");

        if enabled {
            Ok(self.sync_if_enabled(case).await)
        } else {
            Ok(case)
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────

    /// Store the registry's view of a case under `id`, keeping local state.
    /// Caller holds the id lock.
    fn apply_registry_case(
        &self,
        id: String,
        found: RegistryCase,
        existing: Option<&LegalCase>,
    ) -> Result<LegalCase, AppError> {
        if let Some(current) = existing {
            if found.history.len() < current.history.len() {
                return Err(AppError::conflict(format!(
                    "Registry returned {} history entries for case {}, {} are already recorded",
                    found.history.len(),
                    current.id,
                    current.history.len()
                )));
            }
        }

        let mut req = found.into_request(id, existing.is_some_and(|c| c.sync_calendar));
        req.last_synced_at = existing
            .and_then(|c| c.last_synced_at)
            .map(|t| t.to_rfc3339());

        self.store.upsert(req).map_err(|err| {
            AppError::upstream(format!("Registry returned an invalid case: {}", err.message))
        })
    }

    /// Push the hearing to the calendar when both the case and the feature
    /// flag ask for it. Failures are logged; the stored case stays as is.
    async fn sync_if_enabled(&self, case: LegalCase) -> LegalCase {
        let config = self.config();
        if !config.features.calendar_sync
            || !case.sync_calendar
            || case.next_hearing_date.is_none()
        {
            return case;
        }

        if let Err(err) = self.calendar.sync_hearing(&case, &config.reminders).await {
            tracing::warn!(case_id = %case.id, error = %err, "calendar sync failed");
            return case;
        }

        let mut req = UpsertCaseRequest::from(&case);
        req.last_synced_at = Some(Utc::now().to_rfc3339());
        match self.store.upsert(req) {
            Ok(synced) => synced,
            Err(err) => {
                tracing::warn!(case_id = %case.id, error = %err, "failed to record sync time");
                case
            }
        }
    }
}

/// Start the periodic refresh task, unless auto refresh is disabled.
///
/// The first refresh runs one full interval after startup.
pub fn spawn_auto_refresh<R, C>(service: Arc<CaseService<R, C>>) -> Option<JoinHandle<()>>
where
    R: CaseRegistry + 'static,
    C: CalendarSync + 'static,
{
    let refresh = service.config().refresh;
    if !refresh.auto_refresh {
        tracing::info!("auto refresh disabled");
        return None;
    }
    tracing::info!(interval = ?refresh.interval, "auto refresh enabled");

    // Settings may change at runtime, so each round re-reads the interval
    // and the on/off switch.
    Some(tokio::spawn(async move {
        loop {
            let period = service.config().refresh.interval.period();
            tokio::time::sleep(period).await;
            if service.config().refresh.auto_refresh {
                service.refresh_all().await;
            } else {
                tracing::debug!("auto refresh switched off, skipping round");
            }
        }
    }))
}
