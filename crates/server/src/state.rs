use std::sync::Arc;

use shared_types::{AppConfig, AppError};

use crate::calendar_sync::LoggingCalendarSync;
use crate::fixtures;
use crate::registry::{RetryingRegistry, SimulatedRegistry};
use crate::service::{CaseService, DefaultService};
use crate::store::CaseStore;

/// Shared application state passed to Axum handlers via `State`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DefaultService>,
}

impl AppState {
    pub fn new(service: Arc<DefaultService>) -> Self {
        Self { service }
    }
}

/// Wire the store and providers described by `config`.
///
/// The store starts empty unless `demo_data` is enabled.
pub fn build_service(config: AppConfig) -> Result<DefaultService, AppError> {
    let store = if config.features.demo_data {
        let cases = fixtures::demo_cases()?;
        tracing::info!(count = cases.len(), "seeding demo cases");
        CaseStore::with_cases(cases)
    } else {
        CaseStore::new()
    };

    let registry = RetryingRegistry::new(
        SimulatedRegistry::from_settings(fixtures::registry_records()?, &config.registry),
        config.registry.clone(),
    );
    Ok(CaseService::new(Arc::new(store), registry, LoggingCalendarSync, config))
}
