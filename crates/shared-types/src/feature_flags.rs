use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::config::{
    NotificationSettings, RefreshSettings, RegistrySettings, ReminderSettings, ServerSettings,
};

/// Feature flags controlling which optional integrations are active.
///
/// Every field defaults to `false` so that a missing or incomplete config
/// file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureFlags {
    /// Export traces over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Push hearing dates to the calendar-sync provider.
    #[serde(default)]
    pub calendar_sync: bool,
    /// Seed the store with the bundled demo cases at startup.
    #[serde(default)]
    pub demo_data: bool,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[cfg_attr(feature = "validation", validate(nested))]
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
    #[cfg_attr(feature = "validation", validate(nested))]
    #[serde(default)]
    pub registry: RegistrySettings,
}
