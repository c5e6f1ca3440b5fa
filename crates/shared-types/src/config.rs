use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(feature = "validation")]
use validator::Validate;

// ---------------------------------------------------------------------------
// Config file sections
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// How often tracked cases are re-fetched from the registry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RefreshInterval {
    Hourly,
    #[default]
    Daily,
    Weekly,
}

impl RefreshInterval {
    pub fn period(&self) -> Duration {
        match self {
            Self::Hourly => Duration::from_secs(60 * 60),
            Self::Daily => Duration::from_secs(24 * 60 * 60),
            Self::Weekly => Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

/// Automatic case refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RefreshSettings {
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
    #[serde(default)]
    pub interval: RefreshInterval,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            interval: RefreshInterval::default(),
        }
    }
}

/// Case-update notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email_enabled: bool,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Notification email must be a valid address"))
    )]
    #[serde(default)]
    pub email: Option<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            email: None,
        }
    }
}

/// Hearing reminders pushed alongside calendar sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReminderSettings {
    #[serde(default = "default_true")]
    pub week_before: bool,
    #[serde(default = "default_true")]
    pub day_before: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            week_before: true,
            day_before: true,
        }
    }
}

/// Body of `PUT /api/settings`: the sections a user may change at runtime.
/// Omitted sections reset to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SettingsUpdate {
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[cfg_attr(feature = "validation", validate(nested))]
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_simulated_latency_ms() -> u64 {
    2000
}

/// Registry lookup policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RegistrySettings {
    /// Per-attempt timeout.
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 120, message = "timeout_secs must be between 1 and 120"))
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[cfg_attr(
        feature = "validation",
        validate(range(max = 10, message = "max_retries must be at most 10"))
    )]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before retry `n` is `n * retry_backoff_ms`.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Artificial latency of the simulated registry.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl RegistrySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}
