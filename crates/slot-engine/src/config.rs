//! Availability service configuration.

/// Service duration used when a request does not specify one.
pub const DEFAULT_SERVICE_MINUTES: u32 = 30;

/// Settings for [`crate::service::AvailabilityService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Duration applied when the request omits `serviceDurationMinutes` (env: SLOTS_DEFAULT_DURATION)
    pub default_duration_minutes: u32,
    /// IANA timezone for vendors whose document has none (env: SLOTS_TIMEZONE)
    pub default_timezone: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_SERVICE_MINUTES,
            default_timezone: "UTC".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset, empty, or unparseable values fall back to the defaults. A zero
    /// duration is treated as unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_duration_minutes: lookup("SLOTS_DEFAULT_DURATION")
                .and_then(|v| v.trim().parse().ok())
                .filter(|m: &u32| *m > 0)
                .unwrap_or(defaults.default_duration_minutes),
            default_timezone: lookup("SLOTS_TIMEZONE")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.default_timezone),
        }
    }
}
