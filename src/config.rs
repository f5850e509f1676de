//! Runtime configuration loaded from environment variables.
//!
//! DESIGN
//! ======
//! All knobs have working defaults so the service boots with no environment
//! at all: a file-backed SQLite database, port 3000, and an analytics
//! backend assumed at `http://localhost:8000`.

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://opsboard.db?mode=rwc";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

const DEFAULT_PULSE_REFRESH_MS: u64 = 30_000;
const DEFAULT_PULSE_RETRY_COUNT: u32 = 3;
const DEFAULT_PULSE_RETRY_DELAY_MS: u64 = 2_000;

/// Service-wide configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Upstream target for proxied analytics routes.
    pub backend_url: String,
    /// Public URL of this service, used in generated links.
    pub app_url: String,
    /// Interval between pulse snapshot refreshes, in milliseconds.
    pub pulse_refresh_ms: u64,
    /// Retry attempts per refresh before surfacing the error.
    pub pulse_retry_count: u32,
    /// Base backoff delay between refresh retries, in milliseconds.
    pub pulse_retry_delay_ms: u64,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            database_url: env_string("DATABASE_URL", DEFAULT_DATABASE_URL),
            backend_url: env_string("BACKEND_URL", DEFAULT_BACKEND_URL),
            app_url: env_string("APP_URL", DEFAULT_APP_URL),
            pulse_refresh_ms: env_parse("PULSE_REFRESH_MS", DEFAULT_PULSE_REFRESH_MS),
            pulse_retry_count: env_parse("PULSE_RETRY_COUNT", DEFAULT_PULSE_RETRY_COUNT),
            pulse_retry_delay_ms: env_parse("PULSE_RETRY_DELAY_MS", DEFAULT_PULSE_RETRY_DELAY_MS),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
