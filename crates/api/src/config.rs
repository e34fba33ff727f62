use std::str::FromStr;
use std::time::Duration;

use placement_core::notification::DEFAULT_MAX_ATTEMPTS;
use placement_events::DispatcherConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to stop after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub outbox: OutboxSettings,
    /// Interval of the offer expiry job in seconds (default: `300`).
    pub offer_expiry_interval_secs: u64,
}

/// Settings of the outbox dispatcher.
#[derive(Debug, Clone)]
pub struct OutboxSettings {
    pub poll_interval_secs: u64,
    pub batch_size: i64,
    pub max_attempts: i32,
    /// Optional external endpoint that receives every automatic notification.
    pub webhook_url: Option<String>,
}

impl OutboxSettings {
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            batch_size: self.batch_size,
            max_attempts: self.max_attempts,
        }
    }
}

impl Default for OutboxSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 15,
            batch_size: 25,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            webhook_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `30`                    |
    /// | `OUTBOX_POLL_INTERVAL_SECS`  | `15`                    |
    /// | `OUTBOX_BATCH_SIZE`          | `25`                    |
    /// | `OUTBOX_MAX_ATTEMPTS`        | `8`                     |
    /// | `NOTIFICATION_WEBHOOK_URL`   | unset                   |
    /// | `OFFER_EXPIRY_INTERVAL_SECS` | `300`                   |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let webhook_url = std::env::var("NOTIFICATION_WEBHOOK_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Self {
            host,
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            outbox: OutboxSettings {
                poll_interval_secs: env_or("OUTBOX_POLL_INTERVAL_SECS", 15),
                batch_size: env_or("OUTBOX_BATCH_SIZE", 25),
                max_attempts: env_or("OUTBOX_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
                webhook_url,
            },
            offer_expiry_interval_secs: env_or("OFFER_EXPIRY_INTERVAL_SECS", 300),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when
/// it is unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
