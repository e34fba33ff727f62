use std::time::Duration;

/// Service-layer configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `{VITE_API_URL}/api/v1`.
    pub api_base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config for a backend host such as `http://localhost:3000`.
    pub fn new(host: &str) -> Self {
        Self {
            api_base_url: api_base_url(host),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `VITE_API_URL`                   | `http://localhost:3000` |
    /// | `PLACEMENT_CLIENT_TIMEOUT_SECS`  | `30`                    |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host =
            std::env::var("VITE_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let timeout_secs = std::env::var("PLACEMENT_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(30);

        Self {
            api_base_url: api_base_url(&host),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Compose the versioned API root from a host URL.
pub fn api_base_url(host: &str) -> String {
    format!("{}/api/v1", host.trim().trim_end_matches('/'))
}
