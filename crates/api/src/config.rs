use folio_core::diff::DEFAULT_MAX_DIFF_TOKENS;
use folio_core::revision::{parse_overrides, RetentionPolicy, DEFAULT_RETENTION};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Ceiling on the differing tokens of one field diff, shared prefix and
    /// suffix excluded (default: `8000`).
    pub diff_max_tokens: usize,
    /// Revisions kept per document, per entity type.
    pub retention: RetentionPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `PORT`                         | `3000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`        | `30`                    |
    /// | `DIFF_MAX_TOKENS`              | `8000`                  |
    /// | `REVISION_RETENTION`           | `25`                    |
    /// | `REVISION_RETENTION_OVERRIDES` | (none), e.g. `page=10`  |
    ///
    /// Panics on malformed values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let diff_max_tokens: usize = std::env::var("DIFF_MAX_TOKENS")
            .map(|v| v.parse().expect("DIFF_MAX_TOKENS must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_DIFF_TOKENS);

        let default_retention: i32 = std::env::var("REVISION_RETENTION")
            .map(|v| v.parse().expect("REVISION_RETENTION must be a valid i32"))
            .unwrap_or(DEFAULT_RETENTION);

        let overrides = std::env::var("REVISION_RETENTION_OVERRIDES")
            .map(|v| parse_overrides(&v).unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            diff_max_tokens,
            retention: RetentionPolicy {
                default_limit: default_retention,
                overrides,
            },
        }
    }
}
