use std::{env, time::Duration};

/// Fallback parking backend location for local development.
pub const DEFAULT_SESSION_API_URL: &str = "http://localhost:5000";
/// Session checks that take longer than this are treated as failed.
pub const DEFAULT_SESSION_CHECK_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Immutable configuration, loaded once at startup and shared through the application
/// state via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which settings are mandatory.
    pub env: Env,
    // Base URL of the parking backend that serves `/api/check-auth`.
    pub session_api_url: String,
    // Bound on a single session check.
    pub session_check_timeout: Duration,
    // Address the gateway listens on.
    pub bind_addr: String,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Local settings with no environment access, for test state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            session_api_url: DEFAULT_SESSION_API_URL.to_string(),
            session_check_timeout: Duration::from_millis(DEFAULT_SESSION_CHECK_TIMEOUT_MS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `SESSION_API_URL` is not set. Without it every protected
    /// navigation would fail closed, so the gateway refuses to start instead.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let session_api_url = match env {
            Env::Production => env::var("SESSION_API_URL")
                .expect("FATAL: SESSION_API_URL must be set in production."),
            Env::Local => env::var("SESSION_API_URL").unwrap_or_else(|_| {
                tracing::info!("SESSION_API_URL not set, using default: {DEFAULT_SESSION_API_URL}");
                DEFAULT_SESSION_API_URL.to_string()
            }),
        };

        Self {
            env,
            session_api_url,
            session_check_timeout: Duration::from_millis(load_timeout_ms()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

/// load_timeout_ms
///
/// `SESSION_CHECK_TIMEOUT_MS`, falling back to the default when unset, unparsable or zero.
/// A zero timeout would fail every check, and there is no "wait forever" setting.
fn load_timeout_ms() -> u64 {
    let Ok(raw) = env::var("SESSION_CHECK_TIMEOUT_MS") else {
        return DEFAULT_SESSION_CHECK_TIMEOUT_MS;
    };

    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => ms,
        _ => {
            tracing::warn!(
                value = %raw,
                "Invalid SESSION_CHECK_TIMEOUT_MS, using default {DEFAULT_SESSION_CHECK_TIMEOUT_MS}ms"
            );
            DEFAULT_SESSION_CHECK_TIMEOUT_MS
        }
    }
}
