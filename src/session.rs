use async_trait::async_trait;
use reqwest::header;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use crate::models::{CheckAuthResponse, Role, SessionStatus};

/// Path of the session-check endpoint on the parking backend.
pub const CHECK_AUTH_PATH: &str = "/api/check-auth";

/// SessionCheckFailure
///
/// Everything that can go wrong while asking the backend who the caller is. The guard
/// does not distinguish between these: each one is treated as "not authenticated".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionCheckFailure {
    #[error("session check transport error: {0}")]
    Transport(String),
    #[error("session check returned HTTP {0}")]
    Status(u16),
    #[error("session check returned a malformed body: {0}")]
    Malformed(String),
    #[error("session check timed out after {0:?}")]
    Timeout(Duration),
}

// 1. SessionProvider Contract
/// SessionProvider
///
/// Source of truth for the caller's session. Implementations must be idempotent and
/// side-effect free: the guard calls this once per protected navigation.
///
/// `cookie` is the raw `Cookie` header of the navigating client, forwarded as-is so the
/// backend can resolve its own session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn check_session(
        &self,
        cookie: Option<&str>,
    ) -> Result<SessionStatus, SessionCheckFailure>;
}

/// SessionState
///
/// Shared handle to the session provider used across the application state.
pub type SessionState = Arc<dyn SessionProvider>;

/// into_status
///
/// Maps the check-auth wire body to a `SessionStatus`. A logged-in answer with no user
/// object cannot tell us the role, so it is rejected rather than guessed.
pub fn into_status(body: CheckAuthResponse) -> Result<SessionStatus, SessionCheckFailure> {
    if !body.logged_in {
        return Ok(SessionStatus::anonymous());
    }

    let user = body.user.ok_or_else(|| {
        SessionCheckFailure::Malformed("logged_in is true but user is missing".to_string())
    })?;
    let role = if user.is_admin { Role::Admin } else { Role::User };

    Ok(SessionStatus::authenticated(role).with_user(user))
}

// 2. The Real Implementation (parking backend over HTTP)
/// HttpSessionProvider
///
/// Calls `GET {base_url}/api/check-auth` with the client's cookie. Any non-2xx answer is a
/// failure; the backend answers anonymous callers with `401 {logged_in:false}`, which ends
/// up on the same login redirect either way.
#[derive(Clone)]
pub struct HttpSessionProvider {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSessionProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, timeout)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHECK_AUTH_PATH),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn check_session(
        &self,
        cookie: Option<&str>,
    ) -> Result<SessionStatus, SessionCheckFailure> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout);

        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SessionCheckFailure::Timeout(self.timeout)
            } else {
                SessionCheckFailure::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionCheckFailure::Status(status.as_u16()));
        }

        let body: CheckAuthResponse = response
            .json()
            .await
            .map_err(|e| SessionCheckFailure::Malformed(e.to_string()))?;

        tracing::debug!(logged_in = body.logged_in, "session check answered");
        into_status(body)
    }
}

// 3. The Mock Implementation (For Tests)
/// MockSessionProvider
///
/// In-memory provider with a canned answer. Records how often it was called and which
/// cookie it last saw, so tests can assert the guard's call pattern.
#[derive(Clone)]
pub struct MockSessionProvider {
    status: SessionStatus,
    /// When true, every call returns a simulated transport failure.
    pub should_fail: bool,
    /// Artificial latency before answering.
    pub delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    last_cookie: Arc<Mutex<Option<String>>>,
}

impl MockSessionProvider {
    pub fn new(status: SessionStatus) -> Self {
        Self {
            status,
            should_fail: false,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_cookie: Arc::new(Mutex::new(None)),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(SessionStatus::anonymous())
    }

    pub fn user() -> Self {
        Self::new(SessionStatus::authenticated(Role::User))
    }

    pub fn admin() -> Self {
        Self::new(SessionStatus::authenticated(Role::Admin))
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::anonymous()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_cookie(&self) -> Option<String> {
        self.last_cookie
            .lock()
            .map(|cookie| cookie.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn check_session(
        &self,
        cookie: Option<&str>,
    ) -> Result<SessionStatus, SessionCheckFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_cookie.lock() {
            *last = cookie.map(str::to_string);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail {
            return Err(SessionCheckFailure::Transport(
                "Mock Session Error: Simulation requested".to_string(),
            ));
        }

        Ok(self.status.clone())
    }
}
