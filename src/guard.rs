use std::time::Duration;

use crate::{
    models::{AccessRequirement, Decision, Role, RouteDescriptor},
    routes::{ADMIN_HOME_PATH, LOGIN_PATH, USER_HOME_PATH},
    session::{SessionCheckFailure, SessionState},
};

/// AccessGuard
///
/// Decides, for one attempted navigation, whether it may proceed or where it should be
/// redirected. The policy is fail-closed: a session check that errors, times out or
/// returns something unreadable is treated exactly like "not logged in".
///
/// The guard holds no session state of its own. Every evaluation of a protected route
/// asks the provider again, because the session can expire or be logged out elsewhere
/// between two navigations.
#[derive(Clone)]
pub struct AccessGuard {
    provider: SessionState,
    timeout: Duration,
}

impl AccessGuard {
    pub fn new(provider: SessionState, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// evaluate
    ///
    /// 1. Public routes are allowed without calling the provider.
    /// 2. Otherwise the provider is asked once, bounded by `timeout`.
    /// 3. Failure or an anonymous session redirects to `/login`.
    /// 4. Admin-only routes send non-admins to `/`.
    /// 5. User-only routes send admins to `/admin/`.
    /// 6. Anything else is allowed.
    pub async fn evaluate(&self, target: &RouteDescriptor, cookie: Option<&str>) -> Decision {
        if !target.access.requires_session() {
            tracing::debug!(path = %target.path, "public route, allowing");
            return Decision::Allow;
        }

        let status = match tokio::time::timeout(self.timeout, self.provider.check_session(cookie))
            .await
            .unwrap_or(Err(SessionCheckFailure::Timeout(self.timeout)))
        {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(path = %target.path, error = %e, "session check failed, redirecting to login");
                return Decision::RedirectTo(LOGIN_PATH.to_string());
            }
        };

        if !status.authenticated {
            tracing::debug!(path = %target.path, "no session, redirecting to login");
            return Decision::RedirectTo(LOGIN_PATH.to_string());
        }

        let decision = match (target.access, status.role) {
            (AccessRequirement::AuthenticatedAdminOnly, Role::User) => {
                Decision::RedirectTo(USER_HOME_PATH.to_string())
            }
            (AccessRequirement::AuthenticatedUserOnly, Role::Admin) => {
                Decision::RedirectTo(ADMIN_HOME_PATH.to_string())
            }
            _ => Decision::Allow,
        };

        tracing::debug!(path = %target.path, role = ?status.role, ?decision, "guard decided");
        decision
    }
}
