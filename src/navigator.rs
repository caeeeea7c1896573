use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::{
    guard::AccessGuard,
    models::{Decision, RouteDescriptor},
    routes::RouteTableState,
};

/// Upper bound on redirect hops followed for a single navigation.
pub const MAX_REDIRECTS: usize = 5;

/// Resolution
///
/// Where a navigation ends once every guard redirect has been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Arrived {
        route: RouteDescriptor,
        /// Paths that redirected, in order. Empty when the first hop was allowed.
        redirects: Vec<String>,
    },
    NotFound {
        path: String,
    },
    RedirectLoop {
        path: String,
    },
}

/// resolve
///
/// Runs the guard on `path`, then on every redirect target it produces, until a route is
/// allowed. Each hop is a fresh evaluation with its own session check.
pub async fn resolve(
    routes: &RouteTableState,
    guard: &AccessGuard,
    path: &str,
    cookie: Option<&str>,
) -> Resolution {
    let mut current = path.to_string();
    let mut redirects = Vec::new();

    loop {
        let Some(route) = routes.by_path(&current) else {
            return Resolution::NotFound { path: current };
        };

        match guard.evaluate(route, cookie).await {
            Decision::Allow => {
                return Resolution::Arrived {
                    route: route.clone(),
                    redirects,
                };
            }
            Decision::RedirectTo(next) => {
                if redirects.len() >= MAX_REDIRECTS {
                    tracing::error!(requested = %path, at = %current, "redirect chain exceeded {MAX_REDIRECTS} hops");
                    return Resolution::RedirectLoop {
                        path: path.to_string(),
                    };
                }
                redirects.push(std::mem::replace(&mut current, next));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The navigation finished and is now the current location.
    Committed { path: String, name: String },
    /// A newer navigation was requested while this one was being evaluated.
    Superseded,
    NotFound { path: String },
    /// The redirect chain did not settle.
    Aborted { path: String },
}

/// Navigator
///
/// Client-side routing adapter for one browsing session. It runs `resolve` for each
/// navigation request and applies the result, with last-requested-wins semantics:
/// every request takes a ticket from a generation counter, and a result whose ticket is
/// no longer the newest is dropped without touching the current location.
pub struct Navigator {
    routes: RouteTableState,
    guard: AccessGuard,
    cookie: Option<String>,
    generation: AtomicU64,
    current: RwLock<Option<String>>,
}

impl Navigator {
    pub fn new(routes: RouteTableState, guard: AccessGuard) -> Self {
        Self {
            routes,
            guard,
            cookie: None,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// Cookie forwarded to every session check made by this navigator.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// The committed location, `None` until the first navigation commits.
    pub async fn current(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let resolution = resolve(&self.routes, &self.guard, path, self.cookie.as_deref()).await;

        // Checked under the write lock so a stale result cannot slip in after the check.
        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(requested = %path, ticket, "navigation superseded, discarding result");
            return NavigationOutcome::Superseded;
        }

        match resolution {
            Resolution::Arrived { route, redirects } => {
                tracing::info!(requested = %path, destination = %route.path, hops = redirects.len(), "navigation committed");
                *current = Some(route.path.clone());
                NavigationOutcome::Committed {
                    path: route.path,
                    name: route.name,
                }
            }
            Resolution::NotFound { path } => NavigationOutcome::NotFound { path },
            Resolution::RedirectLoop { path } => NavigationOutcome::Aborted { path },
        }
    }
}
