use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Route Table Schemas ---

/// AccessRequirement
///
/// The access tag carried by every route. Exactly one per route; the guard reads it
/// fresh on every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AccessRequirement {
    /// No session check.
    Public,
    /// Any valid session.
    AuthenticatedAny,
    /// Valid session with the regular (non-admin) role.
    AuthenticatedUserOnly,
    /// Valid session with the admin role.
    AuthenticatedAdminOnly,
}

impl AccessRequirement {
    pub fn requires_session(self) -> bool {
        self != AccessRequirement::Public
    }
}

/// RouteDescriptor
///
/// One addressable view of the portal. `view` is the presentation unit the frontend
/// mounts for this route; the gateway never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteDescriptor {
    /// URL pattern, unique across the table.
    pub path: String,
    /// Human-readable identifier, unique across the table.
    pub name: String,
    pub view: String,
    pub access: AccessRequirement,
}

impl RouteDescriptor {
    pub fn new(path: &str, name: &str, view: &str, access: AccessRequirement) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: view.to_string(),
            access,
        }
    }
}

// --- Session Schemas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

/// SessionUser
///
/// The user object returned by the parking backend's `/api/check-auth` endpoint.
/// Only `is_admin` drives the guard; the profile fields are carried through for logging
/// and callers that want them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    pub is_admin: bool,
}

/// CheckAuthResponse
///
/// Wire shape of the session-check endpoint: `{ logged_in, user? }`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CheckAuthResponse {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// SessionStatus
///
/// Transient result of one session check. `role` is only meaningful when
/// `authenticated` is true. Discarded after each guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub role: Role,
    pub user: Option<SessionUser>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            role: Role::User,
            user: None,
        }
    }

    pub fn authenticated(role: Role) -> Self {
        Self {
            authenticated: true,
            role,
            user: None,
        }
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }
}

// --- Guard Output ---

/// Decision
///
/// Outcome of one guard evaluation. The guard never fails; every indeterminate state
/// resolves to a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

// --- HTTP Payloads ---

/// SearchQuery
///
/// Body of `GET /api/search` and `PUT /api/search`. The string is stored verbatim;
/// its `key=value` structure belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SearchQuery {
    #[schema(example = "parkingLotName=Central")]
    pub search_query: String,
}

/// RouteView
///
/// Response for a browser navigation that the guard allowed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteView {
    pub path: String,
    pub name: String,
    pub view: String,
}

impl From<&RouteDescriptor> for RouteView {
    fn from(route: &RouteDescriptor) -> Self {
        Self {
            path: route.path.clone(),
            name: route.name.clone(),
            view: route.view.clone(),
        }
    }
}

/// NavigationReport
///
/// Result of `GET /api/navigate`: where a navigation to `requested` ends up once every
/// redirect has been followed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationReport {
    pub requested: String,
    pub destination: String,
    pub name: String,
    /// Every intermediate path that redirected, in order.
    pub redirects: Vec<String>,
}
