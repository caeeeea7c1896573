//! Route Table Module Index
//!
//! The portal's routes are declared in three access-segregated sections. Each section
//! tags its routes with a single `AccessRequirement`, so a route's protection is visible
//! next to its declaration rather than inferred later.

/// Regular user area (`/`, `/summary`).
pub mod user;

/// Admin area (`/admin/...`).
pub mod admin;

/// Login and registration, reachable without a session.
pub mod auth;

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::RouteDescriptor;

/// Where unauthenticated or indeterminate sessions are sent.
pub const LOGIN_PATH: &str = "/login";
/// Landing route for the regular user role.
pub const USER_HOME_PATH: &str = "/";
/// Landing route for the admin role.
pub const ADMIN_HOME_PATH: &str = "/admin/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
}

/// RouteTable
///
/// Ordered, immutable list of route descriptors with indexes by path and by name.
/// Built once at startup; there are no mutation operations.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

/// RouteTableState
///
/// Shared handle used in the application state.
pub type RouteTableState = Arc<RouteTable>;

impl RouteTable {
    /// new
    ///
    /// Builds a table from `routes`, preserving order. Fails if two entries share a path
    /// or a name.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut by_path = HashMap::with_capacity(routes.len());
        let mut by_name = HashMap::with_capacity(routes.len());

        for (index, route) in routes.iter().enumerate() {
            if by_path.insert(route.path.clone(), index).is_some() {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
            if by_name.insert(route.name.clone(), index).is_some() {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
        }

        Ok(Self {
            routes,
            by_path,
            by_name,
        })
    }

    /// standard
    ///
    /// The portal's fixed route table: user section, then admin, then auth.
    pub fn standard() -> Self {
        let routes = user::user_routes()
            .into_iter()
            .chain(admin::admin_routes())
            .chain(auth::auth_routes())
            .collect();

        // The sections are static and their paths and names are disjoint.
        match Self::new(routes) {
            Ok(table) => table,
            Err(e) => unreachable!("static route table is invalid: {e}"),
        }
    }

    /// Exact path match; no trailing-slash normalisation.
    pub fn by_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.by_path.get(path).map(|&index| &self.routes[index])
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
