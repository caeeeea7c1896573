use crate::models::{AccessRequirement, RouteDescriptor};

/// Admin Section
///
/// Parking lot management, user oversight and occupancy summaries. Restricted to sessions
/// with the admin role; regular users are corrected back to `/`.
pub fn admin_routes() -> Vec<RouteDescriptor> {
    vec![
        // The trailing slash is part of the path: `/admin` does not match this route.
        RouteDescriptor::new(
            "/admin/",
            "AdminHome",
            "admin/Home",
            AccessRequirement::AuthenticatedAdminOnly,
        ),
        RouteDescriptor::new(
            "/admin/users",
            "AdminUsers",
            "admin/Users",
            AccessRequirement::AuthenticatedAdminOnly,
        ),
        RouteDescriptor::new(
            "/admin/summary",
            "AdminSummary",
            "admin/Summary",
            AccessRequirement::AuthenticatedAdminOnly,
        ),
    ]
}
