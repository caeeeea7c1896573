use crate::models::{AccessRequirement, RouteDescriptor};

/// User Section
///
/// The regular user's area. Every route here requires a session whose role is not admin;
/// admins who land here are sent to the admin home instead.
pub fn user_routes() -> Vec<RouteDescriptor> {
    vec![
        // `/` is the user landing route; non-admins are redirected here from the admin area.
        RouteDescriptor::new("/", "Home", "user/Home", AccessRequirement::AuthenticatedUserOnly),
        // Reservation history and spend summary for the signed-in user.
        RouteDescriptor::new(
            "/summary",
            "Summary",
            "user/Summary",
            AccessRequirement::AuthenticatedUserOnly,
        ),
    ]
}
