use crate::models::{AccessRequirement, RouteDescriptor};

/// Auth Section
///
/// Sign-in and sign-up screens. Public: the guard never calls the session check for these,
/// which also guarantees the login redirect target can always be reached.
pub fn auth_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("/login", "Login", "Login", AccessRequirement::Public),
        RouteDescriptor::new("/register", "Register", "Register", AccessRequirement::Public),
    ]
}
