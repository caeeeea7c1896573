use parking_portal::{
    AccessGuard, MockSessionProvider, NavigationOutcome, Navigator, Resolution, RouteTable,
    models::{AccessRequirement, RouteDescriptor},
    navigator::MAX_REDIRECTS,
    resolve,
    session::SessionState,
};
use std::{sync::Arc, time::Duration};

// --- Helper Functions ---

fn guard_with(mock: &MockSessionProvider) -> AccessGuard {
    AccessGuard::new(Arc::new(mock.clone()) as SessionState, Duration::from_secs(2))
}

fn navigator_with(mock: &MockSessionProvider) -> Navigator {
    Navigator::new(Arc::new(RouteTable::standard()), guard_with(mock))
}

fn committed(path: &str, name: &str) -> NavigationOutcome {
    NavigationOutcome::Committed {
        path: path.to_string(),
        name: name.to_string(),
    }
}

// --- resolve ---

#[tokio::test]
async fn test_resolve_follows_role_redirect() {
    let routes = Arc::new(RouteTable::standard());
    let mock = MockSessionProvider::user();

    let resolution = resolve(&routes, &guard_with(&mock), "/admin/users", None).await;

    match resolution {
        Resolution::Arrived { route, redirects } => {
            assert_eq!(route.path, "/");
            assert_eq!(redirects, vec!["/admin/users".to_string()]);
        }
        other => panic!("expected arrival, got {other:?}"),
    }
    // One check for /admin/users, one for / after the redirect.
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn test_resolve_anonymous_lands_on_login() {
    let routes = Arc::new(RouteTable::standard());
    let mock = MockSessionProvider::anonymous();

    let resolution = resolve(&routes, &guard_with(&mock), "/summary", None).await;

    match resolution {
        Resolution::Arrived { route, redirects } => {
            assert_eq!(route.path, "/login");
            assert_eq!(redirects, vec!["/summary".to_string()]);
        }
        other => panic!("expected arrival, got {other:?}"),
    }
    // The login route is public and costs no second check.
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_resolve_unknown_path() {
    let routes = Arc::new(RouteTable::standard());
    let mock = MockSessionProvider::admin();

    let resolution = resolve(&routes, &guard_with(&mock), "/parking-lots", None).await;

    assert_eq!(
        resolution,
        Resolution::NotFound {
            path: "/parking-lots".to_string()
        }
    );
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_resolve_stops_on_redirect_loop() {
    // A login route that itself requires a session can never settle for an anonymous caller.
    let routes = Arc::new(
        RouteTable::new(vec![
            RouteDescriptor::new("/", "Home", "user/Home", AccessRequirement::AuthenticatedAny),
            RouteDescriptor::new("/login", "Login", "Login", AccessRequirement::AuthenticatedAny),
        ])
        .unwrap(),
    );
    let mock = MockSessionProvider::anonymous();

    let resolution = resolve(&routes, &guard_with(&mock), "/", None).await;

    assert_eq!(
        resolution,
        Resolution::RedirectLoop {
            path: "/".to_string()
        }
    );
    assert_eq!(mock.calls(), MAX_REDIRECTS + 1);
}

// --- Navigator ---

#[tokio::test]
async fn test_navigator_commits_allowed_route() {
    let navigator = navigator_with(&MockSessionProvider::user());

    assert_eq!(navigator.current().await, None);
    assert_eq!(navigator.navigate("/summary").await, committed("/summary", "Summary"));
    assert_eq!(navigator.current().await.as_deref(), Some("/summary"));
}

#[tokio::test]
async fn test_navigator_commits_redirect_destination() {
    let navigator = navigator_with(&MockSessionProvider::admin());

    assert_eq!(navigator.navigate("/").await, committed("/admin/", "AdminHome"));
    assert_eq!(navigator.current().await.as_deref(), Some("/admin/"));
}

#[tokio::test]
async fn test_navigator_failure_goes_to_login() {
    let navigator = navigator_with(&MockSessionProvider::new_failing());

    assert_eq!(navigator.navigate("/admin/").await, committed("/login", "Login"));
}

#[tokio::test]
async fn test_navigator_not_found_keeps_location() {
    let navigator = navigator_with(&MockSessionProvider::user());

    navigator.navigate("/").await;
    let outcome = navigator.navigate("/missing").await;

    assert_eq!(
        outcome,
        NavigationOutcome::NotFound {
            path: "/missing".to_string()
        }
    );
    assert_eq!(navigator.current().await.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_navigator_forwards_cookie() {
    let mock = MockSessionProvider::user();
    let navigator = navigator_with(&mock).with_cookie("session=xyz");

    navigator.navigate("/").await;

    assert_eq!(mock.last_cookie().as_deref(), Some("session=xyz"));
}

#[tokio::test]
async fn test_late_result_of_superseded_navigation_is_discarded() {
    // Slow session check: the protected navigation is still pending when the public one lands.
    let mock = MockSessionProvider::admin().with_delay(Duration::from_millis(300));
    let navigator = Arc::new(navigator_with(&mock));

    let slow = {
        let navigator = navigator.clone();
        tokio::spawn(async move { navigator.navigate("/admin/users").await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = navigator.navigate("/register").await;
    let slow = slow.await.unwrap();

    assert_eq!(fast, committed("/register", "Register"));
    assert_eq!(slow, NavigationOutcome::Superseded);
    assert_eq!(navigator.current().await.as_deref(), Some("/register"));
}

#[tokio::test]
async fn test_navigator_aborts_on_redirect_loop() {
    let routes = Arc::new(
        RouteTable::new(vec![
            RouteDescriptor::new("/", "Home", "user/Home", AccessRequirement::AuthenticatedAny),
            RouteDescriptor::new("/login", "Login", "Login", AccessRequirement::AuthenticatedAny),
        ])
        .unwrap(),
    );
    let navigator = Navigator::new(routes, guard_with(&MockSessionProvider::anonymous()));

    assert_eq!(
        navigator.navigate("/").await,
        NavigationOutcome::Aborted {
            path: "/".to_string()
        }
    );
    assert_eq!(navigator.current().await, None);
}
