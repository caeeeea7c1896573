use parking_portal::{
    RouteTable,
    models::{AccessRequirement, RouteDescriptor},
    routes::{ADMIN_HOME_PATH, LOGIN_PATH, RouteTableError, USER_HOME_PATH},
};
use std::collections::HashSet;

#[test]
fn test_standard_table_exposes_fixed_paths_in_order() {
    let table = RouteTable::standard();
    let paths: Vec<&str> = table.iter().map(|r| r.path.as_str()).collect();

    assert_eq!(
        paths,
        vec![
            "/",
            "/summary",
            "/admin/",
            "/admin/users",
            "/admin/summary",
            "/login",
            "/register",
        ]
    );
    assert_eq!(table.len(), 7);
    assert!(!table.is_empty());
}

#[test]
fn test_paths_and_names_are_unique() {
    let table = RouteTable::standard();

    let paths: HashSet<&str> = table.iter().map(|r| r.path.as_str()).collect();
    let names: HashSet<&str> = table.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(paths.len(), table.len());
    assert_eq!(names.len(), table.len());
}

#[test]
fn test_sections_carry_expected_access() {
    let table = RouteTable::standard();

    for route in table.iter() {
        let expected = if route.path.starts_with("/admin/") {
            AccessRequirement::AuthenticatedAdminOnly
        } else if route.path == LOGIN_PATH || route.path == "/register" {
            AccessRequirement::Public
        } else {
            AccessRequirement::AuthenticatedUserOnly
        };
        assert_eq!(route.access, expected, "route {}", route.path);
    }
}

#[test]
fn test_landing_routes_exist() {
    let table = RouteTable::standard();

    assert_eq!(table.by_path(USER_HOME_PATH).unwrap().name, "Home");
    assert_eq!(table.by_path(ADMIN_HOME_PATH).unwrap().name, "AdminHome");
    assert_eq!(
        table.by_path(LOGIN_PATH).unwrap().access,
        AccessRequirement::Public
    );
}

#[test]
fn test_lookup_by_path_and_name() {
    let table = RouteTable::standard();

    let by_name = table.by_name("AdminUsers").unwrap();
    assert_eq!(by_name.path, "/admin/users");
    assert_eq!(table.by_path("/admin/users"), Some(by_name));

    assert!(table.by_name("Missing").is_none());
    assert!(table.by_path("/nowhere").is_none());
}

#[test]
fn test_path_lookup_is_exact() {
    let table = RouteTable::standard();

    assert!(table.by_path("/admin").is_none());
    assert!(table.by_path("/summary/").is_none());
}

#[test]
fn test_duplicate_path_is_rejected() {
    let result = RouteTable::new(vec![
        RouteDescriptor::new("/", "Home", "user/Home", AccessRequirement::Public),
        RouteDescriptor::new("/", "Other", "user/Other", AccessRequirement::Public),
    ]);

    assert_eq!(result.unwrap_err(), RouteTableError::DuplicatePath("/".to_string()));
}

#[test]
fn test_duplicate_name_is_rejected() {
    let result = RouteTable::new(vec![
        RouteDescriptor::new("/a", "Home", "A", AccessRequirement::Public),
        RouteDescriptor::new("/b", "Home", "B", AccessRequirement::Public),
    ]);

    assert_eq!(result.unwrap_err(), RouteTableError::DuplicateName("Home".to_string()));
}
