//! Unit tests for the role policy

use crate::domain::entities::Role;
use crate::domain::value_objects::Identity;
use crate::errors::DomainError;
use crate::services::policy::{
    can_access, can_access_str, destination_after_login, home_route, require_role,
};

/// Every subset of the three roles
fn all_requirements() -> Vec<Vec<Role>> {
    (0u8..8)
        .map(|mask| {
            Role::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, role)| *role)
                .collect()
        })
        .collect()
}

#[test]
fn test_can_access_law_over_all_inputs() {
    for required in all_requirements() {
        for role in Role::ALL {
            let expected = required.is_empty() || required.contains(&role);
            assert_eq!(can_access(Some(role), &required), expected, "{role:?} vs {required:?}");
        }
        assert_eq!(can_access(None, &required), required.is_empty());
    }
}

#[test]
fn test_can_access_str_ignores_case() {
    assert!(can_access_str("ADMIN", &["admin"]));
    assert!(can_access_str("decorator", &["Admin", "Decorator"]));
    assert!(!can_access_str("user", &["admin"]));
    assert!(can_access_str("", &[]));
}

#[test]
fn test_can_access_str_rejects_unknown_roles() {
    assert!(!can_access_str("", &["admin"]));
    assert!(!can_access_str("superuser", &["superuser"]));
    assert!(can_access_str("superuser", &[]));
}

#[test]
fn test_require_role() {
    let decorator = Identity::new("d1", "d@example.com", Role::Decorator, None);

    assert!(require_role(Some(&decorator), &[Role::Decorator, Role::Admin]).is_ok());
    assert!(matches!(
        require_role(Some(&decorator), &[Role::Admin]),
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        require_role(None, &[Role::Admin]),
        Err(DomainError::Unauthenticated { .. })
    ));
    assert!(require_role(None, &[]).is_ok());
}

#[test]
fn test_destination_after_login() {
    assert_eq!(
        destination_after_login(Role::Admin, Some("/services/42")).as_str(),
        "/dashboard/manage-bookings"
    );
    assert_eq!(
        destination_after_login(Role::Decorator, None).as_str(),
        "/dashboard/assigned-projects"
    );
    assert_eq!(
        destination_after_login(Role::User, Some("/services/42")).as_str(),
        "/services/42"
    );
    assert_eq!(
        destination_after_login(Role::User, Some("/login")),
        home_route(Role::User)
    );
    assert_eq!(
        destination_after_login(Role::User, Some("https://evil.example")),
        home_route(Role::User)
    );
}
