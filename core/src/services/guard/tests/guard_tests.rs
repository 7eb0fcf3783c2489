//! Unit tests for the route guard

use crate::domain::entities::{Role, User};
use crate::domain::value_objects::{Identity, Route};
use crate::services::guard::{check, GuardDecision, RouteTable};
use crate::services::session::Session;

fn signed_in(role: Role) -> Session {
    let user = User::new("u1", "u1@example.com", "U One", role);
    Session::authenticated(Identity::from(&user), user)
}

#[test]
fn test_unauthenticated_admin_route_redirects_to_login() {
    let attempted = Route::new("/dashboard/manage-bookings");
    let decision = check(&Session::unauthenticated(), &[Role::Admin], &attempted);

    assert_eq!(
        decision,
        GuardDecision::DenyUnauthenticated {
            redirect_to: Route::login(),
            from: attempted,
        }
    );
}

#[test]
fn test_user_on_admin_route_is_forbidden() {
    let decision = check(
        &signed_in(Role::User),
        &[Role::Admin],
        &Route::new("/dashboard/manage-bookings"),
    );
    assert_eq!(decision, GuardDecision::DenyForbidden);
}

#[test]
fn test_loading_never_allows() {
    let identity = Identity::new("a1", "a1@example.com", Role::Admin, None);
    let route = Route::new("/dashboard/manage-bookings");

    assert_eq!(check(&Session::initializing(), &[], &route), GuardDecision::Loading);
    assert_eq!(
        check(&Session::authenticating(identity), &[Role::Admin], &route),
        GuardDecision::Loading
    );
}

#[test]
fn test_matching_role_is_allowed() {
    let route = Route::new("/dashboard/assigned-projects");
    assert!(check(&signed_in(Role::Decorator), &[Role::Decorator, Role::Admin], &route).is_allowed());
    assert!(check(&signed_in(Role::User), &[], &route).is_allowed());
}

#[test]
fn test_route_table_longest_prefix_wins() {
    let table = RouteTable::dashboard();

    assert_eq!(
        table.required_roles(&Route::new("/dashboard/manage-users/42")),
        Some(&[Role::Admin][..])
    );
    assert_eq!(table.required_roles(&Route::new("/dashboard")), Some(&[][..]));
    assert_eq!(table.required_roles(&Route::new("/services")), None);
}

#[test]
fn test_route_table_check_path() {
    let table = RouteTable::dashboard();
    let user = signed_in(Role::User);

    assert!(table.check_path(&user, &Route::new("/dashboard/my-bookings")).is_allowed());
    assert_eq!(
        table.check_path(&user, &Route::new("/dashboard/manage-services")),
        GuardDecision::DenyForbidden
    );
    assert!(table
        .check_path(&Session::unauthenticated(), &Route::new("/services/7"))
        .is_allowed());
    assert!(matches!(
        table.check_path(&Session::unauthenticated(), &Route::new("/profile")),
        GuardDecision::DenyUnauthenticated { .. }
    ));
}
