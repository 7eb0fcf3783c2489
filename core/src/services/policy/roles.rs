//! Role membership checks and per-role landing routes

use crate::domain::entities::Role;
use crate::domain::value_objects::route::{
    Route, ADMIN_HOME_PATH, DECORATOR_HOME_PATH, LOGIN_PATH, USER_HOME_PATH,
};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};

/// Whether `role` satisfies `required`
///
/// An empty requirement admits everyone, including visitors with no role.
/// A non-empty requirement admits exactly the listed roles.
pub fn can_access(role: Option<Role>, required: &[Role]) -> bool {
    if required.is_empty() {
        return true;
    }
    match role {
        Some(role) => required.contains(&role),
        None => false,
    }
}

/// String form of [`can_access`] for roles read from untyped sources
///
/// Comparison ignores case. A role name that is not one of the known roles
/// never satisfies a non-empty requirement, and unknown names inside
/// `required` admit nobody.
pub fn can_access_str(role: &str, required: &[&str]) -> bool {
    if required.is_empty() {
        return true;
    }
    let Some(role) = Role::parse(role) else {
        return false;
    };
    required
        .iter()
        .filter_map(|r| Role::parse(r))
        .any(|r| r == role)
}

/// Reject callers whose identity does not satisfy `required`
///
/// # Returns
/// * `Err(DomainError::Unauthenticated)` when there is no identity and the
///   requirement is non-empty
/// * `Err(DomainError::Forbidden)` when the role is not listed
pub fn require_role(identity: Option<&Identity>, required: &[Role]) -> DomainResult<()> {
    if required.is_empty() {
        return Ok(());
    }
    match identity {
        None => Err(DomainError::Unauthenticated {
            reason: "sign in required".to_string(),
        }),
        Some(identity) if can_access(Some(identity.role), required) => Ok(()),
        Some(identity) => Err(DomainError::forbidden(format!(
            "role {} may not perform this action",
            identity.role
        ))),
    }
}

/// The dashboard each role starts on
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::new(ADMIN_HOME_PATH),
        Role::Decorator => Route::new(DECORATOR_HOME_PATH),
        Role::User => Route::new(USER_HOME_PATH),
    }
}

/// Where to send someone who just signed in
///
/// Staff always land on their own dashboard; a regular user returns to the
/// page they were bounced from when there is one.
pub fn destination_after_login(role: Role, redirect_hint: Option<&str>) -> Route {
    match role {
        Role::Admin | Role::Decorator => home_route(role),
        Role::User => redirect_hint
            .map(str::trim)
            .filter(|hint| hint.starts_with('/') && *hint != LOGIN_PATH)
            .map(Route::new)
            .unwrap_or_else(|| home_route(Role::User)),
    }
}
