//! Guard decision for a single protected route

use crate::domain::entities::Role;
use crate::domain::value_objects::Route;
use crate::services::policy::can_access;
use crate::services::session::Session;

/// What a protected route renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet; render nothing conclusive
    Loading,
    /// Nobody signed in; go to `redirect_to` and come back to `from` after login
    DenyUnauthenticated { redirect_to: Route, from: Route },
    /// Signed in with the wrong role; show access denied, stay put
    DenyForbidden,
    Allow,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Decide access to `attempted`, which requires a signed-in user holding
/// one of `required` (any role when empty)
///
/// While the session is loading the answer is always `Loading`, whatever
/// the session holds.
pub fn check(session: &Session, required: &[Role], attempted: &Route) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    if !session.is_authenticated() {
        return GuardDecision::DenyUnauthenticated {
            redirect_to: Route::login(),
            from: attempted.clone(),
        };
    }
    if can_access(session.role(), required) {
        GuardDecision::Allow
    } else {
        GuardDecision::DenyForbidden
    }
}
