//! Path-prefix table of protected areas

use crate::domain::entities::Role;
use crate::domain::value_objects::Route;
use crate::services::session::Session;

use super::decision::{check, GuardDecision};

/// Protected path prefixes and the roles they admit
///
/// The longest matching prefix wins. Paths matching no entry are public.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(String, Vec<Role>)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Protect `prefix`; an empty role list admits any signed-in user
    pub fn protect(mut self, prefix: impl Into<String>, roles: &[Role]) -> Self {
        self.entries.push((prefix.into(), roles.to_vec()));
        self
    }

    /// The marketplace dashboard layout
    pub fn dashboard() -> Self {
        Self::new()
            .protect("/dashboard", &[])
            .protect("/profile", &[])
            .protect("/dashboard/manage-bookings", &[Role::Admin])
            .protect("/dashboard/manage-services", &[Role::Admin])
            .protect("/dashboard/manage-decorators", &[Role::Admin])
            .protect("/dashboard/manage-users", &[Role::Admin])
            .protect("/dashboard/analytics", &[Role::Admin])
            .protect("/dashboard/assigned-projects", &[Role::Decorator])
            .protect("/dashboard/todays-schedule", &[Role::Decorator])
            .protect("/dashboard/my-bookings", &[Role::User])
            .protect("/dashboard/payment-history", &[Role::User])
            .protect("/dashboard/checkout", &[Role::User])
    }

    /// Roles required for `path`, or `None` when it is public
    pub fn required_roles(&self, path: &Route) -> Option<&[Role]> {
        self.entries
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.trim_end_matches('/').len())
            .map(|(_, roles)| roles.as_slice())
    }

    /// Guard decision for navigating to `path`
    pub fn check_path(&self, session: &Session, path: &Route) -> GuardDecision {
        match self.required_roles(path) {
            Some(required) => check(session, required, path),
            None => GuardDecision::Allow,
        }
    }
}
