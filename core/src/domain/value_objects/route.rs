//! Client-side route paths.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_HOME_PATH: &str = "/dashboard/manage-bookings";
pub const DECORATOR_HOME_PATH: &str = "/dashboard/assigned-projects";
pub const USER_HOME_PATH: &str = "/dashboard/my-bookings";

/// A navigable path inside the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn login() -> Self {
        Self::new(LOGIN_PATH)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` equals `prefix` or lies beneath it
    pub fn starts_with(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        self.0 == prefix
            || prefix.is_empty()
            || (self.0.starts_with(prefix) && self.0[prefix.len()..].starts_with('/'))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Route::new(path)
    }
}
