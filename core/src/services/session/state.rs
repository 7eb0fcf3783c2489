//! Session snapshots published to subscribers

use crate::domain::entities::{Role, User};
use crate::domain::value_objects::{Identity, Route};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Stored credential not read yet
    Initializing,
    Unauthenticated,
    /// Credential verified, profile fetch in flight
    Authenticating,
    Authenticated,
}

/// A snapshot of the session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub identity: Option<Identity>,
    pub user: Option<User>,
}

impl Session {
    pub fn initializing() -> Self {
        Self {
            state: SessionState::Initializing,
            identity: None,
            user: None,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            identity: None,
            user: None,
        }
    }

    pub fn authenticating(identity: Identity) -> Self {
        Self {
            state: SessionState::Authenticating,
            identity: Some(identity),
            user: None,
        }
    }

    pub fn authenticated(identity: Identity, user: User) -> Self {
        Self {
            state: SessionState::Authenticated,
            identity: Some(identity),
            user: Some(user),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Initializing | SessionState::Authenticating
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated && self.user.is_some()
    }

    /// Role of the signed-in user; the fetched profile wins over the claims
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated() {
            return None;
        }
        self.user
            .as_ref()
            .map(|u| u.role)
            .or_else(|| self.identity.as_ref().map(|i| i.role))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initializing()
    }
}

/// Result of a login attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Signed in; navigate to `destination`
    Authenticated { destination: Route },
    /// A later login or logout overtook this one; its result was dropped
    Superseded,
}
