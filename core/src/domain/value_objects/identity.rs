//! Identity value object decoded from a verified credential.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, User};

/// Who the current credential says the caller is
///
/// Built only by the token verifier (or from a fetched profile); carries
/// the claims verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            name,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name if present, else the email
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        let name = (!user.name.is_empty()).then(|| user.name.clone());
        Identity::new(user.id.clone(), user.email.clone(), user.role, name)
    }
}
