//! User entity and the role that gates everything a user may see or do.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;

/// The single authorization axis of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer booking decoration services
    User,
    /// A decorator carrying out assigned projects
    Decorator,
    /// Marketplace staff
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Decorator, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Decorator => "decorator",
            Role::Admin => "admin",
        }
    }

    /// Case-insensitive parse; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| DomainError::validation(format!("unknown role: {s}")))
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown role: {raw}")))
    }
}

/// A registered account as returned by the profile endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub name: String,

    pub role: Role,

    /// Avatar URL on the asset host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            photo: None,
            phone: None,
            address: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_decorator(&self) -> bool {
        self.role == Role::Decorator
    }

    /// Apply the self-editable fields; the role is never touched here
    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(photo) = &update.photo {
            self.photo = Some(photo.clone());
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &update.address {
            self.address = Some(address.clone());
        }
    }
}

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(" Decorator "), Some(Role::Decorator));
        assert_eq!(Role::parse("superuser"), None);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Decorator).unwrap(), "\"decorator\"");
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"guest\"").is_err());
    }

    #[test]
    fn test_user_from_profile_payload() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "64b7f0c2a1b2c3d4e5f60718",
            "email": "ana@example.com",
            "name": "Ana",
            "role": "decorator",
            "photo": "https://img.example.com/ana.png",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id, "64b7f0c2a1b2c3d4e5f60718");
        assert!(user.is_decorator());
        assert!(user.created_at.is_some());
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_apply_profile_keeps_role() {
        let mut user = User::new("u1", "u1@example.com", "Old", Role::User);
        user.apply_profile(&ProfileUpdate {
            name: Some("New".to_string()),
            address: Some("12 Lake Rd".to_string()),
            ..Default::default()
        });
        assert_eq!(user.name, "New");
        assert_eq!(user.address.as_deref(), Some("12 Lake Rd"));
        assert_eq!(user.role, Role::User);
    }
}
