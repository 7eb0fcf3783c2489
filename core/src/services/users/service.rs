//! User administration service

use std::sync::Arc;

use dm_shared::utils::validation::{validators, ValidationErrors};
use serde_json::json;
use tracing::info;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::{ProfileUpdate, Role, User};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuditLogRepository, UserRepository};
use crate::services::audit::AuditService;
use crate::services::policy::require_role;

/// Service for listing accounts, changing roles and editing profiles
pub struct UserAdminService<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    users: Arc<U>,
    audit: Arc<AuditService<A>>,
}

impl<U, A> UserAdminService<U, A>
where
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(users: Arc<U>, audit: Arc<AuditService<A>>) -> Self {
        Self { users, audit }
    }

    /// Every account (admin only)
    pub async fn list_users(&self, actor: &Identity) -> DomainResult<Vec<User>> {
        require_role(Some(actor), &[Role::Admin])?;
        self.users.find_all().await
    }

    /// Accounts that can be assigned to bookings (admin only)
    pub async fn list_decorators(&self, actor: &Identity) -> DomainResult<Vec<User>> {
        require_role(Some(actor), &[Role::Admin])?;
        self.users.find_by_role(Role::Decorator).await
    }

    /// Change another account's role (admin only)
    ///
    /// Admins cannot change their own role.
    pub async fn change_role(&self, actor: &Identity, user_id: &str, role: Role) -> DomainResult<User> {
        require_role(Some(actor), &[Role::Admin])?;
        if actor.id == user_id {
            return Err(DomainError::forbidden("admins cannot change their own role"));
        }

        let mut user = self.load(user_id).await?;
        let previous = user.role;
        if previous == role {
            return Ok(user);
        }
        user.role = role;
        let user = self.users.update(user).await?;

        info!(user_id = %user_id, from = %previous, to = %role, "Role changed");
        self.audit
            .record(
                AuditLog::new(AuditEventType::RoleChanged, actor, user_id)
                    .with_details(json!({ "from": previous.as_str(), "to": role.as_str() })),
            )
            .await;
        Ok(user)
    }

    /// Edit the caller's own profile
    ///
    /// Only name, photo, phone and address can change this way.
    pub async fn update_profile(&self, actor: &Identity, update: ProfileUpdate) -> DomainResult<User> {
        check_profile_update(&update)?;

        let mut user = self.load(&actor.id).await?;
        user.apply_profile(&update);
        let user = self.users.update(user).await?;

        self.audit
            .record(
                AuditLog::new(AuditEventType::ProfileUpdated, actor, actor.id.clone())
                    .with_details(json!(update)),
            )
            .await;
        Ok(user)
    }

    async fn load(&self, user_id: &str) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))
    }
}

fn check_profile_update(update: &ProfileUpdate) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    if let Some(name) = &update.name {
        if !validators::length_between(name, 1, 80) {
            errors.add_error("name", "must be 1 to 80 characters", "INVALID_NAME");
        }
    }
    if let Some(photo) = &update.photo {
        if !validators::is_valid_url(photo) {
            errors.add_error("photo", "must be an http(s) URL", "INVALID_URL");
        }
    }
    if let Some(phone) = &update.phone {
        if !validators::is_valid_phone(phone) {
            errors.add_error("phone", "must be in international format", "INVALID_PHONE");
        }
    }
    if let Some(address) = &update.address {
        if !validators::not_empty(address) {
            errors.add_error("address", "must not be blank", "INVALID_ADDRESS");
        }
    }

    if errors.has_errors() {
        return Err(DomainError::validation(errors.summary()));
    }
    Ok(())
}
