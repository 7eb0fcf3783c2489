//! End-to-end flows across session, guard and booking lifecycle

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use dm_core::domain::entities::booking::{Booking, BookingRequest, BookingStatus};
    use dm_core::domain::entities::{Role, User};
    use dm_core::domain::value_objects::{Identity, Route};
    use dm_core::errors::DomainError;
    use dm_core::repositories::{
        MockAuditLogRepository, MockBookingRepository, MockCredentialStore, MockPaymentRepository,
    };
    use dm_core::services::audit::{AuditService, AuditServiceConfig};
    use dm_core::services::guard::{GuardDecision, RouteTable};
    use dm_core::services::lifecycle::{BookingService, BookingServiceConfig};
    use dm_core::services::session::{LoginOutcome, ProfileFetcher, SessionManager};
    use dm_core::services::token::{TokenVerifier, TokenVerifierConfig};

    const SECRET: &str = "integration-secret";

    struct StaticProfiles {
        users: HashMap<String, User>,
    }

    #[async_trait]
    impl ProfileFetcher for StaticProfiles {
        async fn fetch_profile(&self, token: &str) -> Result<User, DomainError> {
            self.users.get(token).cloned().ok_or(DomainError::Unauthenticated {
                reason: "unknown token".to_string(),
            })
        }
    }

    fn token_for(user: &User) -> String {
        encode(
            &Header::default(),
            &json!({
                "id": user.id,
                "email": user.email,
                "role": user.role.as_str(),
                "exp": (Utc::now() + Duration::hours(1)).timestamp(),
            }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn session_for(users: &[(&str, &User)]) -> SessionManager {
        let profiles = StaticProfiles {
            users: users
                .iter()
                .map(|(token, user)| (token.to_string(), (*user).clone()))
                .collect(),
        };
        SessionManager::new(
            Arc::new(TokenVerifier::new(TokenVerifierConfig::with_secret(SECRET))),
            Arc::new(profiles),
            Arc::new(MockCredentialStore::new()),
        )
    }

    #[tokio::test]
    async fn test_admin_login_lands_on_manage_bookings_and_passes_guard() {
        let admin = User::new("a1", "admin@example.com", "Ada", Role::Admin);
        let token = token_for(&admin);
        let session = session_for(&[(token.as_str(), &admin)]);
        let table = RouteTable::dashboard();
        let target = Route::new("/dashboard/manage-bookings");

        assert_eq!(
            table.check_path(&session.current(), &target),
            GuardDecision::Loading
        );

        let outcome = session.login(&token, Some("/dashboard/my-bookings")).await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Authenticated {
                destination: Route::new("/dashboard/manage-bookings")
            }
        );
        assert!(table.check_path(&session.current(), &target).is_allowed());
        assert_eq!(
            table.check_path(&session.current(), &Route::new("/dashboard/my-bookings")),
            GuardDecision::DenyForbidden
        );

        session.logout().await;
        assert!(matches!(
            table.check_path(&session.current(), &target),
            GuardDecision::DenyUnauthenticated { .. }
        ));
    }

    #[tokio::test]
    async fn test_booking_from_request_to_completion() {
        let audit = Arc::new(MockAuditLogRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());
        let service = BookingService::new(
            Arc::clone(&bookings),
            Arc::new(MockPaymentRepository::new()),
            Arc::new(AuditService::new(
                Arc::clone(&audit),
                AuditServiceConfig {
                    async_writes: false,
                    ..Default::default()
                },
            )),
            BookingServiceConfig::default(),
        );

        let customer = Identity::new("u1", "owner@example.com", Role::User, Some("Olu".to_string()));
        let admin = Identity::new("a1", "admin@example.com", Role::Admin, None);
        let decorator = User::new("d1", "dec@example.com", "Dee", Role::Decorator);

        let booking: Booking = service
            .create(
                &customer,
                BookingRequest {
                    service_id: "svc-1".to_string(),
                    service_name: "Wedding Stage".to_string(),
                    date: Utc::now() + Duration::days(30),
                    location: Some("Dhaka".to_string()),
                    cost: 1200.0,
                },
            )
            .await
            .unwrap();

        service
            .override_payment_status(&admin, &booking.id, true)
            .await
            .unwrap();
        service
            .assign_decorator(&admin, &booking.id, &decorator)
            .await
            .unwrap();

        let on_job = Identity::from(&decorator);
        for status in [
            BookingStatus::PlanningPhase,
            BookingStatus::InProgress,
            BookingStatus::Completed,
        ] {
            service.transition(&on_job, &booking.id, status).await.unwrap();
        }

        let finished = service.get(&customer, &booking.id).await.unwrap();
        assert_eq!(finished.status, BookingStatus::Completed);
        assert!(finished.is_paid);

        let history = service.history(&admin, &booking.id).await.unwrap();
        assert_eq!(history.len(), 6);
    }
}
