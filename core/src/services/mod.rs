//! Business services containing domain logic and use cases.

pub mod audit;
pub mod catalog;
pub mod checkout;
pub mod guard;
pub mod lifecycle;
pub mod policy;
pub mod render;
pub mod session;
pub mod token;
pub mod users;

// Re-export commonly used types
pub use audit::{AuditService, AuditServiceConfig};
pub use catalog::CatalogService;
pub use checkout::{CheckoutService, PaymentGateway, PaymentIntent};
pub use guard::{GuardDecision, RouteTable};
pub use lifecycle::{
    sanitize, validate, validate_booking_id, BookingPolicy, BookingService, BookingServiceConfig,
    IngestReport, IngestWarning, ValidationReport,
};
pub use policy::{can_access, can_access_str, destination_after_login, home_route, require_role};
pub use render::{FailureDetail, FallbackView, FallibleRegion, RegionKind, RegionOutput};
pub use session::{LoginOutcome, ProfileFetcher, Session, SessionManager, SessionState};
pub use token::{TokenVerifier, TokenVerifierConfig};
pub use users::UserAdminService;
