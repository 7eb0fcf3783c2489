//! Render regions that degrade to a fallback view when their content fails

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use dm_shared::Environment;
use serde::Serialize;
use tracing::error;

use crate::errors::{DomainError, DomainResult};
use crate::services::lifecycle::is_booking_id_error;

/// What a region displays, which decides its fallback wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    General,
    /// A booking detail panel; malformed booking ids get their own message
    Booking,
}

/// Whatever could be recovered from a failure
///
/// Either field may be absent: panics carry no stack, and payloads that
/// are not strings carry no message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureDetail {
    pub message: Option<String>,
    pub stack: Option<String>,
}

/// The view shown in place of a failed region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackView {
    pub region: String,
    pub title: String,
    /// Only populated where failure details may be shown
    pub detail: Option<FailureDetail>,
    pub booking_id_error: bool,
    pub retryable: bool,
}

impl FallbackView {
    /// One display line; works with any combination of absent details
    pub fn summary(&self) -> String {
        let message = self
            .detail
            .as_ref()
            .and_then(|d| d.message.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty());
        match message {
            Some(message) => format!("{}: {}", self.title, message),
            None => self.title.clone(),
        }
    }
}

/// Output of a region: the real content or its fallback
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutput<T> {
    Rendered(T),
    Fallback(FallbackView),
}

impl<T> RegionOutput<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RegionOutput::Fallback(_))
    }

    pub fn fallback(&self) -> Option<&FallbackView> {
        match self {
            RegionOutput::Fallback(view) => Some(view),
            RegionOutput::Rendered(_) => None,
        }
    }
}

/// A named, failure-isolated part of a view
#[derive(Debug, Clone)]
pub struct FallibleRegion {
    name: String,
    kind: RegionKind,
    show_details: bool,
}

impl FallibleRegion {
    pub fn general(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RegionKind::General,
            show_details: false,
        }
    }

    pub fn booking(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RegionKind::Booking,
            show_details: false,
        }
    }

    pub fn with_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }

    /// Show details everywhere except production
    pub fn for_environment(self, environment: Environment) -> Self {
        self.with_details(environment.exposes_failure_details())
    }

    /// Run `build`, replacing an error or panic with the fallback view
    pub fn render<T, F>(&self, build: F) -> RegionOutput<T>
    where
        F: FnOnce() -> DomainResult<T>,
    {
        match catch_unwind(AssertUnwindSafe(build)) {
            Ok(Ok(content)) => RegionOutput::Rendered(content),
            Ok(Err(e)) => {
                error!(region = %self.name, error = %e, "Region failed to render");
                RegionOutput::Fallback(self.from_error(&e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(region = %self.name, panic = message.as_deref().unwrap_or("<non-string payload>"), "Region panicked");
                RegionOutput::Fallback(self.fallback(
                    FailureDetail {
                        message,
                        stack: None,
                    },
                    true,
                ))
            }
        }
    }

    fn from_error(&self, error: &DomainError) -> FallbackView {
        let retryable = matches!(
            error,
            DomainError::Upstream { .. } | DomainError::Unknown { .. }
        );
        self.fallback(
            FailureDetail {
                message: Some(error.to_string()),
                stack: Some(format!("{error:?}")),
            },
            retryable,
        )
    }

    /// Build the fallback for a failure
    pub fn fallback(&self, detail: FailureDetail, retryable: bool) -> FallbackView {
        let booking_id_error = self.kind == RegionKind::Booking
            && detail.message.as_deref().is_some_and(is_booking_id_error);

        let title = match (self.kind, booking_id_error) {
            (RegionKind::Booking, true) => "This booking link is not valid",
            (RegionKind::Booking, false) => "Booking details could not be displayed",
            (RegionKind::General, _) => "Something went wrong",
        };

        FallbackView {
            region: self.name.clone(),
            title: title.to_string(),
            detail: self.show_details.then_some(detail),
            booking_id_error,
            retryable: retryable && !booking_id_error,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}
