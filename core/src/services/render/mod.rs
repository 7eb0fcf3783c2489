//! Fallible render regions
//!
//! A region runs one piece of view-building code and turns any error or
//! panic inside it into a fallback view, so one broken panel never takes
//! the rest of the page down.

mod region;

pub use region::{FailureDetail, FallbackView, FallibleRegion, RegionKind, RegionOutput};
