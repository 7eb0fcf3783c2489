//! Decoration service catalog.

mod service;

pub use service::CatalogService;
