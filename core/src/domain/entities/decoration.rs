//! Decoration service catalog entry.

use dm_shared::utils::validation::validators;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// A bookable decoration package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationService {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(alias = "service_name")]
    pub name: String,

    pub cost: f64,

    /// Pricing unit, e.g. "per event" or "per sq-ft"
    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,
}

fn default_active() -> bool {
    true
}

/// Admin-editable fields of a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl ServiceDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("service name is required"));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DomainError::validation("service cost must be a non-negative amount"));
        }
        if let Some(bad) = self.images.iter().find(|url| !validators::is_valid_url(url)) {
            return Err(DomainError::validation(format!("invalid image url: {bad}")));
        }
        Ok(())
    }
}

impl DecorationService {
    pub fn from_draft(id: impl Into<String>, draft: ServiceDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            cost: draft.cost,
            unit: draft.unit,
            category: draft.category,
            description: draft.description,
            images: draft.images,
            is_active: true,
            is_featured: draft.is_featured,
        }
    }

    pub fn apply(&mut self, draft: ServiceDraft) {
        self.name = draft.name.trim().to_string();
        self.cost = draft.cost;
        self.unit = draft.unit;
        self.category = draft.category;
        self.description = draft.description;
        self.images = draft.images;
        self.is_featured = draft.is_featured;
    }
}
