//! Initiative record model.
//!
//! # Responsibility
//! - Define the six required fields and their canonical order.
//! - Provide the typed record loaded from a catalog that validated.
//!
//! # Invariants
//! - `REQUIRED_FIELDS` order is the order diagnostics are emitted per record.
//! - Category is an open string; `KNOWN_CATEGORIES` is advisory only.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Wire name of the `title` field.
pub const FIELD_TITLE: &str = "title";
/// Wire name of the `description` field.
pub const FIELD_DESCRIPTION: &str = "description";
/// Wire name of the `category` field.
pub const FIELD_CATEGORY: &str = "category";
/// Wire name of the `impact` field.
pub const FIELD_IMPACT: &str = "impact";
/// Wire name of the `beneficiaries` field.
pub const FIELD_BENEFICIARIES: &str = "beneficiaries";
/// Wire name of the `icon` field.
pub const FIELD_ICON: &str = "icon";

/// One of the fields every initiative must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    Description,
    Category,
    Impact,
    Beneficiaries,
    Icon,
}

/// Required fields in canonical check order.
pub const REQUIRED_FIELDS: [RequiredField; 6] = [
    RequiredField::Title,
    RequiredField::Description,
    RequiredField::Category,
    RequiredField::Impact,
    RequiredField::Beneficiaries,
    RequiredField::Icon,
];

impl RequiredField {
    /// Stable key used in catalog documents and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => FIELD_TITLE,
            Self::Description => FIELD_DESCRIPTION,
            Self::Category => FIELD_CATEGORY,
            Self::Impact => FIELD_IMPACT,
            Self::Beneficiaries => FIELD_BENEFICIARIES,
            Self::Icon => FIELD_ICON,
        }
    }
}

impl Display for RequiredField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const KNOWN_CATEGORIES: &[&str] = &[
    "agriculture",
    "education",
    "emergency",
    "employment",
    "environment",
    "finance",
    "food",
    "healthcare",
    "housing",
    "social",
    "technology",
    "water",
];

/// Categories the published catalog uses today.
///
/// Not a closed set: unknown categories only produce advisories in strict mode.
pub fn known_categories() -> &'static [&'static str] {
    KNOWN_CATEGORIES
}

/// Returns whether `category` is one of the catalog's known categories.
pub fn is_known_category(category: &str) -> bool {
    KNOWN_CATEGORIES.contains(&category.trim())
}

/// Typed initiative record.
///
/// Only built from candidates that passed validation; a field that passed
/// with a non-text value still fails typed decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeRecord {
    pub title: String,
    pub description: String,
    /// Open set, e.g. `education`, `healthcare`.
    pub category: String,
    /// Short impact statement, e.g. `Reduces education costs by 60%`.
    pub impact: String,
    /// Free text audience estimate, e.g. `10M+ students`.
    pub beneficiaries: String,
    /// Icon identifier token, e.g. `graduation-cap`.
    pub icon: String,
}
