//! Core logic for the social-impact initiative catalog.
//! This crate owns the record shape, catalog parsing, field validation and
//! duplicate detection; presentation lives in the CLI.

pub mod catalog;
pub mod config;
pub mod duplicates;
pub mod logging;
pub mod model;
pub mod validate;

pub use catalog::{
    load_catalog, load_records, parse_catalog, CandidateRecord,
    CatalogFormat, CatalogLoadError, CatalogParseError,
};
pub use config::{CheckConfig, ConfigError};
pub use duplicates::{
    keyword_overlap, normalize_text, related_groups, scan_duplicates, similarity_ratio,
    DuplicateReport, ExactDuplicate, RelatedGroup, SimilarPair, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::initiative::{
    known_categories, InitiativeRecord, RequiredField, REQUIRED_FIELDS,
};
pub use validate::{
    category_advisories, check_record, render_text, validate_records, validate_source,
    CategoryAdvisory, Diagnostic, DiagnosticKind, ValidationReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
