//! Catalog field-completeness validation.
//!
//! # Responsibility
//! - Scan candidate records for the six required fields.
//! - Collect every missing/empty field as a non-fatal diagnostic.
//!
//! # Invariants
//! - Single pass, stateless: the same input always yields the same report.
//! - Diagnostics are ordered by record index, then canonical field order.
//! - At most one diagnostic per (record, field) pair.
//! - Parse failures never produce a partial report.

use crate::catalog::{parse_catalog, CandidateRecord, CatalogFormat, CatalogParseError};
use crate::model::initiative::{
    is_known_category, RequiredField, FIELD_CATEGORY, REQUIRED_FIELDS,
};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

mod report;

pub use report::render_text;

/// Why a required field failed the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Key absent or explicitly `null`.
    Missing,
    /// The empty string. Whitespace-only text counts as present.
    Empty,
    /// A non-text value with no content: `false` or a zero number.
    NotText,
}

/// One field-completeness issue tied to a record position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 0-based position of the record in the catalog.
    pub index: usize,
    pub field: RequiredField,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Report line, e.g. `Initiative 0 missing description`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Initiative {} missing {}", self.index, self.field)
    }
}

/// Aggregate result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub record_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// `true` when no diagnostics were produced.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostic report lines in order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }

    /// Number of distinct records with at least one diagnostic.
    pub fn incomplete_record_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for diagnostic in &self.diagnostics {
            if last != Some(diagnostic.index) {
                count += 1;
                last = Some(diagnostic.index);
            }
        }
        count
    }
}

/// Parses `source` and validates every record.
///
/// # Errors
/// Returns `CatalogParseError` when the source is not a sequence of records;
/// field issues are reported in the `Ok` value instead.
pub fn validate_source(
    source: &str,
    format: CatalogFormat,
) -> Result<ValidationReport, CatalogParseError> {
    let records = parse_catalog(source, format).map_err(|err| {
        warn!(
            "event=catalog_validate module=validator status=parse_error format={}",
            format
        );
        err
    })?;
    Ok(validate_records(&records))
}

/// Validates already-parsed candidate records.
pub fn validate_records(records: &[CandidateRecord]) -> ValidationReport {
    let diagnostics: Vec<Diagnostic> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| check_record(index, record))
        .collect();

    let report = ValidationReport {
        record_count: records.len(),
        diagnostics,
    };
    info!(
        "event=catalog_validate module=validator status={} records={} diagnostics={}",
        if report.is_valid() { "ok" } else { "incomplete" },
        report.record_count,
        report.diagnostics.len()
    );
    report
}

/// Checks one record; `index` only tags the produced diagnostics.
pub fn check_record(index: usize, record: &CandidateRecord) -> Vec<Diagnostic> {
    REQUIRED_FIELDS
        .iter()
        .filter_map(|&field| {
            let kind = field_issue(record.get(field.as_str()))?;
            debug!(
                "event=record_incomplete module=validator index={} field={} kind={:?}",
                index, field, kind
            );
            Some(Diagnostic { index, field, kind })
        })
        .collect()
}

/// A field passes when its value is truthy in the catalog's original
/// JavaScript sense: any non-empty string, `true`, a non-zero number, or any
/// list or map.
fn field_issue(value: Option<&Value>) -> Option<DiagnosticKind> {
    match value {
        None | Some(Value::Null) => Some(DiagnosticKind::Missing),
        Some(Value::String(text)) if text.is_empty() => Some(DiagnosticKind::Empty),
        Some(Value::Bool(false)) => Some(DiagnosticKind::NotText),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            Some(DiagnosticKind::NotText)
        }
        Some(_) => None,
    }
}

/// Record whose category is outside `known_categories()`.
///
/// Advisory only; never part of `ValidationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAdvisory {
    pub index: usize,
    pub category: String,
}

impl Display for CategoryAdvisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Initiative {} uses unknown category `{}`",
            self.index, self.category
        )
    }
}

/// Lists records whose non-empty text category is not a known category.
///
/// Records with a missing or empty category are already covered by
/// diagnostics and are skipped here.
pub fn category_advisories(records: &[CandidateRecord]) -> Vec<CategoryAdvisory> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.get(FIELD_CATEGORY) {
            Some(Value::String(category))
                if !category.trim().is_empty() && !is_known_category(category) =>
            {
                Some(CategoryAdvisory {
                    index,
                    category: category.trim().to_string(),
                })
            }
            _ => None,
        })
        .collect()
}
