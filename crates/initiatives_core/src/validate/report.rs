use super::{CategoryAdvisory, ValidationReport};
use std::fmt::Write;

/// Renders the human-readable report.
///
/// Layout: a pass/fail headline, the record count, then one indented line per
/// diagnostic and per advisory.
pub fn render_text(report: &ValidationReport, advisories: &[CategoryAdvisory]) -> String {
    let mut out = String::new();
    if report.is_valid() {
        out.push_str("PASS: all initiatives have required fields\n");
    } else {
        let _ = writeln!(
            out,
            "FAIL: {} field issue(s) in {} initiative(s)",
            report.diagnostics.len(),
            report.incomplete_record_count()
        );
    }
    let _ = writeln!(out, "records: {}", report.record_count);

    for diagnostic in &report.diagnostics {
        let _ = writeln!(out, "  {diagnostic}");
    }
    if !advisories.is_empty() {
        out.push_str("advisories:\n");
        for advisory in advisories {
            let _ = writeln!(out, "  {advisory}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use crate::model::initiative::RequiredField;
    use crate::validate::{CategoryAdvisory, Diagnostic, DiagnosticKind, ValidationReport};

    #[test]
    fn renders_passing_report() {
        let report = ValidationReport {
            record_count: 2,
            diagnostics: Vec::new(),
        };
        assert_eq!(
            render_text(&report, &[]),
            "PASS: all initiatives have required fields\nrecords: 2\n"
        );
    }

    #[test]
    fn renders_diagnostics_and_advisories() {
        let report = ValidationReport {
            record_count: 3,
            diagnostics: vec![
                Diagnostic {
                    index: 0,
                    field: RequiredField::Description,
                    kind: DiagnosticKind::Missing,
                },
                Diagnostic {
                    index: 0,
                    field: RequiredField::Icon,
                    kind: DiagnosticKind::Empty,
                },
                Diagnostic {
                    index: 2,
                    field: RequiredField::Title,
                    kind: DiagnosticKind::NotText,
                },
            ],
        };
        let advisories = vec![CategoryAdvisory {
            index: 1,
            category: "space".to_string(),
        }];

        let text = render_text(&report, &advisories);
        assert!(text.starts_with("FAIL: 3 field issue(s) in 2 initiative(s)\n"));
        assert!(text.contains("records: 3\n"));
        assert!(text.contains("  Initiative 0 missing description\n"));
        assert!(text.contains("  Initiative 0 missing icon\n"));
        assert!(text.contains("  Initiative 2 missing title\n"));
        assert!(text.contains("  Initiative 1 uses unknown category `space`\n"));
    }
}
