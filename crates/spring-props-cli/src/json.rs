//! Machine-readable report for `spring-props check --format json`.

use serde::Serialize;
use spring_props_core::diagnostics::{Diagnostic, DiagnosticLevel};
use std::path::Path;

/// Whole `check` run: tool version, how many YAML files were parsed, and what
/// was found in them.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub version: &'static str,
    pub files_checked: usize,
    pub diagnostics: Vec<ReportEntry>,
    pub summary: Tally,
}

/// One finding. Positions are 1-based; `end_column` is exclusive and never
/// precedes `column`.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub level: &'static str,
    pub rule: String,
    /// Relative to the checked directory, `/`-separated.
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub end_column: usize,
    pub message: String,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct Tally {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Tally {
    fn count(&mut self, level: DiagnosticLevel) {
        match level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.info += 1,
        }
    }
}

fn level_name(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "error",
        DiagnosticLevel::Warning => "warning",
        DiagnosticLevel::Info => "info",
    }
}

/// `path` as reported in JSON: `base` stripped when it is a prefix.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

impl ReportEntry {
    fn new(diag: &Diagnostic, base: &Path) -> Self {
        let column = diag.column.max(1);
        Self {
            level: level_name(diag.level),
            rule: diag.rule.clone(),
            file: display_path(&diag.file, base),
            line: diag.line.max(1),
            column,
            end_column: diag.end_column.max(column),
            message: diag.message.clone(),
        }
    }
}

impl CheckReport {
    pub fn build(diagnostics: &[Diagnostic], base: &Path, files_checked: usize) -> Self {
        let mut summary = Tally::default();
        for diag in diagnostics {
            summary.count(diag.level);
        }
        Self {
            version: env!("CARGO_PKG_VERSION"),
            files_checked,
            diagnostics: diagnostics
                .iter()
                .map(|diag| ReportEntry::new(diag, base))
                .collect(),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn syntax_error(file: &str, line: usize, column: usize) -> Diagnostic {
        Diagnostic::error(
            PathBuf::from(file),
            line,
            column,
            "yaml::syntax",
            "YAML syntax error: mapping values are not allowed in this context".to_string(),
        )
    }

    #[test]
    fn test_clean_run_reports_file_count_only() {
        let report = CheckReport::build(&[], Path::new("."), 3);
        assert_eq!(report.files_checked, 3);
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.summary, Tally::default());
    }

    #[test]
    fn test_tally_counts_every_level() {
        let mut warning = syntax_error("/w/application.yml", 1, 1);
        warning.level = DiagnosticLevel::Warning;
        let mut info = syntax_error("/w/application.yml", 2, 1);
        info.level = DiagnosticLevel::Info;

        let report = CheckReport::build(
            &[syntax_error("/w/application.yml", 3, 1), warning, info],
            Path::new("/w"),
            1,
        );
        assert_eq!(
            report.summary,
            Tally {
                errors: 1,
                warnings: 1,
                info: 1
            }
        );
        let levels: Vec<_> = report.diagnostics.iter().map(|d| d.level).collect();
        assert_eq!(levels, ["error", "warning", "info"]);
    }

    #[test]
    fn test_nested_resource_path_is_relative_with_forward_slashes() {
        assert_eq!(
            display_path(
                Path::new("/svc/src/main/resources/application-dev.yaml"),
                Path::new("/svc")
            ),
            "src/main/resources/application-dev.yaml"
        );
        assert_eq!(
            display_path(Path::new("config\\application.yml"), Path::new("elsewhere")),
            "config/application.yml"
        );
    }

    #[test]
    fn test_entry_keeps_span_and_rule() {
        let diag = syntax_error("/svc/application.yml", 2, 9).with_end_column(14);
        let report = CheckReport::build(&[diag], Path::new("/svc"), 1);

        let entry = &report.diagnostics[0];
        assert_eq!(entry.file, "application.yml");
        assert_eq!((entry.line, entry.column, entry.end_column), (2, 9, 14));
        assert_eq!(entry.rule, "yaml::syntax");
        assert!(entry.message.starts_with("YAML syntax error"));
    }

    #[test]
    fn test_unknown_position_reported_as_first_column() {
        let report =
            CheckReport::build(&[syntax_error("/svc/application.yml", 0, 0)], Path::new("/svc"), 1);
        let entry = &report.diagnostics[0];
        assert_eq!((entry.line, entry.column, entry.end_column), (1, 1, 1));
    }

    #[test]
    fn test_serialized_shape() {
        let report =
            CheckReport::build(&[syntax_error("/svc/application.yml", 2, 9)], Path::new("/svc"), 1);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["summary"]["errors"], 1);
        assert_eq!(value["diagnostics"][0]["level"], "error");
        assert_eq!(value["diagnostics"][0]["end_column"], 9);
        assert!(value["version"].is_string());
    }
}
