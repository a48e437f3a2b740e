//! Findings and the append-only collector that owns them during a run

use ccda_models::SourceLocation;
use serde::{Deserialize, Serialize};

/// Locator used when no finer location is known.
pub const DOCUMENT_ROOT: &str = "/ClinicalDocument";

/// Line indicator used when the line is unknown.
pub const UNKNOWN_LINE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// One reported conformance deviation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,
    pub severity: Severity,
    pub location: String,
    pub line: String,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            location: DOCUMENT_ROOT.to_string(),
            line: UNKNOWN_LINE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }
}

/// Ordered, append-only finding log.
///
/// Every rule firing appends exactly one entry; nothing is merged,
/// de-duplicated, edited or removed.
#[derive(Debug, Clone)]
pub struct FindingCollector {
    findings: Vec<Finding>,
    default_location: String,
    default_line: String,
}

impl Default for FindingCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FindingCollector {
    pub fn new() -> Self {
        Self::with_defaults(DOCUMENT_ROOT, UNKNOWN_LINE)
    }

    pub fn with_defaults(location: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            findings: Vec::new(),
            default_location: location.into(),
            default_line: line.into(),
        }
    }

    /// Append a finding, located at `at` where known.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, at: Option<&SourceLocation>) {
        let location = at
            .and_then(|l| l.path.clone())
            .unwrap_or_else(|| self.default_location.clone());
        let line = at
            .and_then(|l| l.line)
            .map(|l| l.to_string())
            .unwrap_or_else(|| self.default_line.clone());

        self.findings.push(
            Finding::new(severity, message)
                .with_location(location)
                .with_line(line),
        );
    }

    pub fn error(&mut self, message: impl Into<String>, at: Option<&SourceLocation>) {
        self.push(Severity::Error, message, at);
    }

    /// Move every finding of `other` to the end of this log, keeping order.
    pub fn append(&mut self, other: FindingCollector) {
        self.findings.extend(other.findings);
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_location_unknown() {
        let mut collector = FindingCollector::new();
        collector.error("missing", None);

        let finding = &collector.findings()[0];
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.location, "/ClinicalDocument");
        assert_eq!(finding.line, "0");
    }

    #[test]
    fn test_source_location_is_used_when_known() {
        let mut collector = FindingCollector::new();
        let at = SourceLocation::new("/ClinicalDocument[1]/component[1]", 42);
        collector.push(Severity::Warning, "mismatch", Some(&at));

        let finding = &collector.findings()[0];
        assert_eq!(finding.location, "/ClinicalDocument[1]/component[1]");
        assert_eq!(finding.line, "42");
    }

    #[test]
    fn test_partial_location_falls_back_per_field() {
        let mut collector = FindingCollector::with_defaults("/doc", "-");
        let at = SourceLocation {
            path: None,
            line: Some(7),
        };
        collector.error("x", Some(&at));
        assert_eq!(collector.findings()[0].location, "/doc");
        assert_eq!(collector.findings()[0].line, "7");
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut first = FindingCollector::new();
        first.error("a", None);
        let mut second = FindingCollector::new();
        second.error("b", None);
        second.error("b", None);

        first.append(second);
        let messages: Vec<_> = first.findings().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "b"]);
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_value(Finding::info("matched")).unwrap();
        assert_eq!(json["severity"], "INFO");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
    }
}
