use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::state::ComponentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Guard,
    TickCounter,
    HelperImport,
    Memoize,
    Extract,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Guard => "guard",
            Operation::TickCounter => "tick counter",
            Operation::HelperImport => "helper import",
            Operation::Memoize => "memoize",
            Operation::Extract => "extract",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Failure,
}

/// A warning or failure tied to one component (or output file).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub subject: String,
    pub operation: Operation,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub file_name: String,
    pub found: usize,
    pub total: usize,
    pub written: bool,
    pub missing: Vec<String>,
}

/// End-of-run report: counts per operation plus every warning and failure.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub tallies: BTreeMap<Operation, Tally>,
    pub findings: Vec<Finding>,
    pub categories: Vec<CategoryReport>,
    pub components: BTreeMap<String, ComponentState>,
}

impl RunSummary {
    pub fn tally(&self, op: Operation) -> Tally {
        self.tallies.get(&op).copied().unwrap_or_default()
    }

    pub fn succeeded(&mut self, op: Operation) {
        self.tallies.entry(op).or_default().succeeded += 1;
    }

    pub fn skipped(&mut self, op: Operation) {
        self.tallies.entry(op).or_default().skipped += 1;
    }

    pub fn skipped_with_warning(
        &mut self,
        op: Operation,
        subject: &str,
        message: impl Into<String>,
    ) {
        self.skipped(op);
        self.warn(op, subject, message);
    }

    pub fn warn(&mut self, op: Operation, subject: &str, message: impl Into<String>) {
        self.findings.push(Finding {
            subject: subject.to_string(),
            operation: op,
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn failed(&mut self, op: Operation, subject: &str, message: impl Into<String>) {
        self.tallies.entry(op).or_default().failed += 1;
        self.findings.push(Finding {
            subject: subject.to_string(),
            operation: op,
            severity: Severity::Failure,
            message: message.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Failure)
    }

    pub fn findings_for<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.subject == subject)
    }

    pub fn category(&self, file_name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.file_name == file_name)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Summary ===")?;
        for (op, t) in &self.tallies {
            writeln!(
                f,
                "  {:<14} {} succeeded, {} skipped, {} failed",
                op.as_str(),
                t.succeeded,
                t.skipped,
                t.failed
            )?;
        }

        if !self.categories.is_empty() {
            writeln!(f, "\n=== Categories ===")?;
            for c in &self.categories {
                let status = if c.written { "" } else { " (not written)" };
                writeln!(
                    f,
                    "  {:<28} {}/{} extracted{}",
                    c.file_name, c.found, c.total, status
                )?;
            }
        }

        if !self.findings.is_empty() {
            writeln!(f, "\n=== Warnings and Failures ===")?;
            for finding in &self.findings {
                let tag = match finding.severity {
                    Severity::Warning => "warning",
                    Severity::Failure => "FAILED",
                };
                writeln!(
                    f,
                    "  [{}] {} ({}): {}",
                    tag,
                    finding.subject,
                    finding.operation.as_str(),
                    finding.message
                )?;
            }
        }

        Ok(())
    }
}
