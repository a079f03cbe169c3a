use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single offending item found by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Course codes involved, in request order.
    pub courses: Vec<String>,
    pub message: String,
}

impl Violation {
    pub fn new<I, S>(courses: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            courses: courses.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

/// Outcome of one rule applied to one registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub rule: String,
    pub passed: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn pass(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            passed: true,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// A failing verdict whose message is `summary` followed by each violation.
    pub fn fail(rule: impl Into<String>, summary: &str, violations: Vec<Violation>) -> Self {
        let message = if violations.is_empty() {
            summary.to_string()
        } else {
            let details: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
            format!("{}: {}", summary, details.join("; "))
        };
        Self {
            rule: rule.into(),
            passed: false,
            message,
            violations,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.passed
    }

    /// Whether any violation names `code`.
    pub fn mentions(&self, code: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.courses.iter().any(|c| c == code))
    }
}

/// Aggregate of every rule's verdict for one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub student_id: String,
    pub verdicts: Vec<Verdict>,
}

impl ValidationReport {
    pub fn new(student_id: impl Into<String>, verdicts: Vec<Verdict>) -> Self {
        Self {
            student_id: student_id.into(),
            verdicts,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.verdicts.iter().all(Verdict::is_pass)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn verdict(&self, rule: &str) -> Option<&Verdict> {
        self.verdicts.iter().find(|v| v.rule == rule)
    }
}

/// Level of a per-rule log event: `Info` for a passing rule, `Warning` for a failing one.
///
/// Errors that stop validation are returned as `RegistrationError`, never logged to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn for_verdict(verdict: &Verdict) -> Self {
        Self {
            severity: if verdict.passed {
                Severity::Info
            } else {
                Severity::Warning
            },
            rule: verdict.rule.clone(),
            message: verdict.message.clone(),
            timestamp: Utc::now(),
        }
    }
}
