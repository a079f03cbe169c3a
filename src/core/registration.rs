use crate::core::{Course, LogSink, Student, ValidationReport, ValidationRule};
use crate::domain::outcome::LogEvent;
use crate::utils::error::Result;

/// Runs an injected, ordered list of rules against a registration request.
///
/// The coordinator knows nothing about individual rules; adding a check means
/// building it and adding it to the list handed to [`RegistrationCoordinator::new`].
pub struct RegistrationCoordinator {
    rules: Vec<Box<dyn ValidationRule>>,
    sink: Box<dyn LogSink>,
}

impl RegistrationCoordinator {
    pub fn new(rules: Vec<Box<dyn ValidationRule>>, sink: Box<dyn LogSink>) -> Self {
        Self { rules, sink }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluates every rule, in order, and aggregates their verdicts.
    ///
    /// All rules run even after a failure. One event per rule goes to the
    /// sink. A rule returning `Err` aborts the call and the error is returned
    /// as-is.
    pub fn validate(&self, student: &Student, requested: &[Course]) -> Result<ValidationReport> {
        let mut verdicts = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let verdict = rule.evaluate(student, requested)?;
            self.sink.emit(&LogEvent::for_verdict(&verdict));
            verdicts.push(verdict);
        }

        Ok(ValidationReport::new(student.id(), verdicts))
    }
}
