use crate::domain::model::{Course, Student};
use crate::domain::outcome::{Verdict, Violation};
use crate::domain::ports::ValidationRule;
use crate::utils::error::Result;

/// Every prerequisite of every requested course must already be completed.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteRule;

impl PrerequisiteRule {
    pub const NAME: &'static str = "prerequisite";

    pub fn new() -> Self {
        Self
    }
}

impl ValidationRule for PrerequisiteRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, student: &Student, requested: &[Course]) -> Result<Verdict> {
        let violations: Vec<Violation> = requested
            .iter()
            .filter_map(|course| {
                // BTreeSet iteration keeps the missing codes sorted
                let missing: Vec<&str> = course
                    .prerequisites()
                    .iter()
                    .filter(|p| !student.has_completed(p))
                    .map(String::as_str)
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(Violation::new(
                        [course.code()],
                        format!("{} requires {}", course.code(), missing.join(", ")),
                    ))
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(Verdict::pass(Self::NAME, "All prerequisites satisfied"))
        } else {
            Ok(Verdict::fail(Self::NAME, "Unmet prerequisites", violations))
        }
    }
}
