// Application layer: concrete rules and the plan-file use case wiring them together.

pub mod rules;

use crate::config::plan_config::PlanConfig;
use crate::core::registration::RegistrationCoordinator;
use crate::domain::outcome::ValidationReport;
use crate::domain::ports::LogSink;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Validates the plan's student against the plan's own policy and course offer.
pub fn validate_plan(plan: &PlanConfig, sink: Box<dyn LogSink>) -> Result<ValidationReport> {
    plan.validate()?;

    let catalog = plan.load_catalog()?;
    let requested = catalog.resolve(&plan.student)?;
    let coordinator = RegistrationCoordinator::new(rules::build_rules(&plan.policy)?, sink);

    tracing::info!(
        "Validating registration for {} ({} courses, rules: {})",
        plan.student.name(),
        requested.len(),
        coordinator.rule_names().join(", ")
    );

    let report = coordinator.validate(&plan.student, &requested)?;

    if report.is_pass() {
        tracing::info!("All {} checks passed", report.verdicts.len());
    } else {
        tracing::error!("Validation failed with {} error(s)", report.failure_count());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::log_sink::MemoryLogSink;
    use std::sync::Arc;

    const DEMO: &str = r#"
[student]
id = "2201"
name = "Ani"
completed = ["MAT101"]
requested = ["MAT101", "FIS201", "IFS300"]

[[courses]]
code = "MAT101"
name = "Matematika Dasar"
credits = 3
schedule = [{ day = "Mon", start = "09:00", end = "11:00" }]

[[courses]]
code = "FIS201"
name = "Fisika I"
credits = 4
prerequisites = ["MAT101"]
schedule = [{ day = "Mon", start = "10:30", end = "12:00" }]

[[courses]]
code = "IFS300"
name = "Ilmu Komputer Lanjut"
credits = 3
prerequisites = ["MAT101", "FIS201"]
schedule = [{ day = "Tue", start = "09:00", end = "11:00" }]
"#;

    #[test]
    fn test_demo_plan_rejected_for_prerequisite_and_conflict() {
        let plan = PlanConfig::from_toml_str(DEMO).unwrap();
        let sink = Arc::new(MemoryLogSink::new());

        let report = validate_plan(&plan, Box::new(Arc::clone(&sink))).unwrap();

        assert!(!report.is_pass());
        assert!(report.verdict("credit_limit").is_some_and(|v| v.is_pass()));
        assert!(report
            .verdict("prerequisite")
            .is_some_and(|v| !v.is_pass() && v.mentions("IFS300")));
        assert!(report
            .verdict("schedule_conflict")
            .is_some_and(|v| v.mentions("MAT101") && v.mentions("FIS201")));
        assert_eq!(sink.events().len(), 3);
    }

    #[test]
    fn test_unknown_requested_course_is_an_error() {
        let content = DEMO.replace(r#""IFS300"]"#, r#""IFS300", "IFS999"]"#);
        let plan = PlanConfig::from_toml_str(&content).unwrap();
        assert!(validate_plan(&plan, Box::new(MemoryLogSink::new())).is_err());
    }
}
