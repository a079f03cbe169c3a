pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::log_sink::{MemoryLogSink, TracingLogSink};
pub use app::rules::{
    build_rules, CreditLimitRule, PrerequisiteRule, RuleKind, ScheduleConflictRule,
    DEFAULT_MAX_CREDITS,
};
pub use app::validate_plan;
pub use config::plan_config::{PlanConfig, PolicyConfig};
pub use crate::core::{
    catalog::CourseCatalog, registration::RegistrationCoordinator, Boundary, Course, LogEvent,
    LogSink, Meeting, Severity, Student, TimeOfDay, ValidationReport, ValidationRule, Verdict,
    Violation,
};
pub use utils::error::{RegistrationError, Result};
