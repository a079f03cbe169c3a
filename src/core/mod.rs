pub mod catalog;
pub mod registration;

pub use crate::domain::model::{Boundary, Course, Meeting, Student, TimeOfDay};
pub use crate::domain::outcome::{LogEvent, Severity, ValidationReport, Verdict, Violation};
pub use crate::domain::ports::{LogSink, ValidationRule};
pub use crate::utils::error::Result;
