use crate::domain::model::{Course, Student};
use crate::domain::outcome::{LogEvent, Verdict};
use crate::utils::error::Result;

/// A single, independent registration check.
///
/// Implementations must be pure: the verdict depends only on the arguments,
/// so rules can run in any order and be tested alone. A business-rule failure
/// is `Ok(Verdict { passed: false, .. })`; `Err` is reserved for a rule that
/// cannot do its job at all and is propagated to the caller untouched.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, student: &Student, requested: &[Course]) -> Result<Verdict>;
}

/// Side channel receiving one event per rule execution.
pub trait LogSink: Send + Sync {
    fn emit(&self, event: &LogEvent);
}

impl<T: LogSink + ?Sized> LogSink for std::sync::Arc<T> {
    fn emit(&self, event: &LogEvent) {
        (**self).emit(event)
    }
}
