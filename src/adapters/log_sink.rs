use crate::domain::outcome::{LogEvent, Severity};
use crate::domain::ports::LogSink;
use std::sync::Mutex;

/// Forwards rule events to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&self, event: &LogEvent) {
        let timestamp = event.timestamp.to_rfc3339();
        match event.severity {
            Severity::Info => {
                tracing::info!(rule = %event.rule, %timestamp, "✅ {}", event.message)
            }
            Severity::Warning => {
                tracing::warn!(rule = %event.rule, %timestamp, "⚠️ {}", event.message)
            }
        }
    }
}

/// Keeps every event in memory, for tests and for callers that render the log themselves.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LogSink for MemoryLogSink {
    fn emit(&self, event: &LogEvent) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.clone());
    }
}
