use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid {record} record: field '{field}' {reason}")]
    InvalidRecord {
        record: String,
        field: String,
        reason: String,
    },

    #[error("Student {student} requested course {code} more than once")]
    DuplicateRequest { student: String, code: String },

    #[error("Course {code} is defined more than once in the catalog")]
    DuplicateCourse { code: String },

    #[error("Course {code} is not in the catalog")]
    UnknownCourse { code: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Rule '{rule}' failed unexpectedly: {message}")]
    RuleFault { rule: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Rule,
    System,
}

/// `krs-check` exit status when every rule passed.
pub const EXIT_ACCEPTED: u8 = 0;
/// `krs-check` exit status when at least one rule failed.
pub const EXIT_REJECTED: u8 = 1;

impl ErrorCategory {
    /// `krs-check` exit status for an error of this category.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::System => 2,
            ErrorCategory::Rule => 3,
        }
    }
}

impl RegistrationError {
    pub fn invalid_record(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            record: record.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRecord { .. }
            | Self::DuplicateRequest { .. }
            | Self::DuplicateCourse { .. }
            | Self::UnknownCourse { .. } => ErrorCategory::Input,
            Self::InvalidConfigValue { .. } | Self::ConfigParse { .. } => {
                ErrorCategory::Configuration
            }
            Self::RuleFault { .. } => ErrorCategory::Rule,
            Self::Io(_) | Self::Csv(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The registration data is invalid: {}", self),
            ErrorCategory::Configuration => format!("The plan file is invalid: {}", self),
            ErrorCategory::Rule => format!("A validation rule is misconfigured: {}", self),
            ErrorCategory::System => format!("Could not read input: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidRecord { .. } => {
                "Check credits are positive and every meeting starts before it ends"
            }
            Self::DuplicateRequest { .. } => "Remove the repeated course from the requested list",
            Self::DuplicateCourse { .. } => "Keep a single definition per course code",
            Self::UnknownCourse { .. } => "Add the course to [[courses]] or the CSV catalog",
            Self::InvalidConfigValue { .. } | Self::ConfigParse { .. } => {
                "Fix the plan file and run again"
            }
            Self::RuleFault { .. } => "Check the rule list in [policy]",
            Self::Io(_) => "Make sure the file exists and is readable",
            Self::Csv(_) => "Check the catalog header is code,name,credits,prerequisites,schedule",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
