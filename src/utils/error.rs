use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Background task failed: {message}")]
    TaskError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("One course should have no more than {max} students")]
    EnrollmentLimitExceeded { max: usize, requested: usize },

    #[error("Invalid field '{field}': {message}")]
    FieldValidationError { field: String, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Storage,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CourseError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::EnrollmentLimitExceeded { .. }
            | Self::FieldValidationError { .. }
            | Self::NotFound { .. } => ErrorCategory::Validation,
            Self::DatabaseError(_) | Self::IoError(_) => ErrorCategory::Storage,
            Self::TaskError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 請求端造成的錯誤 (4xx)
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "The course database could not be accessed".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "Check that the database file is writable and not locked",
            Self::IoError(_) => "Check file paths and permissions",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the TOML file and command line flags, then restart"
            }
            Self::EnrollmentLimitExceeded { .. } => {
                "Submit fewer students or raise max_students_per_course"
            }
            Self::NotFound { .. } => "Check the identifier and try again",
            Self::FieldValidationError { .. } => "Correct the request body and try again",
            Self::TaskError { .. } => "Retry the request; report it if it keeps failing",
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_error_message_names_limit() {
        let err = CourseError::EnrollmentLimitExceeded {
            max: 20,
            requested: 21,
        };
        assert_eq!(
            err.to_string(),
            "One course should have no more than 20 students"
        );
        assert!(err.is_client_error());
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_are_not_client_errors() {
        let err = CourseError::InvalidConfigValueError {
            field: "database.path".to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_client_error());
        assert!(err.user_friendly_message().contains("database.path"));
    }
}
