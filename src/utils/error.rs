use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Could not connect. {source}")]
    ConnectionError {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Could not prepare query {sql}. {source}")]
    PrepareError {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Could not insert row {row}. {source}")]
    ExecuteError {
        row: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connection,
    Statement,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl LoaderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LoaderError::ConnectionError { .. } => ErrorCategory::Connection,
            LoaderError::PrepareError { .. }
            | LoaderError::ExecuteError { .. }
            | LoaderError::DatabaseError(_) => ErrorCategory::Statement,
            LoaderError::ConfigValidationError { .. }
            | LoaderError::InvalidConfigValueError { .. }
            | LoaderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LoaderError::ValidationError { .. } => ErrorCategory::Data,
            LoaderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Connection | ErrorCategory::System => ErrorSeverity::Critical,
            ErrorCategory::Statement | ErrorCategory::Configuration | ErrorCategory::Data => {
                ErrorSeverity::High
            }
        }
    }

    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LoaderError::ConnectionError { .. } => {
                "Check that the database server is running and that host, user, password and database are correct"
            }
            LoaderError::PrepareError { .. } => {
                "Check that the target table exists and that its column names match the insert statement"
            }
            LoaderError::ExecuteError { .. } => {
                "Check the row values against the table constraints (lengths, uniqueness, NOT NULL)"
            }
            LoaderError::DatabaseError(_) => "Inspect the database server logs for details",
            LoaderError::IoError(_) => "Check that the file exists and is readable",
            LoaderError::ConfigValidationError { .. }
            | LoaderError::InvalidConfigValueError { .. }
            | LoaderError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            LoaderError::ValidationError { .. } => {
                "Every guest needs a first name, a last name and a valid email address"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("ERROR: {}", self)
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_is_fatal() {
        let err = LoaderError::ConnectionError {
            url: "mysql://root@localhost/demo".to_string(),
            source: sqlx::Error::PoolTimedOut,
        };
        assert_eq!(err.category(), ErrorCategory::Connection);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().starts_with("ERROR: Could not connect."));
    }

    #[test]
    fn test_prepare_error_message_embeds_sql() {
        let err = LoaderError::PrepareError {
            sql: "INSERT INTO t(a, b, c) VALUES (?, ?, ?)".to_string(),
            source: sqlx::Error::RowNotFound,
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("ERROR: Could not prepare query INSERT INTO t(a, b, c)"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_errors_are_configuration_failures() {
        let err = LoaderError::InvalidConfigValueError {
            field: "insert.table".to_string(),
            value: "bad name".to_string(),
            reason: "not an identifier".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }
}
