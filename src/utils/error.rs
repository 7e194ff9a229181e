use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaudeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Failed to load municipal data: {message}")]
    DataLoadError { message: String },

    #[error("No user registered for CPF {cpf}")]
    NotFoundError { cpf: String },

    #[error("CPF {cpf} is already registered")]
    ConflictError { cpf: String },

    #[error("Invalid credentials for CPF {cpf}")]
    CredentialError { cpf: String },

    #[error("User API returned an unexpected response: {message}")]
    UnexpectedResponseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    UserInput,
    Configuration,
    System,
}

impl SaudeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SaudeError::ApiError(_) | SaudeError::UnexpectedResponseError { .. } => {
                ErrorCategory::Network
            }
            SaudeError::CsvError(_) | SaudeError::DataLoadError { .. } => ErrorCategory::Data,
            SaudeError::ValidationError { .. }
            | SaudeError::NotFoundError { .. }
            | SaudeError::ConflictError { .. }
            | SaudeError::CredentialError { .. } => ErrorCategory::UserInput,
            SaudeError::ConfigError { .. } | SaudeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            SaudeError::IoError(_) | SaudeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SaudeError::ValidationError { .. }
            | SaudeError::NotFoundError { .. }
            | SaudeError::ConflictError { .. }
            | SaudeError::CredentialError { .. } => ErrorSeverity::Low,
            SaudeError::ApiError(_) | SaudeError::UnexpectedResponseError { .. } => {
                ErrorSeverity::Medium
            }
            SaudeError::CsvError(_) | SaudeError::DataLoadError { .. } => ErrorSeverity::High,
            SaudeError::ConfigError { .. }
            | SaudeError::InvalidConfigValueError { .. }
            | SaudeError::IoError(_)
            | SaudeError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SaudeError::ApiError(_) => {
                "Could not reach the user registry service. Check your connection.".to_string()
            }
            SaudeError::UnexpectedResponseError { .. } => {
                "The user registry service answered in an unexpected way.".to_string()
            }
            SaudeError::CsvError(_) | SaudeError::DataLoadError { .. } => {
                "The municipality data source could not be loaded.".to_string()
            }
            SaudeError::ValidationError { message } => message.clone(),
            SaudeError::NotFoundError { .. } => "CPF not found in the system.".to_string(),
            SaudeError::ConflictError { .. } => "This CPF is already in use.".to_string(),
            SaudeError::CredentialError { .. } => "Incorrect password.".to_string(),
            SaudeError::ConfigError { message } => format!("Configuration problem: {}", message),
            SaudeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            SaudeError::IoError(_) => "A local file operation failed.".to_string(),
            SaudeError::SerializationError(_) => {
                "Received a malformed response from the service.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Verify the API endpoint is reachable and try again.".to_string()
            }
            ErrorCategory::Data => {
                "Check that the data file exists and has the expected ';'-delimited layout."
                    .to_string()
            }
            ErrorCategory::UserInput => "Correct the submitted data and resubmit.".to_string(),
            ErrorCategory::Configuration => {
                "Review the CLI flags or TOML configuration file.".to_string()
            }
            ErrorCategory::System => "Check file permissions and disk state.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SaudeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_user_input() {
        let err = SaudeError::ValidationError {
            message: "CPF inválido".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::UserInput);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_data_load_error_is_high_severity() {
        let err = SaudeError::DataLoadError {
            message: "empty source".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("municipality data"));
    }

    #[test]
    fn test_conflict_error_message_names_cpf() {
        let err = SaudeError::ConflictError {
            cpf: "12345678909".to_string(),
        };
        assert!(err.to_string().contains("12345678909"));
    }
}
