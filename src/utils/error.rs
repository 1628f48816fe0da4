use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Failed to read source '{source_id}': {source}")]
    SourceRead {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source '{source_id}' is not valid UTF-8 text: {source}")]
    Decode {
        source_id: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Source '{source_id}' parsed but produced no usable rows")]
    EmptyCatalog { source_id: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Content,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuizError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuizError::SourceRead { .. } | QuizError::Decode { .. } => ErrorCategory::Source,
            QuizError::EmptyCatalog { .. } => ErrorCategory::Content,
            QuizError::ConfigParseError { .. } | QuizError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            QuizError::CsvError(_) | QuizError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Content => ErrorSeverity::Medium,
            ErrorCategory::Source | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuizError::SourceRead { .. } => "Check that the catalog file exists and is readable",
            QuizError::Decode { .. } => "Save the catalog as UTF-8 text",
            QuizError::EmptyCatalog { .. } => {
                "Check the header row and make sure columns are comma-delimited (label,x,y)"
            }
            QuizError::ConfigParseError { .. } => "Fix the TOML syntax in the configuration file",
            QuizError::InvalidConfigValueError { .. } => "Review the configuration values",
            QuizError::CsvError(_) | QuizError::IoError(_) => {
                "Check the output location and available disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuizError::SourceRead { source_id, .. } => {
                format!("Failed to read point catalog '{}'", source_id)
            }
            QuizError::Decode { source_id, .. } => {
                format!("Point catalog '{}' could not be decoded as text", source_id)
            }
            QuizError::EmptyCatalog { source_id } => format!(
                "Point catalog '{}' was read but contains no usable rows",
                source_id
            ),
            other => other.to_string(),
        }
    }

    /// The two lines shown to the user when a command fails.
    pub fn report(&self) -> String {
        format!(
            "❌ {}\n💡 Suggestion: {}",
            self.user_friendly_message(),
            self.recovery_suggestion()
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
