use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummitError {
    #[error("Not enough capacity: {capacity} places for {attendees} attendees")]
    InsufficientCapacity { capacity: usize, attendees: usize },

    #[error("No more capacity at '{venue}' (capacity {capacity})")]
    CapacityExceeded { venue: String, capacity: usize },

    #[error("No capacity remaining for attendee '{attendee}'")]
    AllocatorExhausted { attendee: String },

    #[error("Matching invariant violated: {message}")]
    MatchingInvariant { message: String },

    #[error("Row count mismatch on line {line}: expected {expected} preferences, found {found}")]
    RowCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognised preference value '{value}' on line {line}. Value must start with 'yes' or 'no'")]
    UnrecognisedPreference { line: usize, value: String },

    #[error("Invalid venue '{raw}': {reason}")]
    InvalidVenueSpec { raw: String, reason: String },

    #[error("Venue '{name}' is declared more than once")]
    DuplicateVenue { name: String },

    #[error("Attendee '{attendee}' prefers unknown venue '{venue}'")]
    UnknownVenue { attendee: String, venue: String },

    #[error("No venues were supplied")]
    NoVenues,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Capacity,
    Internal,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SummitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SummitError::InsufficientCapacity { .. } => ErrorCategory::Capacity,
            SummitError::CapacityExceeded { .. }
            | SummitError::AllocatorExhausted { .. }
            | SummitError::MatchingInvariant { .. } => ErrorCategory::Internal,
            SummitError::RowCountMismatch { .. }
            | SummitError::UnrecognisedPreference { .. }
            | SummitError::InvalidVenueSpec { .. }
            | SummitError::DuplicateVenue { .. }
            | SummitError::UnknownVenue { .. }
            | SummitError::NoVenues
            | SummitError::CsvError(_) => ErrorCategory::Input,
            SummitError::ConfigError { .. }
            | SummitError::InvalidConfigValue { .. }
            | SummitError::MissingConfig { .. }
            | SummitError::TomlError(_) => ErrorCategory::Configuration,
            SummitError::IoError(_) | SummitError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Capacity => ErrorSeverity::High,
            ErrorCategory::Internal | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Internal errors mean the assignment bookkeeping is inconsistent, never bad input.
    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SummitError::InsufficientCapacity {
                capacity,
                attendees,
            } => format!(
                "Add at least {} more places across the venues or remove attendees",
                attendees - capacity
            ),
            SummitError::RowCountMismatch { expected, .. } => format!(
                "Give every attendee either no preferences or exactly {} yes/no values",
                expected
            ),
            SummitError::UnrecognisedPreference { .. } => {
                "Preference cells must start with 'yes' or 'no'".to_string()
            }
            SummitError::InvalidVenueSpec { .. } => {
                "Venues are written as name:capacity, e.g. hall:20".to_string()
            }
            SummitError::DuplicateVenue { .. } => "Give every venue a unique name".to_string(),
            SummitError::UnknownVenue { .. } => {
                "Make the attendee CSV header match the configured venue names".to_string()
            }
            SummitError::NoVenues => "Pass venues with --venues or in the config file".to_string(),
            SummitError::ConfigError { .. }
            | SummitError::InvalidConfigValue { .. }
            | SummitError::MissingConfig { .. }
            | SummitError::TomlError(_) => "Check the configuration file and flags".to_string(),
            SummitError::CsvError(_) => "Check that the attendee file is valid CSV".to_string(),
            SummitError::IoError(_) => "Check file paths and permissions".to_string(),
            SummitError::SerializationError(_) => "Retry with a different output format".to_string(),
            SummitError::CapacityExceeded { .. }
            | SummitError::AllocatorExhausted { .. }
            | SummitError::MatchingInvariant { .. } => {
                "This is a bug in the assignment engine; please report it with the input files"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Internal => format!("Internal assignment error: {}", self),
            ErrorCategory::Capacity => format!("Cannot place everyone: {}", self),
            ErrorCategory::Input => format!("Problem with the input: {}", self),
            ErrorCategory::Configuration => format!("Problem with the configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SummitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_classified() {
        let err = SummitError::InsufficientCapacity {
            capacity: 6,
            attendees: 7,
        };
        assert_eq!(err.category(), ErrorCategory::Capacity);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("1 more"));

        let err = SummitError::AllocatorExhausted {
            attendee: "7".to_string(),
        };
        assert!(err.is_internal());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "No capacity remaining for attendee '7'");
    }

    #[test]
    fn test_input_errors_are_medium() {
        let err = SummitError::UnrecognisedPreference {
            line: 2,
            value: "hello".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().starts_with("Unrecognised"));
        assert!(err.user_friendly_message().contains("input"));
    }
}
