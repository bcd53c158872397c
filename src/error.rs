use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Completion API error: HTTP {status}: {message}")]
    Completion { status: u16, message: String },

    #[error("Item {0} is locked and cannot be reordered")]
    ItemLocked(String),

    #[error("Index {index} is out of range for day {day} ({len} items)")]
    IndexOutOfRange { day: u32, index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Get the error code for structured log lines and response envelopes
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Completion { .. } => "COMPLETION_ERROR",
            PlannerError::ItemLocked(_) => "ITEM_LOCKED",
            PlannerError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            PlannerError::Io(_) => "IO_ERROR",
            PlannerError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let error = PlannerError::ItemLocked("3".to_string());
        assert_eq!(error.error_code(), "ITEM_LOCKED");
        assert!(error.to_string().contains("locked"));

        let error = PlannerError::IndexOutOfRange {
            day: 2,
            index: 5,
            len: 2,
        };
        assert_eq!(error.error_code(), "INDEX_OUT_OF_RANGE");
        assert!(error.to_string().contains("day 2"));
    }
}
