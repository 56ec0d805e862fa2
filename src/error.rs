use thiserror::Error;

use crate::graph::DocumentId;

/// Main error type for eograph
#[derive(Error, Debug)]
pub enum EographError {
    /// Every candidate source location failed
    #[error("Failed to load source data. Tried locations: {attempted}. Last error: {last_error}")]
    Retrieval {
        attempted: String,
        last_error: String,
    },

    /// Fetched body could not be decoded as a table
    #[error("Decode error: {0}")]
    Decode(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document not found in the graph
    #[error("Document not found: EO {0}")]
    DocumentNotFound(DocumentId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<csv::Error> for EographError {
    fn from(err: csv::Error) -> Self {
        EographError::Decode(err.to_string())
    }
}

/// Convenient Result type using EographError
pub type Result<T> = std::result::Result<T, EographError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EographError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_retrieval_error_lists_locations() {
        let err = EographError::Retrieval {
            attempted: "a.csv, b.csv".to_string(),
            last_error: "not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a.csv, b.csv"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EographError = io_err.into();
        assert!(matches!(err, EographError::Io(_)));
    }

    #[test]
    fn test_document_not_found_display() {
        let err = EographError::DocumentNotFound(13765);
        assert_eq!(err.to_string(), "Document not found: EO 13765");
    }
}
