//! Result and error types for Esperar.
//!
//! Absence is not represented here: an element that never turned up within
//! its wait budget comes back as `Ok(None)` or an empty `Vec`, and callers
//! branch on that. The variants below cover the cases that *are* errors,
//! like a remote session failing mid-query or a table offset pointing
//! outside the grid.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// The remote session failed while running an element query
    #[error("Element query failed: {message}")]
    QueryFailed {
        /// Error message from the remote session
        message: String,
    },

    /// A handle referenced a node that is no longer part of the current render
    #[error("Stale element handle: {id}")]
    StaleHandle {
        /// Identifier of the stale handle
        id: String,
    },

    /// A row offset computed from a table match landed outside the table
    #[error(
        "Invalid row in table lookup: matched {matched_text:?} in row {matched_row}, \
         row offset {offset} lands outside the table"
    )]
    InvalidRowOffset {
        /// The text the anchor cell was matched on
        matched_text: String,
        /// Row index of the anchor match
        matched_row: usize,
        /// The offending row offset
        offset: i32,
    },

    /// A column offset computed from a table match landed outside the row
    #[error(
        "Invalid column in table lookup: matched {matched_text:?} at row {matched_row} \
         column {matched_column}, column offset {offset} lands outside the row"
    )]
    InvalidColumnOffset {
        /// The text the anchor cell was matched on
        matched_text: String,
        /// Row index of the anchor match
        matched_row: usize,
        /// Column index of the anchor match
        matched_column: usize,
        /// The offending column offset
        offset: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_failed_display() {
        let err = EsperarError::QueryFailed {
            message: "session closed".to_string(),
        };
        assert_eq!(err.to_string(), "Element query failed: session closed");
    }

    #[test]
    fn test_stale_handle_display() {
        let err = EsperarError::StaleHandle {
            id: "node-17".to_string(),
        };
        assert_eq!(err.to_string(), "Stale element handle: node-17");
    }

    #[test]
    fn test_invalid_row_offset_carries_context() {
        let err = EsperarError::InvalidRowOffset {
            matched_text: "Billy".to_string(),
            matched_row: 1,
            offset: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("Billy"));
        assert!(msg.contains("row 1"));
        assert!(msg.contains("offset 4"));
    }

    #[test]
    fn test_invalid_column_offset_carries_context() {
        let err = EsperarError::InvalidColumnOffset {
            matched_text: "2345".to_string(),
            matched_row: 1,
            matched_column: 1,
            offset: -2,
        };
        let msg = err.to_string();
        assert!(msg.contains("2345"));
        assert!(msg.contains("column 1"));
        assert!(msg.contains("offset -2"));
    }
}
