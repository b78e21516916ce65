//! Error types for prest.

use thiserror::Error;

/// The main error type for prest encoding operations.
///
/// Encoding never fails a chain mid-flight: the [`Filter`](crate::Filter)
/// builder records the first error it hits and keeps accepting calls, and
/// [`finish`](crate::Filter::finish) surfaces the slot once at the end.
#[derive(Debug, Error)]
pub enum PrestError {
    /// Operator token is not part of the PostgREST filter vocabulary.
    #[error("Invalid filter operator: '{0}'")]
    InvalidOperator(String),

    /// Text-search type is not one of plain, phrase, websearch or empty.
    #[error("Invalid text search type: '{0}'")]
    InvalidTextSearchType(String),

    /// A structured value could not be serialized for object containment.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PrestError {
    /// Create an invalid-operator error for the given token.
    pub fn invalid_operator(token: impl Into<String>) -> Self {
        Self::InvalidOperator(token.into())
    }

    /// Create an invalid-text-search-type error for the given token.
    pub fn invalid_text_search_type(token: impl Into<String>) -> Self {
        Self::InvalidTextSearchType(token.into())
    }
}

/// Result type alias for prest operations.
pub type PrestResult<T> = Result<T, PrestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrestError::invalid_operator("bogus");
        assert_eq!(err.to_string(), "Invalid filter operator: 'bogus'");

        let err = PrestError::invalid_text_search_type("fuzzy");
        assert_eq!(err.to_string(), "Invalid text search type: 'fuzzy'");
    }
}
