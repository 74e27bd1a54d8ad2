use serde_json::{Number, Value};
use thiserror::Error;

use crate::{Index, MAX_RANK};

/// A JSON binding error.
///
/// Every error is terminal for the binding pass that produced it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JsonBindingError {
    /// The JSON value does not have the expected type.
    #[error("Expected {expected}, but received: {received}")]
    TypeMismatch {
        /// A description of the expected value.
        expected: String,
        /// The received value, or `<discarded>` if absent.
        received: String,
    },
    /// An array length exceeds the maximum rank.
    #[error("Rank {0} is outside valid range [0, {max}]", max = MAX_RANK)]
    RankOutOfRange(usize),
    /// An integer is outside of its permitted bounds.
    #[error("Expected integer in the range [{min}, {max}], but received: {value}")]
    IntegerOutOfRange {
        /// The received value.
        value: Number,
        /// The inclusive lower bound.
        min: Index,
        /// The inclusive upper bound.
        max: Index,
    },
    /// An array length disagrees with an already fixed rank.
    #[error("Array has length {actual} but should have length {expected}")]
    LengthMismatch {
        /// The fixed rank.
        expected: usize,
        /// The observed array length.
        actual: usize,
    },
    /// A non-empty dimension label is repeated.
    #[error("Dimension label {0:?} not unique")]
    DuplicateLabel(String),
    /// An error binding an array element.
    #[error("Error parsing value at position {index}: {source}")]
    Element {
        /// The element position.
        index: usize,
        /// The underlying error.
        source: Box<JsonBindingError>,
    },
    /// An error binding an object member.
    #[error("Error parsing object member {name:?}: {source}")]
    Member {
        /// The member name.
        name: String,
        /// The underlying error.
        source: Box<JsonBindingError>,
    },
}

/// The category of a [`JsonBindingError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum JsonBindingErrorKind {
    /// A value is not of the required JSON type.
    TypeMismatch,
    /// An array length exceeds the maximum rank, or an element violates its bounds.
    OutOfRange,
    /// An array length disagrees with a fixed rank.
    LengthMismatch,
    /// A non-empty dimension label is repeated.
    DuplicateLabel,
}

impl JsonBindingError {
    /// Create a type mismatch error for the value `received`.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, received: Option<&Value>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            received: received.map_or_else(|| "<discarded>".to_string(), ToString::to_string),
        }
    }

    /// Wrap an error with the position of the array element that caused it.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Wrap an error with the name of the object member that caused it.
    #[must_use]
    pub fn at_member(self, name: impl Into<String>) -> Self {
        Self::Member {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping element and member context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Element { source, .. } | Self::Member { source, .. } => source.root_cause(),
            _ => self,
        }
    }

    /// Returns the category of the error.
    #[must_use]
    pub fn kind(&self) -> JsonBindingErrorKind {
        match self {
            Self::Element { source, .. } | Self::Member { source, .. } => source.kind(),
            Self::TypeMismatch { .. } => JsonBindingErrorKind::TypeMismatch,
            Self::RankOutOfRange(_) | Self::IntegerOutOfRange { .. } => {
                JsonBindingErrorKind::OutOfRange
            }
            Self::LengthMismatch { .. } => JsonBindingErrorKind::LengthMismatch,
            Self::DuplicateLabel(_) => JsonBindingErrorKind::DuplicateLabel,
        }
    }

    /// Returns the position of the innermost array element associated with the error, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Element { index, source } => source.index().or(Some(*index)),
            Self::Member { source, .. } => source.index(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            JsonBindingError::RankOutOfRange(33).to_string(),
            "Rank 33 is outside valid range [0, 32]"
        );
        assert_eq!(
            JsonBindingError::LengthMismatch {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "Array has length 2 but should have length 3"
        );
        assert_eq!(
            JsonBindingError::type_mismatch("array", Some(&json!({"a": 1}))).to_string(),
            r#"Expected array, but received: {"a":1}"#
        );
        assert_eq!(
            JsonBindingError::type_mismatch("array", None).to_string(),
            "Expected array, but received: <discarded>"
        );
    }

    #[test]
    fn error_context() {
        let err = JsonBindingError::IntegerOutOfRange {
            value: Number::from(-1),
            min: 0,
            max: 10,
        }
        .at_index(2)
        .at_member("shape");
        assert_eq!(
            err.to_string(),
            r#"Error parsing object member "shape": Error parsing value at position 2: Expected integer in the range [0, 10], but received: -1"#
        );
        assert_eq!(err.kind(), JsonBindingErrorKind::OutOfRange);
        assert_eq!(err.index(), Some(2));
        assert_eq!(
            JsonBindingError::DuplicateLabel("x".to_string()).index(),
            None
        );
    }
}
