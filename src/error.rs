//! Error types for the sigdoc library.

use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias for sigdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering documentation.
#[derive(Error, Debug)]
pub enum Error {
    /// A structural rule was applied to a node of the wrong kind.
    #[error("node `{name}` of kind {actual} is not {expected}")]
    KindMismatch {
        /// What the rule expected (e.g. "a class-like declaration")
        expected: &'static str,
        /// The kind that was actually supplied
        actual: NodeKind,
        /// Name of the offending node
        name: String,
    },

    /// A required singular detail is absent.
    #[error("node `{node}` has no {role} detail")]
    MissingDetail {
        /// Role of the missing detail
        role: NodeKind,
        /// Name of the node that should carry it
        node: String,
    },

    /// More than one detail was found where exactly one is required.
    #[error("node `{node}` has more than one {role} detail")]
    AmbiguousDetail {
        /// Role of the duplicated detail
        role: NodeKind,
        /// Name of the node carrying the duplicates
        node: String,
    },

    /// A constructor was rendered without its owning declaration.
    #[error("constructor `{0}` has no owner")]
    MissingOwner(String),

    /// The node kind has no signature rule and fallback is disabled.
    #[error("unsupported node kind {kind} for `{name}`")]
    UnsupportedNodeKind {
        /// The unsupported kind
        kind: NodeKind,
        /// Name of the node
        name: String,
    },

    /// Error during serialization of rendered output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Declaration input could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A source position string could not be parsed.
    #[error("Invalid source position: {0}")]
    InvalidSourcePosition(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingOwner("<init>".to_string());
        assert_eq!(err.to_string(), "constructor `<init>` has no owner");

        let err = Error::KindMismatch {
            expected: "a property",
            actual: NodeKind::Class,
            name: "Foo".to_string(),
        };
        assert_eq!(err.to_string(), "node `Foo` of kind Class is not a property");
    }

    #[test]
    fn test_missing_detail_display() {
        let err = Error::MissingDetail {
            role: NodeKind::Type,
            node: "x".to_string(),
        };
        assert_eq!(err.to_string(), "node `x` has no Type detail");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = Error::InvalidInput("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Render(_)));
    }
}
