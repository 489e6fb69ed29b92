//! Error taxonomy
//!
//! Every failure in the crate is reported through [`Error`]. Parser errors
//! carry the approximate byte offset of the offending token; nothing is
//! recovered mid-parse.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds produced by sdfdom
#[derive(Debug)]
pub enum Error {
    /// Source unreadable or destination unwritable
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// Bracket pre-check failed: two `<` or two `>` without the other between them
    SyntaxImbalance { bracket: char, position: usize },
    /// A token that is illegal in the current parser state
    UnexpectedToken { token: String, position: usize },
    /// Input ended in the middle of a construct
    UnexpectedEof {
        expected: &'static str,
        position: usize,
    },
    /// Closing tag found while no tag is open
    UnmatchedCloseTag { name: String, position: usize },
    /// Closing tag name differs from the innermost open tag
    MismatchedCloseTag {
        expected: String,
        found: String,
        position: usize,
    },
    /// Input ended while tags were still open
    UnclosedTag { name: String },
    /// The input holds no element at all
    EmptyDocument,
    /// A mutation-API search found no element with this name
    TagNotFound { name: String },
    /// The element exists but carries no attribute with this name
    AttributeNotFound { element: String, name: String },
    /// Attribute value holds both `'` and `"`, so no quote style can delimit it
    UnquotableValue { value: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unexpected(token: impl Into<String>, position: usize) -> Self {
        Error::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Byte offset of the failure, for errors raised while scanning input
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::SyntaxImbalance { position, .. }
            | Error::UnexpectedToken { position, .. }
            | Error::UnexpectedEof { position, .. }
            | Error::UnmatchedCloseTag { position, .. }
            | Error::MismatchedCloseTag { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// True for errors that reject the markup itself (as opposed to I/O or lookups)
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::SyntaxImbalance { .. }
                | Error::UnexpectedToken { .. }
                | Error::UnexpectedEof { .. }
                | Error::UnmatchedCloseTag { .. }
                | Error::MismatchedCloseTag { .. }
                | Error::UnclosedTag { .. }
                | Error::EmptyDocument
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "i/o error on {}: {}", path.display(), source),
            Error::SyntaxImbalance { bracket, position } => write!(
                f,
                "unbalanced brackets: repeated '{}' at byte {}",
                bracket, position
            ),
            Error::UnexpectedToken { token, position } => {
                write!(f, "unexpected {:?} at byte {}", token, position)
            }
            Error::UnexpectedEof { expected, position } => write!(
                f,
                "unexpected end of input at byte {} (expected {})",
                position, expected
            ),
            Error::UnmatchedCloseTag { name, position } => write!(
                f,
                "close tag </{}> at byte {} has no matching open tag",
                name, position
            ),
            Error::MismatchedCloseTag {
                expected,
                found,
                position,
            } => write!(
                f,
                "tag mismatch at byte {}: <{}> closed with </{}>",
                position, expected, found
            ),
            Error::UnclosedTag { name } => write!(f, "input ended with <{}> still open", name),
            Error::EmptyDocument => write!(f, "document contains no element"),
            Error::TagNotFound { name } => write!(f, "no element named <{}>", name),
            Error::AttributeNotFound { element, name } => {
                write!(f, "element <{}> has no attribute {:?}", element, name)
            }
            Error::UnquotableValue { value } => write!(
                f,
                "attribute value {:?} contains both quote characters",
                value
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only_for_scan_errors() {
        let err = Error::unexpected("<", 12);
        assert_eq!(err.position(), Some(12));
        assert!(err.is_syntax());

        let err = Error::TagNotFound { name: "pose".into() };
        assert_eq!(err.position(), None);
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_display_mismatch() {
        let err = Error::MismatchedCloseTag {
            expected: "a".into(),
            found: "b".into(),
            position: 7,
        };
        assert_eq!(err.to_string(), "tag mismatch at byte 7: <a> closed with </b>");
    }

    #[test]
    fn test_io_source_is_exposed() {
        use std::error::Error as _;
        let err = Error::io("missing.sdf", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.sdf"));
    }
}
