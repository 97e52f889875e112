//! Error type for literal conversion.

use crate::primitive::PrimitiveKind;

/// A literal did not match the lexical grammar of its primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not a valid literal for the kind.
    #[error("invalid {kind} literal: '{input}'")]
    Invalid {
        /// The kind the literal was parsed as.
        kind: PrimitiveKind,
        /// The rejected input.
        input: String,
    },

    /// The literal is numeric but does not fit the kind's width.
    #[error("{kind} literal out of range: '{input}'")]
    Overflow {
        /// The kind the literal was parsed as.
        kind: PrimitiveKind,
        /// The rejected input.
        input: String,
    },

    /// A kind that needs at least one character was given empty text.
    #[error("empty {kind} literal")]
    Empty {
        /// The kind the literal was parsed as.
        kind: PrimitiveKind,
    },
}

impl ParseError {
    /// Returns the kind whose grammar rejected the literal.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            ParseError::Invalid { kind, .. }
            | ParseError::Overflow { kind, .. }
            | ParseError::Empty { kind } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid() {
        let err = ParseError::Invalid {
            kind: PrimitiveKind::Integer,
            input: "abc".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid integer literal: 'abc'");
    }

    #[test]
    fn display_overflow() {
        let err = ParseError::Overflow {
            kind: PrimitiveKind::Byte,
            input: "300".to_string(),
        };
        assert_eq!(format!("{err}"), "byte literal out of range: '300'");
    }

    #[test]
    fn display_empty() {
        let err = ParseError::Empty {
            kind: PrimitiveKind::Character,
        };
        assert_eq!(format!("{err}"), "empty character literal");
        assert_eq!(err.kind(), PrimitiveKind::Character);
    }
}
