//! Diagnostics for rejected clauses.

use std::fmt;

use crate::rule::CornerType;

/// Why a clause was rejected.
///
/// Offsets are byte offsets into the clause text.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseError {
    UnknownWord {
        offset: usize,
        word: String,
    },
    InvalidNumber {
        offset: usize,
        text: String,
    },
    Expected {
        offset: usize,
        expected: &'static str,
        found: String,
    },
    UnexpectedEnd {
        expected: &'static str,
    },
    TrailingInput {
        offset: usize,
    },
    MissingCornerType,
    /// A modifier that only belongs under the other corner type.
    FieldOutsideBranch {
        field: &'static str,
        corner_type: CornerType,
    },
    FieldWithoutParent {
        field: &'static str,
        parent: &'static str,
    },
    ConflictingExceptSame,
    EmptySpacingTable,
}

impl fmt::Display for ClauseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWord { offset, word } => {
                write!(f, "Unknown word {word:?} at offset {offset}")
            }
            Self::InvalidNumber { offset, text } => {
                write!(f, "Invalid number {text:?} at offset {offset}")
            }
            Self::Expected {
                offset,
                expected,
                found,
            } => write!(f, "Expected {expected} at offset {offset}, found {found}"),
            Self::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of clause, expected {expected}")
            }
            Self::TrailingInput { offset } => {
                write!(f, "Unexpected input after ';' at offset {offset}")
            }
            Self::MissingCornerType => write!(f, "No corner type given"),
            Self::FieldOutsideBranch { field, corner_type } => {
                write!(f, "{field} is not allowed for {corner_type}")
            }
            Self::FieldWithoutParent { field, parent } => {
                write!(f, "{field} requires {parent}")
            }
            Self::ConflictingExceptSame => {
                write!(f, "EXCEPTSAMENET and EXCEPTSAMEMETAL are mutually exclusive")
            }
            Self::EmptySpacingTable => write!(f, "At least one WIDTH ... SPACING entry is required"),
        }
    }
}

impl std::error::Error for ClauseError {}
