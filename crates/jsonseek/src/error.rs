use thiserror::Error;

use crate::value::ValueKind;

/// Everything that can go wrong while scanning a document.
///
/// Callers should treat [`Error::KeyPathNotFound`] as a semantic outcome
/// (the document simply does not contain the addressed value) and every
/// other variant as a data-integrity signal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("key path not found")]
    KeyPathNotFound,
    #[error("no value where one was expected")]
    MalformedJson,
    #[error("string has no closing '\"'")]
    MalformedString,
    #[error("array has no closing ']' or elements are not ','-separated")]
    MalformedArray,
    #[error("object has no closing '}}' or members are malformed")]
    MalformedObject,
    #[error("value cannot be coerced to the requested type")]
    MalformedValue,
    #[error("unrecognized value token")]
    UnknownValueType,
    #[error("invalid escape sequence in string")]
    MalformedStringEscape,
    #[error("expected a {expected:?} value, found {actual:?}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },
}
