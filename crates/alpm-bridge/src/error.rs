//! Error types

use crate::question::QuestionType;
use std::ffi::NulError;
use std::os::raw::c_int;
use std::str::Utf8Error;
use thiserror::Error;

/// A foreign record could not be decoded into an owned value, or an owned
/// value could not be encoded for the foreign side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Null pointer where a record was required
    #[error("null {record} record")]
    NullRecord { record: &'static str },

    /// String field is not valid UTF-8
    #[error("{field} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        field: &'static str,
        #[source]
        source: Utf8Error,
    },

    /// Dependency modifier outside the values libalpm defines
    #[error("unknown dependency modifier {0}")]
    UnknownDepMod(c_int),

    /// Integer does not fit the width of the foreign field
    #[error("{field} value {value} does not fit the foreign field")]
    OutOfRange { field: &'static str, value: u64 },

    /// String contains a NUL byte and cannot become a C string
    #[error("{field} contains a NUL byte: {source}")]
    InteriorNul {
        field: &'static str,
        #[source]
        source: NulError,
    },
}

/// A question view could not be narrowed to the requested shape.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowError {
    #[error("cannot narrow {found} question to {expected}")]
    WrongVariant {
        expected: QuestionType,
        found: QuestionType,
    },
}
