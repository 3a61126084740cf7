//! C string and C boolean marshaling
//!
//! libalpm stores text as NUL-terminated `char *` (null meaning "unset")
//! and booleans as `int`. These helpers are the only place either encoding
//! is interpreted:
//! - `string_field()`: optional `char *` -> owned `String` (null -> "")
//! - `required_string()`: `char *` payload -> owned `String` (null is an error)
//! - `to_c_string()`: `&str` -> `CString` for records handed back to libalpm
//! - `decode_flag()` / `encode_flag()`: `int` <-> `bool`

use crate::error::ConversionError;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

/// Copy an optional string field out of foreign memory
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
pub unsafe fn string_field(
    ptr: *const c_char,
    field: &'static str,
) -> Result<String, ConversionError> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    let c_str = CStr::from_ptr(ptr);
    c_str
        .to_str()
        .map(str::to_owned)
        .map_err(|source| ConversionError::InvalidUtf8 { field, source })
}

/// Copy a string payload that must be present
///
/// # Safety
///
/// Same as [`string_field`].
pub unsafe fn required_string(
    ptr: *const c_char,
    record: &'static str,
) -> Result<String, ConversionError> {
    if ptr.is_null() {
        return Err(ConversionError::NullRecord { record });
    }
    string_field(ptr, record)
}

/// Encode a string for the foreign side
pub fn to_c_string(s: &str, field: &'static str) -> Result<CString, ConversionError> {
    CString::new(s).map_err(|source| ConversionError::InteriorNul { field, source })
}

/// Decode a C boolean (any nonzero value is true)
#[inline]
pub fn decode_flag(raw: c_int) -> bool {
    raw != 0
}

/// Encode a C boolean as exactly 0 or 1
#[inline]
pub fn encode_flag(value: bool) -> c_int {
    c_int::from(value)
}
