//! Borrowed package and database handles
//!
//! These are never dereferenced here; they only carry a non-null pointer and
//! the lifetime of whatever view or list produced them, so a handle cannot be
//! kept past the point where libalpm may free the record.

use crate::error::ConversionError;
use crate::ffi::{alpm_db_t, alpm_pkg_t};
use crate::list::FromForeign;
use std::marker::PhantomData;
use std::os::raw::c_void;
use std::ptr::NonNull;

/// Borrowed `alpm_pkg_t *`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageRef<'a> {
    ptr: NonNull<alpm_pkg_t>,
    _marker: PhantomData<&'a alpm_pkg_t>,
}

impl<'a> PackageRef<'a> {
    /// Wrap a package pointer; `None` if it is null
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must stay valid for `'a`.
    pub unsafe fn from_raw(ptr: *mut alpm_pkg_t) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _marker: PhantomData,
        })
    }

    /// Raw pointer for libalpm calls
    pub fn as_ptr(&self) -> *mut alpm_pkg_t {
        self.ptr.as_ptr()
    }
}

impl<'a> FromForeign<'a> for PackageRef<'a> {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        PackageRef::from_raw(data as *mut alpm_pkg_t)
            .ok_or(ConversionError::NullRecord { record: "package" })
    }
}

/// Borrowed `alpm_db_t *`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseRef<'a> {
    ptr: NonNull<alpm_db_t>,
    _marker: PhantomData<&'a alpm_db_t>,
}

impl<'a> DatabaseRef<'a> {
    /// Wrap a database pointer; `None` if it is null
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must stay valid for `'a`.
    pub unsafe fn from_raw(ptr: *mut alpm_db_t) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _marker: PhantomData,
        })
    }

    /// Raw pointer for libalpm calls
    pub fn as_ptr(&self) -> *mut alpm_db_t {
        self.ptr.as_ptr()
    }
}

impl<'a> FromForeign<'a> for DatabaseRef<'a> {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        DatabaseRef::from_raw(data as *mut alpm_db_t)
            .ok_or(ConversionError::NullRecord { record: "database" })
    }
}
