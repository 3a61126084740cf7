//! Borrowed views over `alpm_list_t` chains
//!
//! A [`ForeignList`] never owns a node. It is rebuilt from a head pointer
//! whenever one is needed and only holds that pointer; traversal state lives
//! on the stack of the call walking the chain.
//!
//! Two ways to get elements out:
//! - [`ForeignList::for_each`] stops at the first failure, whether the
//!   element failed to decode or the visitor returned an error
//! - [`ForeignList::collect`] skips elements that fail to decode and keeps
//!   going; [`ForeignList::collect_counted`] also reports how many were skipped

use crate::error::ConversionError;
use crate::ffi::alpm_list_t;
use crate::ffi::marshal::required_string;
use log::{debug, trace};
use std::convert::Infallible;
use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_void};
use std::ptr::{self, NonNull};

/// Decoding of a list payload (`alpm_list_t::data`) into a Rust value
///
/// `'a` is the lifetime of the foreign list; borrowed element types such as
/// [`PackageRef`](crate::PackageRef) carry it.
pub trait FromForeign<'a>: Sized {
    /// # Safety
    ///
    /// `data` must be null or point to a live record of the foreign layout
    /// this type decodes, valid for `'a`.
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError>;
}

impl<'a> FromForeign<'a> for String {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        required_string(data as *const c_char, "string")
    }
}

impl<'a> FromForeign<'a> for &'a CStr {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        if data.is_null() {
            return Err(ConversionError::NullRecord { record: "string" });
        }
        Ok(CStr::from_ptr(data as *const c_char))
    }
}

/// Read-only view of a foreign singly walked chain
///
/// The view is `Copy` and neither `Send` nor `Sync`: libalpm makes no
/// promise about concurrent readers.
pub struct ForeignList<'a, T> {
    head: Option<NonNull<alpm_list_t>>,
    _marker: PhantomData<(&'a alpm_list_t, fn() -> T)>,
}

/// Result of [`ForeignList::collect_counted`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    /// Decoded elements in link order
    pub items: Vec<T>,
    /// Number of elements that failed to decode
    pub skipped: usize,
}

/// List of C strings
pub type StringList<'a> = ForeignList<'a, String>;
/// List of `alpm_backup_t`
pub type BackupList<'a> = ForeignList<'a, crate::file::BackupFile>;
/// List of `alpm_depend_t`
pub type DependList<'a> = ForeignList<'a, crate::depend::Depend>;
/// List of `alpm_pkg_t` handles
pub type PackageList<'a> = ForeignList<'a, crate::package::PackageRef<'a>>;

impl<'a, T> ForeignList<'a, T> {
    /// Wrap a chain head
    ///
    /// # Safety
    ///
    /// `head` must be null or the first node of an acyclic `alpm_list_t`
    /// chain. Every node, and every payload in the layout `T` decodes, must
    /// stay valid and unmodified for `'a`. The view does not detect cycles;
    /// traversing a cyclic chain never terminates.
    pub unsafe fn from_raw(head: *mut alpm_list_t) -> Self {
        Self {
            head: NonNull::new(head),
            _marker: PhantomData,
        }
    }

    /// The empty list
    pub const fn empty() -> Self {
        Self {
            head: None,
            _marker: PhantomData,
        }
    }

    /// Head pointer (null for an empty list)
    pub fn as_ptr(&self) -> *mut alpm_list_t {
        self.head.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// True iff the chain has no head
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Count nodes by walking the whole chain
    pub fn len(&self) -> usize {
        let mut count = 0;
        let walked: Result<(), Infallible> = self.for_each_raw(|_| {
            count += 1;
            Ok(())
        });
        if let Err(never) = walked {
            match never {}
        }
        count
    }

    /// Visit raw payload pointers in link order
    ///
    /// Stops at, and returns, the first error the visitor produces. Every
    /// other traversal is built on this loop.
    pub fn for_each_raw<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(*mut c_void) -> Result<(), E>,
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // SAFETY: `from_raw` requires every node of the chain to be live for 'a.
            let node = unsafe { node.as_ref() };
            visit(node.data)?;
            cursor = NonNull::new(node.next);
        }
        Ok(())
    }
}

impl<'a, T: FromForeign<'a>> ForeignList<'a, T> {
    /// Decode and visit elements in link order
    ///
    /// A decode failure stops the traversal and is returned as `E`, just like
    /// an error from the visitor.
    pub fn for_each<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        E: From<ConversionError>,
        F: FnMut(T) -> Result<(), E>,
    {
        self.for_each_raw(|data| {
            // SAFETY: `from_raw` requires payloads in T's layout, live for 'a.
            let item = unsafe { T::from_foreign(data) }?;
            visit(item)
        })
    }

    /// Decode every element, silently dropping the ones that fail
    pub fn collect(&self) -> Vec<T> {
        self.collect_counted().items
    }

    /// Decode every element and count the ones that failed
    pub fn collect_counted(&self) -> Collected<T> {
        let mut items = Vec::new();
        let mut skipped = 0;

        let walked: Result<(), Infallible> = self.for_each_raw(|data| {
            // SAFETY: `from_raw` requires payloads in T's layout, live for 'a.
            match unsafe { T::from_foreign(data) } {
                Ok(item) => items.push(item),
                Err(err) => {
                    trace!("skipping list element at {:p}: {}", data, err);
                    skipped += 1;
                }
            }
            Ok(())
        });
        if let Err(never) = walked {
            match never {}
        }

        if skipped > 0 {
            debug!(
                "collected {} list elements, skipped {} undecodable",
                items.len(),
                skipped
            );
        }

        Collected { items, skipped }
    }
}

impl<T> Clone for ForeignList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ForeignList<'_, T> {}

impl<T> Default for ForeignList<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for ForeignList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignList")
            .field("head", &self.as_ptr())
            .finish()
    }
}
