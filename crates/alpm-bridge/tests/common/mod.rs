//! Shared fixtures for integration tests
//!
//! Builds records in Rust-owned memory with the exact layout libalpm uses,
//! so views can be pointed at them the same way they would be pointed at
//! libalpm's own allocations.

#![allow(dead_code)]

use alpm_bridge::ffi::{alpm_depend_t, alpm_list_t, alpm_pkg_t, alpm_question_any_t};
use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::ptr;

/// Owned C strings used as payloads or record fields
pub struct CStrings {
    strings: Vec<CString>,
}

impl CStrings {
    pub fn new(values: &[&str]) -> Self {
        Self {
            strings: values.iter().map(|v| CString::new(*v).unwrap()).collect(),
        }
    }

    pub fn payloads(&self) -> Vec<*mut c_void> {
        self.strings
            .iter()
            .map(|s| s.as_ptr() as *mut c_void)
            .collect()
    }

    pub fn ptr(&self, index: usize) -> *mut c_char {
        self.strings[index].as_ptr() as *mut c_char
    }
}

/// An `alpm_list_t` chain over borrowed payloads
///
/// Nodes are freed on drop; payloads belong to the caller.
pub struct Chain {
    nodes: Vec<*mut alpm_list_t>,
}

impl Chain {
    pub fn new(payloads: Vec<*mut c_void>) -> Self {
        let nodes: Vec<*mut alpm_list_t> = payloads
            .into_iter()
            .map(|data| {
                Box::into_raw(Box::new(alpm_list_t {
                    data,
                    prev: ptr::null_mut(),
                    next: ptr::null_mut(),
                }))
            })
            .collect();

        for pair in nodes.windows(2) {
            unsafe {
                (*pair[0]).next = pair[1];
                (*pair[1]).prev = pair[0];
            }
        }
        if let (Some(&head), Some(&tail)) = (nodes.first(), nodes.last()) {
            unsafe { (*head).prev = tail };
        }

        Self { nodes }
    }

    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn head(&self) -> *mut alpm_list_t {
        self.nodes.first().copied().unwrap_or(ptr::null_mut())
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        for node in self.nodes.drain(..) {
            drop(unsafe { Box::from_raw(node) });
        }
    }
}

/// Distinct non-null package handles
///
/// `alpm_pkg_t` is opaque and never dereferenced, so any stable address
/// serves as a handle.
pub struct FakePackages {
    storage: Vec<u8>,
}

impl FakePackages {
    pub fn new(count: usize) -> Self {
        Self {
            storage: vec![0; count.max(1)],
        }
    }

    pub fn handle(&mut self, index: usize) -> *mut alpm_pkg_t {
        self.storage[index..].as_mut_ptr().cast()
    }

    pub fn payloads(&mut self, count: usize) -> Vec<*mut c_void> {
        (0..count).map(|i| self.handle(i).cast()).collect()
    }
}

/// A dependency record over strings owned by the returned `CStrings`
pub fn depend_record(name: &str, version: &str, mod_: i32) -> (CStrings, Box<alpm_depend_t>) {
    let strings = CStrings::new(&[name, version, ""]);
    let raw = Box::new(alpm_depend_t {
        name: strings.ptr(0),
        version: strings.ptr(1),
        desc: strings.ptr(2),
        name_hash: 7,
        mod_,
    });
    (strings, raw)
}

/// View any question shape as the generic prefix pointer
pub fn as_any<T>(raw: &mut T) -> *mut alpm_question_any_t {
    (raw as *mut T).cast()
}
