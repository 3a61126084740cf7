//! Foreign-memory fixtures for unit tests
//!
//! Nodes and strings are allocated on the Rust heap and laid out exactly as
//! libalpm would, so views can be pointed at them.

use crate::ffi::alpm_list_t;
use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

/// Owned NUL-terminated strings usable as list payloads
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
}

/// An `alpm_list_t` chain; nodes are freed on drop, payloads are not
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
        // alpm keeps the tail in head->prev
        if let (Some(&head), Some(&tail)) = (nodes.first(), nodes.last()) {
            unsafe { (*head).prev = tail };
        }

        Self { nodes }
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
