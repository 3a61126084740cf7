//! C layouts of the libalpm records read by this crate
//!
//! Field order and widths follow `alpm.h` and `alpm_list.h`. Only the
//! records the bridge decodes or narrows are mirrored; packages and
//! databases stay opaque.

#![allow(non_camel_case_types)]

use std::mem::offset_of;
use std::os::raw::{c_char, c_int, c_ulong, c_void};

/// Doubly linked list node (`alpm_list_t`)
///
/// The list head's `prev` points at the tail; only `next` is ever followed.
#[repr(C)]
#[derive(Debug)]
pub struct alpm_list_t {
    pub data: *mut c_void,
    pub prev: *mut alpm_list_t,
    pub next: *mut alpm_list_t,
}

/// Opaque package handle
#[repr(C)]
pub struct alpm_pkg_t {
    _private: [u8; 0],
}

/// Opaque database handle
#[repr(C)]
pub struct alpm_db_t {
    _private: [u8; 0],
}

/// Dependency (`alpm_depend_t`)
#[repr(C)]
#[derive(Debug)]
pub struct alpm_depend_t {
    pub name: *mut c_char,
    pub version: *mut c_char,
    pub desc: *mut c_char,
    pub name_hash: c_ulong,
    pub mod_: c_int,
}

/// Package file entry (`alpm_file_t`), built with `_FILE_OFFSET_BITS=64`
#[repr(C)]
#[derive(Debug)]
pub struct alpm_file_t {
    pub name: *mut c_char,
    pub size: i64,
    pub mode: u32,
}

/// Counted file array (`alpm_filelist_t`)
#[repr(C)]
#[derive(Debug)]
pub struct alpm_filelist_t {
    pub count: usize,
    pub files: *mut alpm_file_t,
}

/// Backup file entry (`alpm_backup_t`)
#[repr(C)]
#[derive(Debug)]
pub struct alpm_backup_t {
    pub name: *mut c_char,
    pub hash: *mut c_char,
}

/// Common prefix of every question (`alpm_question_any_t`)
#[repr(C)]
#[derive(Debug)]
pub struct alpm_question_any_t {
    pub type_: c_int,
    pub answer: c_int,
}

/// `alpm_question_install_ignorepkg_t`
#[repr(C)]
#[derive(Debug)]
pub struct alpm_question_install_ignorepkg_t {
    pub type_: c_int,
    pub install: c_int,
    pub pkg: *mut alpm_pkg_t,
}

/// `alpm_question_replace_t`
#[repr(C)]
#[derive(Debug)]
pub struct alpm_question_replace_t {
    pub type_: c_int,
    pub replace: c_int,
    pub oldpkg: *mut alpm_pkg_t,
    pub newpkg: *mut alpm_pkg_t,
    pub newdb: *mut alpm_db_t,
}

/// `alpm_question_select_provider_t`
#[repr(C)]
#[derive(Debug)]
pub struct alpm_question_select_provider_t {
    pub type_: c_int,
    pub use_index: c_int,
    pub providers: *mut alpm_list_t,
    pub depend: *mut alpm_depend_t,
}

// Narrowing reinterprets one address as several shapes; the tag and the
// answer slot must sit at the same place in all of them.
const _: () = {
    assert!(offset_of!(alpm_question_any_t, type_) == 0);
    assert!(offset_of!(alpm_question_install_ignorepkg_t, type_) == 0);
    assert!(offset_of!(alpm_question_replace_t, type_) == 0);
    assert!(offset_of!(alpm_question_select_provider_t, type_) == 0);

    const ANSWER: usize = offset_of!(alpm_question_any_t, answer);
    assert!(offset_of!(alpm_question_install_ignorepkg_t, install) == ANSWER);
    assert!(offset_of!(alpm_question_replace_t, replace) == ANSWER);
    assert!(offset_of!(alpm_question_select_provider_t, use_index) == ANSWER);
};
