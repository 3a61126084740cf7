//! Question records (`alpm_question_t`)
//!
//! libalpm asks its caller to decide things mid-transaction by passing a
//! pointer to one of several question structs. All of them start with the
//! same `type` tag, which says which struct the pointer really is. The caller
//! answers by writing into the struct before returning.
//!
//! A [`QuestionAny`] is the generic view: only the tag and the shared
//! `answer` slot are reachable. [`QuestionAny::narrow`] re-reads the live tag
//! and, if it matches, hands out a [`QuestionView`] typed to the concrete
//! shape over the same address. The narrowed view borrows the generic one
//! mutably, so it cannot outlive it, and a narrowed view has no way to
//! narrow again.
//!
//! ```no_run
//! # use alpm_bridge::{QuestionAny, ffi::alpm_question_any_t};
//! # fn callback(raw: *mut alpm_question_any_t) {
//! let Some(mut question) = (unsafe { QuestionAny::from_raw(raw) }) else { return };
//! if let Ok(mut provider) = question.select_provider() {
//!     provider.set_use_index(0);
//! }
//! # }
//! ```

use crate::depend::Depend;
use crate::error::{ConversionError, NarrowError};
use crate::ffi::marshal::{decode_flag, encode_flag};
use crate::ffi::{
    alpm_question_any_t, alpm_question_install_ignorepkg_t, alpm_question_replace_t,
    alpm_question_select_provider_t,
};
use crate::list::{ForeignList, PackageList};
use crate::package::{DatabaseRef, PackageRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr::{self, NonNull};

/// Question discriminant (`alpm_question_type_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    InstallIgnorepkg,
    ReplacePkg,
    ConflictPkg,
    CorruptedPkg,
    RemovePkgs,
    SelectProvider,
    ImportKey,
    /// A tag this crate does not know about
    Unknown(c_int),
}

impl QuestionType {
    /// Decode a raw tag; never fails
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            1 => QuestionType::InstallIgnorepkg,
            2 => QuestionType::ReplacePkg,
            4 => QuestionType::ConflictPkg,
            8 => QuestionType::CorruptedPkg,
            16 => QuestionType::RemovePkgs,
            32 => QuestionType::SelectProvider,
            64 => QuestionType::ImportKey,
            other => QuestionType::Unknown(other),
        }
    }

    /// Raw tag value
    pub fn as_raw(self) -> c_int {
        match self {
            QuestionType::InstallIgnorepkg => 1,
            QuestionType::ReplacePkg => 2,
            QuestionType::ConflictPkg => 4,
            QuestionType::CorruptedPkg => 8,
            QuestionType::RemovePkgs => 16,
            QuestionType::SelectProvider => 32,
            QuestionType::ImportKey => 64,
            QuestionType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::InstallIgnorepkg => f.write_str("install-ignorepkg"),
            QuestionType::ReplacePkg => f.write_str("replace-pkg"),
            QuestionType::ConflictPkg => f.write_str("conflict-pkg"),
            QuestionType::CorruptedPkg => f.write_str("corrupted-pkg"),
            QuestionType::RemovePkgs => f.write_str("remove-pkgs"),
            QuestionType::SelectProvider => f.write_str("select-provider"),
            QuestionType::ImportKey => f.write_str("import-key"),
            QuestionType::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A question record layout
pub trait Shape: sealed::Sealed {
    /// The `#[repr(C)]` struct this shape reads and writes
    type Raw;
}

/// A concrete question layout, identified by its tag
pub trait Variant: Shape {
    const TYPE: QuestionType;
}

/// Generic shape: tag and answer only
pub enum Any {}
/// "Install this package even though it is in IgnorePkg?"
pub enum InstallIgnorepkg {}
/// "Replace an installed package with another?"
pub enum Replace {}
/// "Which of these packages should satisfy the dependency?"
pub enum SelectProvider {}

impl sealed::Sealed for Any {}
impl sealed::Sealed for InstallIgnorepkg {}
impl sealed::Sealed for Replace {}
impl sealed::Sealed for SelectProvider {}

impl Shape for Any {
    type Raw = alpm_question_any_t;
}

impl Shape for InstallIgnorepkg {
    type Raw = alpm_question_install_ignorepkg_t;
}

impl Shape for Replace {
    type Raw = alpm_question_replace_t;
}

impl Shape for SelectProvider {
    type Raw = alpm_question_select_provider_t;
}

impl Variant for InstallIgnorepkg {
    const TYPE: QuestionType = QuestionType::InstallIgnorepkg;
}

impl Variant for Replace {
    const TYPE: QuestionType = QuestionType::ReplacePkg;
}

impl Variant for SelectProvider {
    const TYPE: QuestionType = QuestionType::SelectProvider;
}

/// In-place view of a foreign question record, typed by shape
///
/// Reads and writes go straight to the foreign memory; nothing is cached.
pub struct QuestionView<'a, S: Shape> {
    ptr: NonNull<S::Raw>,
    _marker: PhantomData<&'a mut S::Raw>,
}

/// Generic question view
pub type QuestionAny<'a> = QuestionView<'a, Any>;

/// A question narrowed to whichever shape its tag names
#[derive(Debug)]
pub enum Narrowed<'q> {
    InstallIgnorepkg(QuestionView<'q, InstallIgnorepkg>),
    Replace(QuestionView<'q, Replace>),
    SelectProvider(QuestionView<'q, SelectProvider>),
    /// No typed view for this tag; only the generic answer applies
    Other(QuestionType),
}

impl<S: Shape> QuestionView<'_, S> {
    /// Live discriminant
    pub fn question_type(&self) -> QuestionType {
        let prefix = self.ptr.as_ptr().cast::<alpm_question_any_t>();
        // SAFETY: every shape starts with the tag at offset 0 (asserted in
        // ffi::types) and the record is live for the view's lifetime.
        let raw = unsafe { ptr::addr_of!((*prefix).type_).read() };
        QuestionType::from_raw(raw)
    }

    /// Raw pointer to the record
    pub fn as_ptr(&self) -> *mut S::Raw {
        self.ptr.as_ptr()
    }
}

impl<'a> QuestionView<'a, Any> {
    /// Wrap the question pointer libalpm passed to the question callback
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live question record whose real
    /// layout matches its tag, and must stay valid and otherwise unused for
    /// `'a` (libalpm holds it for the duration of the callback).
    pub unsafe fn from_raw(ptr: *mut alpm_question_any_t) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _marker: PhantomData,
        })
    }

    /// Shared `answer` slot
    pub fn answer(&self) -> bool {
        // SAFETY: live record, see `from_raw`.
        decode_flag(unsafe { ptr::addr_of!((*self.as_ptr()).answer).read() })
    }

    /// Write the shared `answer` slot
    pub fn set_answer(&mut self, answer: bool) {
        // SAFETY: live record, see `from_raw`.
        unsafe { ptr::addr_of_mut!((*self.as_ptr()).answer).write(encode_flag(answer)) }
    }

    /// Narrow to shape `S` if the live tag is `S::TYPE`
    pub fn narrow<S: Variant>(&mut self) -> Result<QuestionView<'_, S>, NarrowError> {
        let found = self.question_type();
        if found != S::TYPE {
            return Err(NarrowError::WrongVariant {
                expected: S::TYPE,
                found,
            });
        }
        Ok(self.reinterpret())
    }

    /// Narrow to an install-ignored-package question
    pub fn install_ignorepkg(&mut self) -> Result<QuestionView<'_, InstallIgnorepkg>, NarrowError> {
        self.narrow()
    }

    /// Narrow to a replace-package question
    pub fn replace(&mut self) -> Result<QuestionView<'_, Replace>, NarrowError> {
        self.narrow()
    }

    /// Narrow to a select-provider question
    pub fn select_provider(&mut self) -> Result<QuestionView<'_, SelectProvider>, NarrowError> {
        self.narrow()
    }

    /// Narrow to whatever shape the live tag names
    pub fn classify(&mut self) -> Narrowed<'_> {
        match self.question_type() {
            QuestionType::InstallIgnorepkg => Narrowed::InstallIgnorepkg(self.reinterpret()),
            QuestionType::ReplacePkg => Narrowed::Replace(self.reinterpret()),
            QuestionType::SelectProvider => Narrowed::SelectProvider(self.reinterpret()),
            other => Narrowed::Other(other),
        }
    }

    // Callers must have just checked the live tag against S.
    fn reinterpret<S: Variant>(&mut self) -> QuestionView<'_, S> {
        QuestionView {
            ptr: self.ptr.cast(),
            _marker: PhantomData,
        }
    }
}

impl QuestionView<'_, InstallIgnorepkg> {
    /// Whether the ignored package will be installed
    pub fn install(&self) -> bool {
        // SAFETY: tag checked by `narrow`; record live for the view.
        decode_flag(unsafe { ptr::addr_of!((*self.as_ptr()).install).read() })
    }

    pub fn set_install(&mut self, install: bool) {
        // SAFETY: tag checked by `narrow`; record live for the view.
        unsafe { ptr::addr_of_mut!((*self.as_ptr()).install).write(encode_flag(install)) }
    }

    /// The ignored package
    pub fn pkg(&self) -> Option<PackageRef<'_>> {
        // SAFETY: tag checked by `narrow`; the package outlives the question.
        unsafe { PackageRef::from_raw(ptr::addr_of!((*self.as_ptr()).pkg).read()) }
    }
}

impl QuestionView<'_, Replace> {
    /// Whether the old package will be replaced
    pub fn replace(&self) -> bool {
        // SAFETY: tag checked by `narrow`; record live for the view.
        decode_flag(unsafe { ptr::addr_of!((*self.as_ptr()).replace).read() })
    }

    pub fn set_replace(&mut self, replace: bool) {
        // SAFETY: tag checked by `narrow`; record live for the view.
        unsafe { ptr::addr_of_mut!((*self.as_ptr()).replace).write(encode_flag(replace)) }
    }

    /// Installed package that would be removed
    pub fn old_pkg(&self) -> Option<PackageRef<'_>> {
        // SAFETY: tag checked by `narrow`; the package outlives the question.
        unsafe { PackageRef::from_raw(ptr::addr_of!((*self.as_ptr()).oldpkg).read()) }
    }

    /// Package that would replace it
    pub fn new_pkg(&self) -> Option<PackageRef<'_>> {
        // SAFETY: tag checked by `narrow`; the package outlives the question.
        unsafe { PackageRef::from_raw(ptr::addr_of!((*self.as_ptr()).newpkg).read()) }
    }

    /// Sync database the new package comes from
    pub fn new_db(&self) -> Option<DatabaseRef<'_>> {
        // SAFETY: tag checked by `narrow`; the database outlives the question.
        unsafe { DatabaseRef::from_raw(ptr::addr_of!((*self.as_ptr()).newdb).read()) }
    }
}

impl QuestionView<'_, SelectProvider> {
    /// Index of the chosen provider
    pub fn use_index(&self) -> i32 {
        // SAFETY: tag checked by `narrow`; record live for the view.
        unsafe { ptr::addr_of!((*self.as_ptr()).use_index).read() }
    }

    pub fn set_use_index(&mut self, index: i32) {
        // SAFETY: tag checked by `narrow`; record live for the view.
        unsafe { ptr::addr_of_mut!((*self.as_ptr()).use_index).write(index) }
    }

    /// Candidate packages, in the order libalpm offers them
    pub fn providers(&self) -> PackageList<'_> {
        // SAFETY: tag checked by `narrow`; libalpm keeps the provider list
        // alive for the duration of the question.
        unsafe { ForeignList::from_raw(ptr::addr_of!((*self.as_ptr()).providers).read()) }
    }

    /// The dependency being resolved
    pub fn depend(&self) -> Result<Depend, ConversionError> {
        // SAFETY: tag checked by `narrow`; null is handled by `from_raw`.
        unsafe { Depend::from_raw(ptr::addr_of!((*self.as_ptr()).depend).read()) }
    }
}

impl<S: Shape> fmt::Debug for QuestionView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionView")
            .field("type", &self.question_type())
            .field("ptr", &self.ptr)
            .finish()
    }
}
