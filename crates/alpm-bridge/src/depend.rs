//! Dependencies (`alpm_depend_t`)
//!
//! [`Depend`] is a detached copy of a foreign dependency record;
//! [`ForeignDepend`] goes the other way, building a record libalpm can read
//! out of a `Depend`.

use crate::error::ConversionError;
use crate::ffi::alpm_depend_t;
use crate::ffi::marshal::{string_field, to_c_string};
use crate::list::FromForeign;
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::fmt;
use std::os::raw::{c_char, c_int, c_ulong, c_void};

/// Version constraint operator (`alpm_depmod_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepMod {
    /// No version constraint
    Any,
    /// `=`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl DepMod {
    /// Decode the raw `alpm_depmod_t` value
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            1 => Some(DepMod::Any),
            2 => Some(DepMod::Eq),
            3 => Some(DepMod::Ge),
            4 => Some(DepMod::Le),
            5 => Some(DepMod::Gt),
            6 => Some(DepMod::Lt),
            _ => None,
        }
    }

    /// Raw `alpm_depmod_t` value
    pub fn as_raw(self) -> c_int {
        match self {
            DepMod::Any => 1,
            DepMod::Eq => 2,
            DepMod::Ge => 3,
            DepMod::Le => 4,
            DepMod::Gt => 5,
            DepMod::Lt => 6,
        }
    }

    /// Operator as written in a dependency string
    pub fn as_str(self) -> &'static str {
        match self {
            DepMod::Any => "",
            DepMod::Eq => "=",
            DepMod::Ge => ">=",
            DepMod::Le => "<=",
            DepMod::Gt => ">",
            DepMod::Lt => "<",
        }
    }
}

impl fmt::Display for DepMod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency, copied out of libalpm
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Depend {
    pub name: String,
    pub version: String,
    pub description: String,
    pub name_hash: u64,
    pub modifier: DepMod,
}

impl Depend {
    /// Copy a foreign dependency record
    ///
    /// Unset (null) strings become empty strings.
    ///
    /// # Safety
    ///
    /// `dep` must be null or point to a live `alpm_depend_t`.
    pub unsafe fn from_raw(dep: *const alpm_depend_t) -> Result<Self, ConversionError> {
        let Some(dep) = dep.as_ref() else {
            return Err(ConversionError::NullRecord { record: "depend" });
        };

        Ok(Depend {
            name: string_field(dep.name, "depend.name")?,
            version: string_field(dep.version, "depend.version")?,
            description: string_field(dep.desc, "depend.desc")?,
            name_hash: u64::from(dep.name_hash),
            modifier: DepMod::from_raw(dep.mod_).ok_or(ConversionError::UnknownDepMod(dep.mod_))?,
        })
    }
}

/// `name`, operator, version: `glibc>=2.38`
impl fmt::Display for Depend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.modifier, self.version)
    }
}

impl<'a> FromForeign<'a> for Depend {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        Depend::from_raw(data as *const alpm_depend_t)
    }
}

/// An `alpm_depend_t` allocated and owned on the Rust side
///
/// Hand [`ForeignDepend::as_ptr`] to libalpm calls that only read the record
/// for the duration of the call. The record and its strings are freed when
/// this value is dropped; libalpm must never free them.
pub struct ForeignDepend {
    raw: Box<alpm_depend_t>,
    _name: CString,
    _version: CString,
    _desc: CString,
}

impl ForeignDepend {
    /// Encode `dep` as a foreign record
    ///
    /// Fails if a string holds a NUL byte or the name hash does not fit
    /// the platform's `unsigned long`.
    pub fn new(dep: &Depend) -> Result<Self, ConversionError> {
        let name = to_c_string(&dep.name, "depend.name")?;
        let version = to_c_string(&dep.version, "depend.version")?;
        let desc = to_c_string(&dep.description, "depend.desc")?;
        // c_ulong is 32 bits wide on some targets
        #[allow(clippy::unnecessary_fallible_conversions)]
        let name_hash =
            c_ulong::try_from(dep.name_hash).map_err(|_| ConversionError::OutOfRange {
                field: "depend.name_hash",
                value: dep.name_hash,
            })?;

        // CString buffers do not move when the CString itself does.
        let raw = Box::new(alpm_depend_t {
            name: name.as_ptr() as *mut c_char,
            version: version.as_ptr() as *mut c_char,
            desc: desc.as_ptr() as *mut c_char,
            name_hash,
            mod_: dep.modifier.as_raw(),
        });

        Ok(Self {
            raw,
            _name: name,
            _version: version,
            _desc: desc,
        })
    }

    /// Pointer to the record, valid while `self` is alive
    pub fn as_ptr(&self) -> *const alpm_depend_t {
        &*self.raw
    }

    /// Mutable pointer to the record, valid while `self` is alive
    pub fn as_mut_ptr(&mut self) -> *mut alpm_depend_t {
        &mut *self.raw
    }
}

impl fmt::Debug for ForeignDepend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignDepend")
            .field("raw", &self.as_ptr())
            .finish()
    }
}
