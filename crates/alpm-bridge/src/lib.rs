//! alpm-bridge - safe access to libalpm-owned data
//!
//! libalpm hands its callers two kinds of memory it keeps ownership of:
//! - intrusive linked lists (`alpm_list_t`) of strings, dependencies,
//!   packages and backup entries
//! - question records, a tagged union of structs that share a leading
//!   `type` field, which the caller answers by writing into them
//!
//! This crate wraps both without taking ownership:
//! - [`ForeignList`] walks a borrowed chain and decodes its payloads
//! - [`QuestionView`] narrows a question to its concrete shape after
//!   checking the live discriminant, then reads and writes its fields in place
//! - [`Responder`] answers questions according to an [`AnswersConfig`]
//!
//! Decoded values ([`Depend`], [`File`], [`BackupFile`]) are detached
//! copies that can be kept after libalpm frees the originals.

/// alpm-bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod depend;
pub mod error;
pub mod ffi;
pub mod file;
pub mod list;
pub mod package;
pub mod question;
pub mod responder;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;

pub use alpm_bridge_config::AnswersConfig;
pub use depend::{DepMod, Depend, ForeignDepend};
pub use error::{ConversionError, NarrowError};
pub use file::{BackupFile, File, FileList};
pub use list::{
    BackupList, Collected, DependList, ForeignList, FromForeign, PackageList, StringList,
};
pub use package::{DatabaseRef, PackageRef};
pub use question::{
    Any, InstallIgnorepkg, Narrowed, QuestionAny, QuestionType, QuestionView, Replace,
    SelectProvider, Shape, Variant,
};
pub use responder::{Decision, Responder};
