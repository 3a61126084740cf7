//! Package files and backup entries

use crate::error::ConversionError;
use crate::ffi::marshal::string_field;
use crate::ffi::{alpm_backup_t, alpm_file_t, alpm_filelist_t};
use crate::list::FromForeign;
use log::debug;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::os::raw::c_void;

/// A file shipped by a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub size: i64,
    pub mode: u32,
}

impl File {
    /// Copy a foreign file entry
    ///
    /// An unset (null) name becomes an empty string.
    ///
    /// # Safety
    ///
    /// `file` must be null or point to a live `alpm_file_t`.
    pub unsafe fn from_raw(file: *const alpm_file_t) -> Result<Self, ConversionError> {
        let Some(file) = file.as_ref() else {
            return Err(ConversionError::NullRecord { record: "file" });
        };

        Ok(File {
            name: string_field(file.name, "file.name")?,
            size: file.size,
            mode: file.mode,
        })
    }
}

/// A file listed in a package's backup array, with its recorded hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackupFile {
    pub name: String,
    pub hash: String,
}

impl<'a> FromForeign<'a> for BackupFile {
    unsafe fn from_foreign(data: *mut c_void) -> Result<Self, ConversionError> {
        let Some(backup) = (data as *const alpm_backup_t).as_ref() else {
            return Err(ConversionError::NullRecord { record: "backup" });
        };

        Ok(BackupFile {
            name: string_field(backup.name, "backup.name")?,
            hash: string_field(backup.hash, "backup.hash")?,
        })
    }
}

/// Borrowed view of an `alpm_filelist_t`
///
/// Unlike most libalpm collections this is a counted array, not a chain.
#[derive(Debug, Clone, Copy)]
pub struct FileList<'a> {
    files: *const alpm_file_t,
    count: usize,
    _marker: PhantomData<&'a alpm_file_t>,
}

impl<'a> FileList<'a> {
    /// Wrap a file list
    ///
    /// A null `list`, or a null `files` array, is an empty list.
    ///
    /// # Safety
    ///
    /// `list` must be null or point to a live `alpm_filelist_t` whose
    /// `files` array holds `count` entries, all valid for `'a`.
    pub unsafe fn from_raw(list: *const alpm_filelist_t) -> Self {
        match list.as_ref() {
            Some(list) if !list.files.is_null() => Self {
                files: list.files,
                count: list.count,
                _marker: PhantomData,
            },
            _ => Self {
                files: std::ptr::null(),
                count: 0,
                _marker: PhantomData,
            },
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Decode the entry at `index`
    pub fn get(&self, index: usize) -> Option<Result<File, ConversionError>> {
        if index >= self.count {
            return None;
        }
        // SAFETY: `from_raw` guarantees `count` valid entries behind `files`.
        Some(unsafe { File::from_raw(self.files.add(index)) })
    }

    /// Decode and visit entries in order, stopping at the first failure
    pub fn for_each<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        E: From<ConversionError>,
        F: FnMut(File) -> Result<(), E>,
    {
        for index in 0..self.count {
            if let Some(file) = self.get(index) {
                visit(file?)?;
            }
        }
        Ok(())
    }

    /// Decode every entry, dropping the ones that fail
    pub fn collect(&self) -> Vec<File> {
        let files: Vec<File> = (0..self.count)
            .filter_map(|index| self.get(index))
            .filter_map(Result::ok)
            .collect();

        if files.len() < self.count {
            debug!(
                "collected {} file entries, skipped {} undecodable",
                files.len(),
                self.count - files.len()
            );
        }
        files
    }
}
