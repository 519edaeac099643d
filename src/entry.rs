//! The ar member model.

use std::convert::TryFrom;
use std::fs::{self, Metadata};
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::archive;
use crate::error::{Error, Result};

/// How symbolic links are treated when reading filesystem metadata.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LinkOption {
    /// Use the metadata of the link target.
    #[default]
    Follow,
    /// Use the metadata of the link itself.
    NoFollow,
}

/// A member of an ar archive.
///
/// Names are unique within an archive, so two entries are equal when their
/// names are equal, whatever their other fields. `Hash` agrees with this.
///
/// The name is not limited in memory. The 16 byte limit of the header only
/// applies when the entry is written, see `write::archive`.
#[derive(Debug, Clone)]
pub struct ArEntry {
    name: String,
    length: i64,
    user_id: i32,
    group_id: i32,
    mode: i32,
    last_modified: i64,
}

impl ArEntry {
    /// Create a new entry.
    ///
    /// `last_modified` is in seconds since the epoch.
    ///
    /// Returns a validation error if `length` is negative.
    pub fn new(
        name: impl Into<String>,
        length: i64,
        user_id: i32,
        group_id: i32,
        mode: i32,
        last_modified: i64,
    ) -> Result<Self> {
        if length < 0 {
            return Err(Error::validation("length must not be negative"));
        }
        Ok(ArEntry {
            name: name.into(),
            length,
            user_id,
            group_id,
            mode,
            last_modified,
        })
    }

    /// Create a new entry owned by root, with mode `0100644` and the current
    /// time as its modification time.
    pub fn with_length(name: impl Into<String>, length: i64) -> Result<Self> {
        Self::new(name, length, 0, 0, archive::DEFAULT_MODE, now_seconds())
    }

    /// Create a new entry from the metadata of the file at `path`.
    ///
    /// Symbolic links are followed.
    pub fn from_path(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self> {
        Self::from_path_with(path, name, LinkOption::Follow)
    }

    /// Create a new entry from the metadata of the file at `path`.
    ///
    /// Returns an I/O error if the metadata cannot be read.
    pub fn from_path_with(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        links: LinkOption,
    ) -> Result<Self> {
        let metadata = match links {
            LinkOption::Follow => fs::metadata(path)?,
            LinkOption::NoFollow => fs::symlink_metadata(path)?,
        };
        Self::from_metadata(&metadata, name)
    }

    /// Create a new entry from already read filesystem metadata.
    ///
    /// The length is the file size for regular files and 0 for anything
    /// else. The owner is root and the mode is `0100644`; neither is taken
    /// from `metadata`.
    pub fn from_metadata(metadata: &Metadata, name: impl Into<String>) -> Result<Self> {
        let length = if metadata.is_file() {
            i64::try_from(metadata.len())
                .map_err(|_| Error::validation("file is too large for an ar entry"))?
        } else {
            0
        };
        let last_modified = epoch_seconds(metadata.modified()?);
        Self::new(name, length, 0, 0, archive::DEFAULT_MODE, last_modified)
    }

    /// The name of the member.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The length of the member data in bytes.
    #[inline]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// The length of the member data in bytes.
    ///
    /// Same as [`ArEntry::length`].
    #[inline]
    pub fn size(&self) -> i64 {
        self.length
    }

    /// Numeric user ID of the owner.
    #[inline]
    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    /// Numeric group ID of the owner.
    #[inline]
    pub fn group_id(&self) -> i32 {
        self.group_id
    }

    /// The Unix file type and permission bits.
    #[inline]
    pub fn mode(&self) -> i32 {
        self.mode
    }

    /// Last modification time in seconds since the epoch.
    #[inline]
    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    /// Last modification time.
    pub fn last_modified_time(&self) -> SystemTime {
        from_epoch_seconds(self.last_modified)
    }

    /// Always false; the ar format has no directories.
    #[inline]
    pub fn is_directory(&self) -> bool {
        false
    }
}

impl PartialEq for ArEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ArEntry {}

impl Hash for ArEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

fn now_seconds() -> i64 {
    epoch_seconds(SystemTime::now())
}

// Truncates towards the past, so sub-second precision is dropped.
fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => {
            let before = before.duration();
            let mut seconds = -(before.as_secs() as i64);
            if before.subsec_nanos() != 0 {
                seconds -= 1;
            }
            seconds
        }
    }
}

fn from_epoch_seconds(seconds: i64) -> SystemTime {
    if seconds >= 0 {
        UNIX_EPOCH + Duration::from_secs(seconds as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(seconds.unsigned_abs())
    }
}
