//! Support for dump volume summaries.

use std::convert::TryFrom;
use std::hash::{Hash, Hasher};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(feature = "logging")]
use log::{debug, warn};

use crate::dump;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::read::{decode_text, read_i32_be, trim_padding};

/// The flags of a dump volume.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DumpFlags(u32);

impl DumpFlags {
    /// Create flags from the raw mask.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        DumpFlags(bits)
    }

    /// Return the raw mask.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// The new header format is in use.
    ///
    /// The old format is not supported; this is false for old volumes.
    #[inline]
    pub fn is_new_header(self) -> bool {
        self.0 & dump::DR_NEWHEADER != 0
    }

    /// The new inode format is in use.
    ///
    /// The old format is not supported; this is false for old volumes.
    #[inline]
    pub fn is_new_inode(self) -> bool {
        self.0 & dump::DR_NEWINODEFMT != 0
    }

    /// Neither the new header nor the new inode format is in use.
    #[inline]
    pub fn is_old_format(self) -> bool {
        !self.is_new_header() && !self.is_new_inode()
    }

    /// The volume is compressed.
    ///
    /// Individual blocks may or may not be compressed. The first block is
    /// never compressed.
    #[inline]
    pub fn is_compressed(self) -> bool {
        self.0 & dump::DR_COMPRESSED != 0
    }

    /// The volume contains only metadata.
    #[inline]
    pub fn is_metadata_only(self) -> bool {
        self.0 & dump::DR_METAONLY != 0
    }

    /// The volume contains extended attributes.
    #[inline]
    pub fn is_extended_attributes(self) -> bool {
        self.0 & dump::DR_EXTATTRIBUTES != 0
    }
}

/// Identifying information about a dump volume.
///
/// This is decoded once from the volume header and may be edited afterwards,
/// for example when a later volume of the same dump revises a field.
///
/// Two summaries are equal when they describe the same dump run: the device,
/// dump date and host match. The volume number and the other fields are not
/// compared.
#[derive(Debug, Clone)]
pub struct DumpSummary {
    dump_date: i64,
    previous_dump_date: i64,
    volume: i32,
    label: String,
    level: i32,
    filesys: String,
    devname: String,
    hostname: String,
    flags: DumpFlags,
    firstrec: i32,
    ntrec: i32,
}

impl DumpSummary {
    /// Decode the summary from a volume header block.
    ///
    /// `data` must hold at least `dump::SUMMARY_SIZE` bytes. Text fields are
    /// decoded with `encoding` and trimmed. Any field that fails to decode
    /// fails the whole summary.
    pub fn parse(data: &[u8], encoding: &dyn TextEncoding) -> Result<Self> {
        if data.len() < dump::SUMMARY_SIZE {
            return Err(Error::decode("Dump volume header is too short"));
        }
        let text = |offset, len| -> Result<String> {
            let text = decode_text(encoding, data, offset, len)?;
            Ok(trim_padding(&text).to_string())
        };
        let summary = DumpSummary {
            dump_date: 1000 * i64::from(read_i32_be(data, dump::DATE_OFFSET)?),
            previous_dump_date: 1000 * i64::from(read_i32_be(data, dump::DDATE_OFFSET)?),
            volume: read_i32_be(data, dump::VOLUME_OFFSET)?,
            label: text(dump::LABEL_OFFSET, dump::LBLSIZE)?,
            level: read_i32_be(data, dump::LEVEL_OFFSET)?,
            filesys: text(dump::FILESYS_OFFSET, dump::NAMELEN)?,
            devname: text(dump::DEVNAME_OFFSET, dump::NAMELEN)?,
            hostname: text(dump::HOST_OFFSET, dump::NAMELEN)?,
            flags: DumpFlags::from_bits(read_i32_be(data, dump::FLAGS_OFFSET)? as u32),
            firstrec: read_i32_be(data, dump::FIRSTREC_OFFSET)?,
            ntrec: read_i32_be(data, dump::NTREC_OFFSET)?,
        };
        #[cfg(feature = "logging")]
        {
            debug!(
                "decoded dump summary: host {:?}, filesystem {:?}, volume {}, level {}, flags {:#06x}",
                summary.hostname,
                summary.filesys,
                summary.volume,
                summary.level,
                summary.flags.bits()
            );
            if summary.flags.is_old_format() {
                warn!(
                    "dump volume {} uses the old header and inode formats",
                    summary.volume
                );
            }
        }
        Ok(summary)
    }

    /// The date of this dump.
    pub fn dump_date(&self) -> SystemTime {
        from_epoch_millis(self.dump_date)
    }

    /// The date of this dump in milliseconds since the epoch.
    #[inline]
    pub fn dump_date_millis(&self) -> i64 {
        self.dump_date
    }

    /// Set the date of this dump.
    pub fn set_dump_date(&mut self, date: SystemTime) {
        self.dump_date = epoch_millis(date);
    }

    /// The date of the previous dump at this level or lower.
    ///
    /// This is the epoch for a level 0 dump.
    pub fn previous_dump_date(&self) -> SystemTime {
        from_epoch_millis(self.previous_dump_date)
    }

    /// The date of the previous dump in milliseconds since the epoch.
    #[inline]
    pub fn previous_dump_date_millis(&self) -> i64 {
        self.previous_dump_date
    }

    /// Set the date of the previous dump.
    pub fn set_previous_dump_date(&mut self, date: SystemTime) {
        self.previous_dump_date = epoch_millis(date);
    }

    /// The volume (tape) number.
    #[inline]
    pub fn volume(&self) -> i32 {
        self.volume
    }

    /// Set the volume (tape) number.
    #[inline]
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume;
    }

    /// The dump label. This is either generated or given by the user.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the dump label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// The level of this dump, between 0 and 9.
    ///
    /// A level 0 dump is a complete dump of the filesystem. A level `n` dump
    /// contains every file that changed since the last dump at level `n` or
    /// lower.
    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Set the dump level.
    #[inline]
    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    /// The last mount point of the filesystem, e.g. `/home`.
    #[inline]
    pub fn filesystem(&self) -> &str {
        &self.filesys
    }

    /// Set the last mount point.
    pub fn set_filesystem(&mut self, filesystem: impl Into<String>) {
        self.filesys = filesystem.into();
    }

    /// The device name, e.g. `/dev/sda3`.
    #[inline]
    pub fn devname(&self) -> &str {
        &self.devname
    }

    /// Set the device name.
    pub fn set_devname(&mut self, devname: impl Into<String>) {
        self.devname = devname.into();
    }

    /// The name of the host the dump was made on.
    #[inline]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Set the host name.
    pub fn set_hostname(&mut self, hostname: impl Into<String>) {
        self.hostname = hostname.into();
    }

    /// The volume flags.
    #[inline]
    pub fn flags(&self) -> DumpFlags {
        self.flags
    }

    /// Set the volume flags.
    #[inline]
    pub fn set_flags(&mut self, flags: DumpFlags) {
        self.flags = flags;
    }

    /// See [`DumpFlags::is_new_header`].
    #[inline]
    pub fn is_new_header(&self) -> bool {
        self.flags.is_new_header()
    }

    /// See [`DumpFlags::is_new_inode`].
    #[inline]
    pub fn is_new_inode(&self) -> bool {
        self.flags.is_new_inode()
    }

    /// See [`DumpFlags::is_compressed`].
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.flags.is_compressed()
    }

    /// See [`DumpFlags::is_metadata_only`].
    #[inline]
    pub fn is_metadata_only(&self) -> bool {
        self.flags.is_metadata_only()
    }

    /// See [`DumpFlags::is_extended_attributes`].
    #[inline]
    pub fn is_extended_attributes(&self) -> bool {
        self.flags.is_extended_attributes()
    }

    /// The inode of the first record on this volume.
    #[inline]
    pub fn first_record(&self) -> i32 {
        self.firstrec
    }

    /// Set the inode of the first record.
    #[inline]
    pub fn set_first_record(&mut self, firstrec: i32) {
        self.firstrec = firstrec;
    }

    /// The number of records per tape block, typically between 10 and 32.
    #[inline]
    pub fn ntrec(&self) -> i32 {
        self.ntrec
    }

    /// Set the number of records per tape block.
    #[inline]
    pub fn set_ntrec(&mut self, ntrec: i32) {
        self.ntrec = ntrec;
    }
}

impl PartialEq for DumpSummary {
    fn eq(&self, other: &Self) -> bool {
        self.devname == other.devname
            && self.dump_date == other.dump_date
            && self.hostname == other.hostname
    }
}

impl Eq for DumpSummary {}

impl Hash for DumpSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.devname.hash(state);
        self.dump_date.hash(state);
        self.hostname.hash(state);
    }
}

// Saturates at the ends of the i64 range.
fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            let millis = i64::try_from(before.as_millis()).unwrap_or(i64::MAX);
            if before.subsec_nanos() % 1_000_000 != 0 {
                (-millis).saturating_sub(1)
            } else {
                -millis
            }
        }
    }
}

fn from_epoch_millis(millis: i64) -> SystemTime {
    if millis >= 0 {
        UNIX_EPOCH + Duration::from_millis(millis as u64)
    } else {
        UNIX_EPOCH - Duration::from_millis(millis.unsigned_abs())
    }
}
