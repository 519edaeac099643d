//! Dump definitions.
//!
//! Only the volume summary is described here. The summary lives in the
//! `TS_TAPE` header block at the start of every volume, and all values in it
//! are stored big-endian.

/// The size of a tape block.
pub const TP_BSIZE: usize = 1024;

/// The width of the volume label field.
pub const LBLSIZE: usize = 16;

/// The width of the filesystem, device and host name fields.
pub const NAMELEN: usize = 64;

/// Offset of the dump date, in seconds since the epoch.
pub const DATE_OFFSET: usize = 4;
/// Offset of the date of the previous dump, in seconds since the epoch.
pub const DDATE_OFFSET: usize = 8;
/// Offset of the volume number.
pub const VOLUME_OFFSET: usize = 12;
/// Offset of the volume label.
pub const LABEL_OFFSET: usize = 676;
/// Offset of the dump level.
pub const LEVEL_OFFSET: usize = LABEL_OFFSET + LBLSIZE;
/// Offset of the name of the dumped filesystem.
pub const FILESYS_OFFSET: usize = LEVEL_OFFSET + 4;
/// Offset of the name of the dumped device.
pub const DEVNAME_OFFSET: usize = FILESYS_OFFSET + NAMELEN;
/// Offset of the name of the dumped host.
pub const HOST_OFFSET: usize = DEVNAME_OFFSET + NAMELEN;
/// Offset of the flags.
pub const FLAGS_OFFSET: usize = HOST_OFFSET + NAMELEN;
/// Offset of the inode of the first record on this volume.
pub const FIRSTREC_OFFSET: usize = FLAGS_OFFSET + 4;
/// Offset of the number of records per tape block.
pub const NTREC_OFFSET: usize = FIRSTREC_OFFSET + 4;

/// The number of bytes the summary fields span.
pub const SUMMARY_SIZE: usize = NTREC_OFFSET + 4;

// Values for the flags field.
/// The new header format is in use.
pub const DR_NEWHEADER: u32 = 0x0001;
/// The new inode format is in use.
pub const DR_NEWINODEFMT: u32 = 0x0002;
/// The volume is compressed.
///
/// Individual blocks may or may not be compressed. The first block is never
/// compressed.
pub const DR_COMPRESSED: u32 = 0x0080;
/// The volume contains only metadata.
pub const DR_METAONLY: u32 = 0x0100;
/// The volume contains extended attributes.
pub const DR_EXTATTRIBUTES: u32 = 0x8000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(LEVEL_OFFSET, 692);
        assert_eq!(FILESYS_OFFSET, 696);
        assert_eq!(DEVNAME_OFFSET, 760);
        assert_eq!(HOST_OFFSET, 824);
        assert_eq!(FLAGS_OFFSET, 888);
        assert_eq!(FIRSTREC_OFFSET, 892);
        assert_eq!(NTREC_OFFSET, 896);
        assert_eq!(SUMMARY_SIZE, 900);
        assert!(SUMMARY_SIZE <= TP_BSIZE);
    }
}
