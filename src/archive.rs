//! Archive definitions.
//!
//! These definitions are independent of read/write support, although we do implement
//! some traits useful for those.

use crate::pod::Pod;

/// File identification bytes stored at the beginning of the file.
pub const MAGIC: [u8; 8] = *b"!<arch>\n";

/// The terminator for each archive member header.
pub const TERMINATOR: [u8; 2] = *b"`\n";

/// The size in bytes of a member header.
pub const HEADER_SIZE: usize = 60;

/// The width of the name field.
///
/// Longer names need either the BSD or the GNU extended name form.
pub const NAME_WIDTH: usize = 16;

/// Name prefix of a BSD extended name, followed by the decimal name length.
///
/// The name itself is stored at the start of the member data.
pub const BSD_EXTENDED_PREFIX: &[u8] = b"#1/";

/// Name of the GNU (or System V) symbol table member.
pub const GNU_SYMBOL_TABLE: &[u8] = b"/";

/// Name of the GNU 64-bit symbol table member.
pub const GNU_SYMBOL_TABLE_64: &[u8] = b"/SYM64/";

/// Name of the GNU names table member.
pub const GNU_NAME_TABLE: &[u8] = b"//";

/// The file mode used when none is supplied: a regular file with mode 644.
pub const DEFAULT_MODE: i32 = 0o100_644;

/// The header at the start of an archive member.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Header {
    /// The file name.
    pub name: [u8; 16],
    /// File modification timestamp in decimal.
    pub date: [u8; 12],
    /// User ID in decimal.
    pub uid: [u8; 6],
    /// Group ID in decimal.
    pub gid: [u8; 6],
    /// File mode in octal.
    pub mode: [u8; 8],
    /// File size in decimal.
    pub size: [u8; 10],
    /// Must be equal to `TERMINATOR`.
    pub terminator: [u8; 2],
}

unsafe_impl_pod!(Header);
