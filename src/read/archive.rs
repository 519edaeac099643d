//! Support for ar member headers.
//!
//! This decodes the global header and individual member headers. Walking the
//! members of an archive and resolving GNU extended names through the names
//! table are left to the caller.

use std::convert::TryFrom;

#[cfg(feature = "logging")]
use log::debug;

use crate::archive;
use crate::encoding::TextEncoding;
use crate::entry::ArEntry;
use crate::error::{Error, Result};
use crate::pod::Bytes;
use crate::read::{self, DecodeError};

/// Check for the file identification bytes at the start of `data`.
pub fn check_magic(data: &[u8]) -> Result<()> {
    let magic = Bytes(data)
        .read_bytes(archive::MAGIC.len())
        .decode_error("Invalid archive size")?;
    if magic.0 != archive::MAGIC {
        return Err(Error::decode("Unsupported archive identifier"));
    }
    Ok(())
}

/// The classified name field of a member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberName<'data> {
    /// A name stored in the header, without padding or the GNU trailing `/`.
    Plain(&'data [u8]),
    /// The GNU (or System V) symbol table.
    GnuSymbolTable,
    /// The GNU 64-bit symbol table.
    GnuSymbolTable64,
    /// The GNU names table.
    GnuNameTable,
    /// A GNU extended name, stored at this offset in the names table.
    GnuExtended(u64),
    /// A BSD extended name of this length, stored at the start of the member data.
    BsdExtended(u64),
}

/// A parsed archive member header.
#[derive(Debug, Clone, Copy)]
pub struct MemberHeader<'data> {
    header: &'data archive::Header,
    name: MemberName<'data>,
}

impl<'data> MemberHeader<'data> {
    /// Parse the member header at the start of `data`.
    ///
    /// This checks the terminator and classifies the name. The numeric fields
    /// are decoded on access.
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        let header = Bytes(data)
            .read::<archive::Header>()
            .decode_error("Invalid archive member header")?;
        if header.terminator != archive::TERMINATOR {
            return Err(Error::decode("Invalid archive terminator"));
        }
        let name = parse_name(&header.name)?;
        Ok(MemberHeader { header, name })
    }

    /// Return the raw header.
    #[inline]
    pub fn header(&self) -> &'data archive::Header {
        self.header
    }

    /// Return the classified name.
    #[inline]
    pub fn name(&self) -> MemberName<'data> {
        self.name
    }

    /// Parse the file modification timestamp.
    pub fn date(&self) -> Result<i64> {
        let date = read::parse_decimal(&self.header.date)?;
        i64::try_from(date).map_err(|_| Error::decode("Archive member date is too large"))
    }

    /// Parse the user ID.
    ///
    /// A blank field reads as 0.
    pub fn uid(&self) -> Result<i32> {
        let uid = read::parse_decimal_or_zero(&self.header.uid)?;
        i32::try_from(uid).map_err(|_| Error::decode("Archive member user ID is too large"))
    }

    /// Parse the group ID.
    ///
    /// A blank field reads as 0.
    pub fn gid(&self) -> Result<i32> {
        let gid = read::parse_decimal_or_zero(&self.header.gid)?;
        i32::try_from(gid).map_err(|_| Error::decode("Archive member group ID is too large"))
    }

    /// Parse the file mode.
    pub fn mode(&self) -> Result<i32> {
        let mode = read::parse_octal(&self.header.mode)?;
        i32::try_from(mode).map_err(|_| Error::decode("Archive member mode is too large"))
    }

    /// Parse the size of the member data.
    ///
    /// For BSD extended names this includes the name.
    pub fn size(&self) -> Result<i64> {
        let size = read::parse_decimal(&self.header.size)?;
        i64::try_from(size).map_err(|_| Error::decode("Archive member size is too large"))
    }

    /// Build an entry from a header with a plain name.
    ///
    /// Returns an error for special and extended names, since the name is not
    /// stored in the header.
    pub fn to_entry(&self, encoding: &dyn TextEncoding) -> Result<ArEntry> {
        match self.name {
            MemberName::Plain(name) => {
                let name = encoding.decode(name)?;
                self.entry_with_name(name, self.size()?)
            }
            _ => Err(Error::decode("Archive member name is not stored in the header")),
        }
    }

    fn entry_with_name(&self, name: String, length: i64) -> Result<ArEntry> {
        ArEntry::new(
            name,
            length,
            self.uid()?,
            self.gid()?,
            self.mode()?,
            self.date()?,
        )
        .map_err(|_| Error::decode("Invalid archive member size"))
    }
}

/// Decode the member header at the start of `data` into an entry.
///
/// BSD extended names are read from the bytes following the header, and the
/// entry length excludes them. Returns the entry and the number of bytes
/// consumed before the member data.
pub fn parse_entry(data: &[u8], encoding: &dyn TextEncoding) -> Result<(ArEntry, usize)> {
    let member = MemberHeader::parse(data)?;
    let (entry, consumed) = match member.name {
        MemberName::Plain(_) => (member.to_entry(encoding)?, archive::HEADER_SIZE),
        MemberName::BsdExtended(len) => {
            let len = usize::try_from(len)
                .ok()
                .decode_error("Invalid archive extended name length")?;
            let name_data = Bytes(data)
                .read_bytes_at(archive::HEADER_SIZE, len)
                .decode_error("Invalid archive extended name length")?;
            let name = match memchr::memchr(b'\0', name_data.0) {
                Some(end) => &name_data.0[..end],
                None => name_data.0,
            };
            let length = member
                .size()?
                .checked_sub(len as i64)
                .filter(|length| *length >= 0)
                .decode_error("Archive member size is smaller than its extended name")?;
            let entry = member.entry_with_name(encoding.decode(name)?, length)?;
            (entry, archive::HEADER_SIZE + len)
        }
        MemberName::GnuExtended(_) => {
            return Err(Error::decode(
                "Archive member name requires the GNU names table",
            ))
        }
        MemberName::GnuSymbolTable | MemberName::GnuSymbolTable64 | MemberName::GnuNameTable => {
            return Err(Error::decode("Archive member is a special member"))
        }
    };
    #[cfg(feature = "logging")]
    debug!(
        "decoded ar member {:?}: {} bytes, mode {:o}, header {} bytes",
        entry.name(),
        entry.length(),
        entry.mode(),
        consumed
    );
    Ok((entry, consumed))
}

fn parse_name(name: &[u8; 16]) -> Result<MemberName<'_>> {
    if name[0] == b'/' && (name[1] as char).is_ascii_digit() {
        let offset = read::parse_decimal(&name[1..])
            .map_err(|_| Error::decode("Invalid archive extended name offset"))?;
        Ok(MemberName::GnuExtended(offset))
    } else if name.starts_with(archive::BSD_EXTENDED_PREFIX)
        && (name[3] as char).is_ascii_digit()
    {
        let len = read::parse_decimal(&name[3..])
            .map_err(|_| Error::decode("Invalid archive extended name length"))?;
        Ok(MemberName::BsdExtended(len))
    } else if name[0] == b'/' {
        let name_len = memchr::memchr(b' ', name).unwrap_or(name.len());
        let name = &name[..name_len];
        Ok(if name == archive::GNU_SYMBOL_TABLE {
            MemberName::GnuSymbolTable
        } else if name == archive::GNU_SYMBOL_TABLE_64 {
            MemberName::GnuSymbolTable64
        } else if name == archive::GNU_NAME_TABLE {
            MemberName::GnuNameTable
        } else {
            MemberName::Plain(name)
        })
    } else {
        let name_len = memchr::memchr(b'/', name)
            .or_else(|| memchr::memchr(b' ', name))
            .unwrap_or(name.len());
        Ok(MemberName::Plain(&name[..name_len]))
    }
}
