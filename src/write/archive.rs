//! Support for writing ar headers.
//!
//! Only headers are written here. The caller copies the member data after
//! each header and pads odd sized members with a `\n`.

#[cfg(feature = "logging")]
use log::debug;

use crate::archive;
use crate::entry::ArEntry;
use crate::error::{Error, Result};
use crate::write::{encode_decimal, encode_octal, WritableBuffer};

/// How to write names that do not fit the name field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LongNames {
    /// Fail with an encoding error.
    #[default]
    Error,
    /// Use the BSD extended name form.
    ///
    /// The header holds `#1/` and the name length, and the name is written
    /// directly after the header as part of the member data.
    Bsd,
}

/// Write the file identification bytes.
pub fn write_global_header(buffer: &mut dyn WritableBuffer) {
    buffer.write_bytes(&archive::MAGIC);
}

/// Write the header for `entry`.
///
/// Returns the number of bytes written, which includes a BSD extended name.
pub fn write_member_header(
    buffer: &mut dyn WritableBuffer,
    entry: &ArEntry,
    long_names: LongNames,
) -> Result<usize> {
    let name = entry.name().as_bytes();
    let (header, extended_name) = if fits_header(name) {
        (member_header(entry, name, entry.length())?, None)
    } else {
        match long_names {
            LongNames::Error => {
                return Err(Error::encode(
                    "Archive member name does not fit the header",
                ))
            }
            LongNames::Bsd => {
                let len = name.len() as i64;
                let size = entry
                    .length()
                    .checked_add(len)
                    .ok_or_else(|| Error::encode("Archive member size is too large"))?;
                let mut header = member_header(entry, b"", size)?;
                let prefix = archive::BSD_EXTENDED_PREFIX;
                header.name[..prefix.len()].copy_from_slice(prefix);
                encode_decimal(&mut header.name[prefix.len()..], len)?;
                (header, Some(name))
            }
        }
    };

    let extended_len = extended_name.map_or(0, <[u8]>::len);
    buffer
        .reserve(archive::HEADER_SIZE + extended_len)
        .map_err(|()| Error::encode("Cannot allocate buffer"))?;
    buffer.write(&header);
    if let Some(name) = extended_name {
        buffer.write_bytes(name);
    }
    #[cfg(feature = "logging")]
    debug!(
        "encoded ar member {:?}: {} bytes, extended name {} bytes",
        entry.name(),
        entry.length(),
        extended_len
    );
    Ok(archive::HEADER_SIZE + extended_len)
}

// Readers stop a name at the first space or `/`.
fn fits_header(name: &[u8]) -> bool {
    name.len() <= archive::NAME_WIDTH
        && !name.is_empty()
        && memchr::memchr2(b' ', b'/', name).is_none()
}

fn member_header(entry: &ArEntry, name: &[u8], size: i64) -> Result<archive::Header> {
    let mut header = archive::Header {
        name: [b' '; 16],
        date: [b' '; 12],
        uid: [b' '; 6],
        gid: [b' '; 6],
        mode: [b' '; 8],
        size: [b' '; 10],
        terminator: archive::TERMINATOR,
    };
    header.name[..name.len()].copy_from_slice(name);
    encode_decimal(&mut header.date, entry.last_modified())?;
    encode_decimal(&mut header.uid, i64::from(entry.user_id()))?;
    encode_decimal(&mut header.gid, i64::from(entry.group_id()))?;
    encode_octal(&mut header.mode, i64::from(entry.mode()))?;
    encode_decimal(&mut header.size, size)?;
    Ok(header)
}
