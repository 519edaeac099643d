//! Numeric and text codecs for fixed-width header fields.

use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::pod::Bytes;
use crate::read::DecodeError;

/// Read a big-endian signed 32-bit integer at `offset`.
///
/// Returns an error if `data` is too short.
#[inline]
pub fn read_i32_be(data: &[u8], offset: usize) -> Result<i32> {
    let mut bytes = Bytes(data)
        .read_bytes_at(offset, 4)
        .decode_error("Buffer too short for 32-bit field")?;
    let array = bytes
        .read_array::<4>()
        .decode_error("Buffer too short for 32-bit field")?;
    Ok(i32::from_be_bytes(array))
}

/// Decode `len` bytes at `offset` with the given encoding.
///
/// Padding is not removed; see [`trim_padding`].
pub fn decode_text(
    encoding: &dyn TextEncoding,
    data: &[u8],
    offset: usize,
    len: usize,
) -> Result<String> {
    let bytes = Bytes(data)
        .read_bytes_at(offset, len)
        .decode_error("Buffer too short for text field")?;
    encoding.decode(bytes.0)
}

/// Remove leading and trailing padding.
///
/// Any character at or below U+0020 counts as padding, which covers both
/// the NUL padding of dump headers and the space padding of ar headers.
#[inline]
pub fn trim_padding(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// Parse a space padded decimal field.
pub fn parse_decimal(field: &[u8]) -> Result<u64> {
    parse_u64_digits(field, 10).decode_error("Invalid decimal field")
}

/// Parse a space padded decimal field, reading an all-space field as zero.
///
/// Some toolchains leave the owner fields blank.
pub fn parse_decimal_or_zero(field: &[u8]) -> Result<u64> {
    if field.iter().all(|&c| c == b' ') {
        return Ok(0);
    }
    parse_decimal(field)
}

/// Parse a space padded octal field.
pub fn parse_octal(field: &[u8]) -> Result<u64> {
    parse_u64_digits(field, 8).decode_error("Invalid octal field")
}

// Digits end at the first space, and only spaces may follow.
fn parse_u64_digits(digits: &[u8], radix: u32) -> Option<u64> {
    if let [] | [b' ', ..] = digits {
        return None;
    }
    let mut result: u64 = 0;
    for (i, &c) in digits.iter().enumerate() {
        if c == b' ' {
            return if digits[i..].iter().all(|&c| c == b' ') {
                Some(result)
            } else {
                None
            };
        } else {
            let x = (c as char).to_digit(radix)?;
            result = result
                .checked_mul(u64::from(radix))?
                .checked_add(u64::from(x))?;
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Ascii, Latin1};
    use crate::ErrorKind;

    #[test]
    fn int32() {
        let data = [0xff, 0x00, 0x00, 0x03, 0xe8, 0x80, 0x00, 0x00, 0x00];
        assert_eq!(read_i32_be(&data, 1).unwrap(), 1000);
        assert_eq!(read_i32_be(&data, 5).unwrap(), i32::MIN);
        assert_eq!(read_i32_be(&data, 0).unwrap(), -0x00ff_fffd);
        assert_eq!(
            read_i32_be(&data, 6).unwrap_err().kind(),
            ErrorKind::Decode
        );
        assert!(read_i32_be(&data, usize::MAX).is_err());
    }

    #[test]
    fn text() {
        let data = b"xxbackup   \0\0yy";
        let text = decode_text(&Ascii, data, 2, 11).unwrap();
        assert_eq!(text, "backup   \0\0");
        assert_eq!(trim_padding(&text), "backup");
        assert_eq!(
            decode_text(&Ascii, data, 10, 10).unwrap_err().kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            decode_text(&Ascii, b"\xff", 0, 1).unwrap_err().kind(),
            ErrorKind::Decode
        );
        assert_eq!(decode_text(&Latin1, b"\xff", 0, 1).unwrap(), "\u{ff}");
    }

    #[test]
    fn trim() {
        assert_eq!(trim_padding("  /home \0"), "/home");
        assert_eq!(trim_padding("\0\0\0"), "");
        assert_eq!(trim_padding("a b"), "a b");
    }

    #[test]
    fn decimal() {
        assert_eq!(parse_decimal(b"1700000000  ").unwrap(), 1_700_000_000);
        assert_eq!(parse_decimal(b"9999999999").unwrap(), 9_999_999_999);
        assert_eq!(parse_decimal(b"0     ").unwrap(), 0);
        assert!(parse_decimal(b"      ").is_err());
        assert!(parse_decimal(b"").is_err());
        assert!(parse_decimal(b" 12   ").is_err());
        assert!(parse_decimal(b"12a   ").is_err());
        assert!(parse_decimal(b"-1    ").is_err());
        assert!(parse_decimal(b"99999999999999999999").is_err());
        assert!(parse_decimal(b"12 a  ").is_err());
        assert!(parse_decimal(b"12    7").is_err());
    }

    #[test]
    fn decimal_or_zero() {
        assert_eq!(parse_decimal_or_zero(b"      ").unwrap(), 0);
        assert_eq!(parse_decimal_or_zero(b"1000  ").unwrap(), 1000);
        assert!(parse_decimal_or_zero(b"x     ").is_err());
    }

    #[test]
    fn octal() {
        assert_eq!(parse_octal(b"100644  ").unwrap(), 0o100_644);
        assert_eq!(parse_octal(b"77777777").unwrap(), 0o7777_7777);
        let error = parse_octal(b"100648  ").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Decode);
        assert_eq!(error.to_string(), "Invalid octal field");
        assert!(parse_octal(b"644 zz  ").is_err());
    }
}
