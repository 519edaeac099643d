//! Text encodings for byte strings stored in archive headers.
//!
//! Headers store names and labels as raw bytes. How those bytes map to
//! characters depends on the system that wrote the archive, so decoders take
//! a [`TextEncoding`] rather than assuming one.

use crate::error::{Error, Result};

/// Decodes byte strings stored in an archive into text.
pub trait TextEncoding {
    /// Decode `bytes` into a string.
    ///
    /// Returns an error if `bytes` is not valid for this encoding. Padding is
    /// decoded like any other byte.
    fn decode(&self, bytes: &[u8]) -> Result<String>;
}

/// Strict UTF-8.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Utf8;

impl TextEncoding for Utf8 {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(String::from)
            .map_err(|_| Error::decode("Invalid UTF-8 in text field"))
    }
}

/// Strict 7-bit ASCII.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ascii;

impl TextEncoding for Ascii {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        if !bytes.is_ascii() {
            return Err(Error::decode("Non-ASCII byte in text field"));
        }
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// ISO-8859-1.
///
/// Every byte maps to the code point of the same value, so decoding never
/// fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Latin1;

impl TextEncoding for Latin1 {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn utf8() {
        assert_eq!(Utf8.decode("häst".as_bytes()).unwrap(), "häst");
        assert_eq!(Utf8.decode(b"").unwrap(), "");
        let error = Utf8.decode(b"h\xe4st").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Decode);
    }

    #[test]
    fn ascii() {
        assert_eq!(Ascii.decode(b"backup\0\0").unwrap(), "backup\0\0");
        assert_eq!(Ascii.decode(b"h\xe4st").unwrap_err().kind(), ErrorKind::Decode);
    }

    #[test]
    fn latin1() {
        assert_eq!(Latin1.decode(b"h\xe4st").unwrap(), "häst");
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(Latin1.decode(&all).unwrap().chars().count(), 256);
    }

    #[test]
    fn object_safe() {
        let encodings: [&dyn TextEncoding; 3] = [&Utf8, &Ascii, &Latin1];
        for encoding in encodings.iter() {
            assert_eq!(encoding.decode(b"host").unwrap(), "host");
        }
    }
}
