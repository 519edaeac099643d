use std::convert::TryFrom;
use std::vec::Vec;

use crate::error::{Error, Result};
use crate::pod::{bytes_of, Pod};

/// Trait for writable buffer.
#[allow(clippy::len_without_is_empty)]
pub trait WritableBuffer {
    /// Returns position/offset for data to be written at.
    fn len(&self) -> usize;

    /// Reserves specified number of bytes in the buffer.
    fn reserve(&mut self, additional: usize) -> std::result::Result<(), ()>;

    /// Writes the specified slice of bytes at the end of the buffer.
    fn write_bytes(&mut self, val: &[u8]);

    /// Writes the specified `Pod` type at the end of the buffer.
    fn write_pod<T: Pod>(&mut self, val: &T)
    where
        Self: Sized,
    {
        self.write_bytes(bytes_of(val))
    }
}

impl<'a> dyn WritableBuffer + 'a {
    /// Writes the specified `Pod` type at the end of the buffer.
    pub fn write<T: Pod>(&mut self, val: &T) {
        self.write_bytes(bytes_of(val))
    }
}

impl WritableBuffer for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn reserve(&mut self, additional: usize) -> std::result::Result<(), ()> {
        self.reserve(additional);
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, val: &[u8]) {
        self.extend_from_slice(val)
    }
}

/// Encode `value` as a space padded decimal field.
///
/// Returns an error if `value` is negative or has more digits than `field`
/// is wide.
pub fn encode_decimal(field: &mut [u8], value: i64) -> Result<()> {
    let value = u64::try_from(value).map_err(|_| Error::encode("Negative value in decimal field"))?;
    write_u64_digits(field, value, 10).map_err(|()| Error::encode("Value too large for decimal field"))
}

/// Encode `value` as a space padded octal field.
///
/// Returns an error if `value` is negative or has more digits than `field`
/// is wide.
pub fn encode_octal(field: &mut [u8], value: i64) -> Result<()> {
    let value = u64::try_from(value).map_err(|_| Error::encode("Negative value in octal field"))?;
    write_u64_digits(field, value, 8).map_err(|()| Error::encode("Value too large for octal field"))
}

// Digits are left aligned and the rest of the field is filled with spaces.
fn write_u64_digits(field: &mut [u8], mut value: u64, radix: u64) -> std::result::Result<(), ()> {
    let mut digits = [0u8; 22];
    let mut count = 0;
    loop {
        digits[count] = b'0' + (value % radix) as u8;
        count += 1;
        value /= radix;
        if value == 0 {
            break;
        }
    }
    if count > field.len() {
        return Err(());
    }
    for (dest, digit) in field.iter_mut().zip(digits[..count].iter().rev()) {
        *dest = *digit;
    }
    for dest in &mut field[count..] {
        *dest = b' ';
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "read")]
    use crate::read;
    use crate::ErrorKind;

    #[test]
    fn writable_buffer() {
        let mut buffer: Vec<u8> = Vec::new();
        WritableBuffer::reserve(&mut buffer, 4).unwrap();
        buffer.write_bytes(b"ab");
        buffer.write_pod(&b'c');
        let dyn_buffer: &mut dyn WritableBuffer = &mut buffer;
        dyn_buffer.write(&b'd');
        assert_eq!(dyn_buffer.len(), 4);
        assert_eq!(buffer, b"abcd");
    }

    #[test]
    fn decimal() {
        let mut field = [0u8; 6];
        encode_decimal(&mut field, 1000).unwrap();
        assert_eq!(&field, b"1000  ");
        encode_decimal(&mut field, 0).unwrap();
        assert_eq!(&field, b"0     ");
        encode_decimal(&mut field, 999_999).unwrap();
        assert_eq!(&field, b"999999");

        let error = encode_decimal(&mut field, 1_000_000).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Encode);
        let error = encode_decimal(&mut field, -1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Encode);
    }

    #[test]
    fn octal() {
        let mut field = [0u8; 8];
        encode_octal(&mut field, 0o100_644).unwrap();
        assert_eq!(&field, b"100644  ");
        encode_octal(&mut field, 0o7777_7777).unwrap();
        assert_eq!(&field, b"77777777");
        assert!(encode_octal(&mut field, 0o1_0000_0000).is_err());
    }

    #[cfg(feature = "read")]
    #[test]
    fn round_trip() {
        // Boundaries of every ar header field width.
        let widths: &[(usize, bool)] = &[(12, false), (6, false), (8, true), (10, false)];
        for &(width, octal) in widths {
            let radix: i64 = if octal { 8 } else { 10 };
            let max = radix.pow(width as u32) - 1;
            for &value in &[0, 1, radix - 1, radix, max / radix, max - 1, max] {
                let mut field = vec![0u8; width];
                if octal {
                    encode_octal(&mut field, value).unwrap();
                    assert_eq!(read::parse_octal(&field).unwrap(), value as u64);
                } else {
                    encode_decimal(&mut field, value).unwrap();
                    assert_eq!(read::parse_decimal(&field).unwrap(), value as u64);
                }
            }
            let mut field = vec![0u8; width];
            let result = if octal {
                encode_octal(&mut field, max + 1)
            } else {
                encode_decimal(&mut field, max + 1)
            };
            assert!(result.is_err());
        }
    }
}
