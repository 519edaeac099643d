use std::{error, fmt, io};

/// An error that occurred while building, decoding or encoding a record.
#[derive(Debug)]
pub struct Error {
    inner: ErrorInner,
}

#[derive(Debug)]
enum ErrorInner {
    Io(io::Error),
    Validation(&'static str),
    Decode(&'static str),
    Encode(&'static str),
}

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value was rejected when constructing a record.
    Validation,
    /// An I/O error occurred while reading filesystem metadata.
    Io(io::ErrorKind),
    /// The bytes of a field could not be decoded.
    Decode,
    /// A value does not fit its on-disk field.
    Encode,
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ErrorInner::Io(e) => e.fmt(f),
            ErrorInner::Validation(e) => f.write_str(e),
            ErrorInner::Decode(e) => f.write_str(e),
            ErrorInner::Encode(e) => f.write_str(e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.inner {
            ErrorInner::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::io(error)
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            ErrorInner::Io(e) => ErrorKind::Io(e.kind()),
            ErrorInner::Validation(_) => ErrorKind::Validation,
            ErrorInner::Decode(_) => ErrorKind::Decode,
            ErrorInner::Encode(_) => ErrorKind::Encode,
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Self {
            inner: ErrorInner::Io(error),
        }
    }

    pub(crate) fn validation(message: &'static str) -> Self {
        Self {
            inner: ErrorInner::Validation(message),
        }
    }

    pub(crate) fn decode(message: &'static str) -> Self {
        Self {
            inner: ErrorInner::Decode(message),
        }
    }

    pub(crate) fn encode(message: &'static str) -> Self {
        Self {
            inner: ErrorInner::Encode(message),
        }
    }
}

/// The `Result` type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kind_and_message() {
        let error = Error::validation("length must not be negative");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.to_string(), "length must not be negative");
        assert!(error.source().is_none());

        let error = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(error.kind(), ErrorKind::Io(io::ErrorKind::NotFound));
        assert_eq!(error.to_string(), "missing");
        assert!(error.source().is_some());
    }
}
