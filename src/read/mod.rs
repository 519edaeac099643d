//! Interface for decoding archive metadata records.

use core::result;

use crate::error::{Error, Result};

mod util;
pub use util::*;

pub mod archive;

pub mod dump;
pub use dump::{DumpFlags, DumpSummary};

pub(crate) trait DecodeError<T> {
    fn decode_error(self, error: &'static str) -> Result<T>;
}

impl<T> DecodeError<T> for result::Result<T, ()> {
    fn decode_error(self, error: &'static str) -> Result<T> {
        self.map_err(|()| Error::decode(error))
    }
}

impl<T> DecodeError<T> for Option<T> {
    fn decode_error(self, error: &'static str) -> Result<T> {
        self.ok_or_else(|| Error::decode(error))
    }
}
