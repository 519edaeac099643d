//! # `arcmeta`
//!
//! The `arcmeta` crate models the fixed-layout metadata records of two
//! archive containers:
//!
//! * members of `ar` archives, see [`ArEntry`], [`read::archive`] and
//!   [`write::archive`];
//! * volume summaries of Unix `dump` backups, see [`read::DumpSummary`].
//!
//! Raw format definitions live in the [`archive`] and [`dump`] modules.
//! Text stored in headers is decoded through a [`TextEncoding`], so callers
//! choose how archive bytes map to characters.
//!
//! ## Cargo features
//!
//! * `read`: decoding of ar member headers and dump volume summaries.
//! * `write`: encoding of ar headers.
//! * `logging`: emit `log` records while decoding and encoding.
//!
//! All features are enabled by default.

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

#[macro_use]
mod pod;
pub use pod::Pod;

pub mod archive;
pub mod dump;

mod encoding;
pub use encoding::{Ascii, Latin1, TextEncoding, Utf8};

mod entry;
pub use entry::{ArEntry, LinkOption};

mod error;
pub use error::{Error, ErrorKind, Result};

#[cfg(feature = "read")]
pub mod read;

#[cfg(feature = "write")]
pub mod write;
