//! Interface for encoding archive metadata records.

mod util;
pub use util::*;

pub mod archive;
pub use archive::{write_global_header, write_member_header, LongNames};
