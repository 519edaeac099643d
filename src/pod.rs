//! Tools for converting fixed-layout header structures to and from bytes.
//!
//! Every structure used here is made of byte arrays only, so there are no
//! alignment or endianness concerns; the checks are kept anyway so that the
//! helpers stay sound for any future `Pod` type.

// This module provides functions for both read and write features.
#![cfg_attr(not(all(feature = "read", feature = "write")), allow(dead_code))]

use core::{mem, slice};

/// A trait for types that can safely be converted from and to byte slices.
///
/// A type that is `Pod` must:
/// - be `#[repr(C)]` or `#[repr(transparent)]`
/// - have no invalid byte values
/// - have no padding
pub unsafe trait Pod: Copy + 'static {}

#[inline]
pub(crate) fn from_bytes<T: Pod>(data: &[u8]) -> Option<(&T, &[u8])> {
    let ptr = data.as_ptr();
    if (ptr as usize) % mem::align_of::<T>() != 0 {
        return None;
    }
    let size = mem::size_of::<T>();
    let tail = data.get(size..)?;
    // Safety:
    // The alignment and size are checked by this function.
    // The Pod trait ensures the type is valid to cast from bytes.
    let val = unsafe { &*ptr.cast() };
    Some((val, tail))
}

#[inline]
pub(crate) fn bytes_of<T: Pod>(val: &T) -> &[u8] {
    let size = mem::size_of::<T>();
    // Safety:
    // Any alignment is allowed.
    // The size is determined in this function.
    // The Pod trait ensures the type is valid to cast to bytes.
    unsafe { slice::from_raw_parts(slice::from_ref(val).as_ptr().cast(), size) }
}

/// A newtype for byte slices.
///
/// It has these important features:
/// - no methods that can panic, such as `Index`
/// - convenience methods for `Pod` types
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bytes<'data>(pub &'data [u8]);

impl<'data> Bytes<'data> {
    #[inline]
    pub fn skip(&mut self, offset: usize) -> Option<()> {
        match self.0.get(offset..) {
            Some(tail) => {
                self.0 = tail;
                Some(())
            }
            None => {
                self.0 = &[];
                None
            }
        }
    }

    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Option<Bytes<'data>> {
        match (self.0.get(..count), self.0.get(count..)) {
            (Some(head), Some(tail)) => {
                self.0 = tail;
                Some(Bytes(head))
            }
            _ => {
                self.0 = &[];
                None
            }
        }
    }

    #[inline]
    pub fn read_bytes_at(mut self, offset: usize, count: usize) -> Option<Bytes<'data>> {
        self.skip(offset)?;
        self.read_bytes(count)
    }

    #[inline]
    pub fn read<T: Pod>(&mut self) -> Option<&'data T> {
        match from_bytes(self.0) {
            Some((value, tail)) => {
                self.0 = tail;
                Some(value)
            }
            None => {
                self.0 = &[];
                None
            }
        }
    }

    /// Read a fixed size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0; N];
        array.copy_from_slice(bytes.0);
        Some(array)
    }
}

macro_rules! unsafe_impl_pod {
    ($($struct_name:ident),+ $(,)?) => {
        $(
            unsafe impl Pod for $struct_name { }
        )+
    }
}

unsafe_impl_pod!(u8);
