//! Core traits and types for foldsort.
//!
//! This module defines:
//! - [`KeyAccessor`]: The trait that exposes a collection's strings to the engines.
//! - [`compare_folded`]: The case-insensitive total order every engine agrees on.
//! - PackedKey: Internal digit/index word used by the radix engines.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::error::{Result, SortError};

/// Number of bytes loaded into a packed key at once.
pub const DIGIT_LANES: usize = 4;

/// Largest element count the packed key index field can address.
pub const MAX_ELEMENTS: usize = u32::MAX as usize;

/// Case-folds a single byte. Only ASCII letters change.
#[inline(always)]
pub fn fold(byte: u8) -> u8 {
    byte.to_ascii_lowercase()
}

/// Returns the part of `key` that participates in ordering.
///
/// A string ends at the end of the slice or at its first NUL byte.
#[inline]
pub fn terminated(key: &[u8]) -> &[u8] {
    match key.iter().position(|&b| b == 0) {
        Some(end) => &key[..end],
        None => key,
    }
}

/// Compares two strings case-insensitively, byte by byte.
///
/// Bytes are folded with [`fold`] and compared until the first difference or
/// terminator. A string that is a strict prefix of another sorts first.
///
/// ```
/// use std::cmp::Ordering;
/// use foldsort::compare_folded;
///
/// assert_eq!(compare_folded(b"Apple", b"apple"), Ordering::Equal);
/// assert_eq!(compare_folded(b"a", b"AA"), Ordering::Less);
/// assert_eq!(compare_folded(b"Zoo", b"apple"), Ordering::Greater);
/// ```
pub fn compare_folded(a: &[u8], b: &[u8]) -> Ordering {
    let a = terminated(a).iter().map(|&byte| fold(byte));
    let b = terminated(b).iter().map(|&byte| fold(byte));
    a.cmp(b)
}

/// Checks that `len` elements fit the packed key layout.
pub(crate) fn ensure_supported(len: usize) -> Result<()> {
    if len > MAX_ELEMENTS {
        return Err(SortError::UnsupportedSize {
            len,
            max: MAX_ELEMENTS,
        });
    }
    Ok(())
}

/// A trait for accessing string data from a collection without copying.
///
/// This trait allows the engines to sort any collection whose elements can be
/// viewed as byte slices (e.g., `Vec<String>`, `Vec<&[u8]>`, or flat buffers
/// with an offsets table).
///
/// # Examples
///
/// Implementing for a custom struct:
///
/// ```
/// use foldsort::core::KeyAccessor;
///
/// struct Lines {
///     data: Vec<String>,
/// }
///
/// impl KeyAccessor for Lines {
///     fn get_key(&self, index: usize) -> &[u8] {
///         self.data[index].as_bytes()
///     }
///
///     fn len(&self) -> usize {
///         self.data.len()
///     }
/// }
/// ```
pub trait KeyAccessor {
    /// Returns a byte slice representing the string at the given index.
    fn get_key(&self, index: usize) -> &[u8];

    /// Returns the number of items in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads the case-folded window `[offset, offset + 4)` of the string at
    /// `index`, most significant byte first.
    ///
    /// Lanes at and after the terminator read as zero, so numeric comparison
    /// of two windows matches [`compare_folded`] on the same bytes. No byte
    /// after the terminator is read.
    #[inline(always)]
    fn load_digit(&self, index: usize, offset: usize) -> u32 {
        let key = self.get_key(index);
        let mut lanes = [0u8; DIGIT_LANES];
        for (lane, slot) in lanes.iter_mut().enumerate() {
            match key.get(offset + lane) {
                Some(&byte) if byte != 0 => *slot = fold(byte),
                _ => break,
            }
        }
        u32::from_be_bytes(lanes)
    }
}

// Blanket implementation for indexable slices of byte-ref types.
impl<T: AsRef<[u8]>> KeyAccessor for [T] {
    fn get_key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

// Explicit Vec impl to improve ergonomics (avoiding .as_slice()).
impl<T: AsRef<[u8]>> KeyAccessor for Vec<T> {
    fn get_key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

// VecDeque provides O(1) random access, which is all the engines need.
impl<T: AsRef<[u8]>> KeyAccessor for VecDeque<T> {
    fn get_key(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

/// Digit window plus element index, packed so that integer order is
/// (window, index) order.
///
/// While an element is pending, the high 32 bits hold its current window and
/// the low 32 bits its original index. Once its position is final the key is
/// replaced by a resolved handle: the same index with the window cleared.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct PackedKey(u64);

impl PackedKey {
    #[inline(always)]
    pub fn pending(digit: u32, index: usize) -> Self {
        debug_assert!(index <= MAX_ELEMENTS);
        Self(((digit as u64) << 32) | index as u64)
    }

    #[inline(always)]
    pub fn resolved(index: usize) -> Self {
        debug_assert!(index <= MAX_ELEMENTS);
        Self(index as u64)
    }

    /// The loaded 4-byte window.
    #[inline(always)]
    pub fn digit(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Original index of the element, pending or resolved.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as u32 as usize
    }

    /// Byte `lane` (0 = most significant) of the window.
    #[inline(always)]
    pub fn lane(self, lane: usize) -> u8 {
        (self.0 >> (32 + 8 * (DIGIT_LANES - 1 - lane))) as u8
    }

    /// Lanes `first..first + width` of the window as one integer.
    #[inline(always)]
    pub fn lanes(self, first: usize, width: usize) -> u32 {
        let shift = 8 * (DIGIT_LANES - first - width);
        let digit = (self.digit() as u64) >> shift;
        (digit & ((1u64 << (8 * width)) - 1)) as u32
    }

    #[inline(always)]
    pub fn resolve(self) -> Self {
        Self::resolved(self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_digit_folds_and_pads() {
        let data = vec!["HeLLo", "ab", "", "a\0bc"];
        assert_eq!(data.load_digit(0, 0), u32::from_be_bytes(*b"hell"));
        assert_eq!(data.load_digit(0, 4), u32::from_be_bytes([b'o', 0, 0, 0]));
        assert_eq!(data.load_digit(1, 0), u32::from_be_bytes([b'a', b'b', 0, 0]));
        assert_eq!(data.load_digit(2, 0), 0);
        assert_eq!(data.load_digit(1, 40), 0);
        // Nothing after an interior NUL is loaded.
        assert_eq!(data.load_digit(3, 0), u32::from_be_bytes([b'a', 0, 0, 0]));
    }

    #[test]
    fn test_digit_order_matches_compare_folded() {
        let data = vec!["abc", "ABD", "ab", "a_", "a[", "b"];
        for i in 0..data.len() {
            for j in 0..data.len() {
                let by_digit = data.load_digit(i, 0).cmp(&data.load_digit(j, 0));
                let by_bytes = compare_folded(data[i].as_bytes(), data[j].as_bytes());
                assert_eq!(by_digit, by_bytes, "{:?} vs {:?}", data[i], data[j]);
            }
        }
    }

    #[test]
    fn test_packed_key_fields() {
        let key = PackedKey::pending(u32::from_be_bytes(*b"wxyz"), 77);
        assert_eq!(key.index(), 77);
        assert_eq!(key.lane(0), b'w');
        assert_eq!(key.lane(3), b'z');
        assert_eq!(key.lanes(1, 2), u32::from(u16::from_be_bytes(*b"xy")));
        assert_eq!(key.lanes(0, 4), key.digit());
        assert_eq!(key.resolve(), PackedKey::resolved(77));
        assert_eq!(key.resolve().digit(), 0);
    }

    #[test]
    fn test_ensure_supported_bounds() {
        assert!(ensure_supported(0).is_ok());
        assert!(ensure_supported(MAX_ELEMENTS).is_ok());
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            ensure_supported(MAX_ELEMENTS + 1),
            Err(SortError::UnsupportedSize {
                len: MAX_ELEMENTS + 1,
                max: MAX_ELEMENTS
            })
        );
    }
}
