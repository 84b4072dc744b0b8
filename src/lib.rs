//! # foldsort
//!
//! `foldsort` sorts large collections of byte strings into ascending,
//! case-insensitive, lexicographic order, with several interchangeable engines
//! behind one contract so they can be benchmarked and cross-validated.
//!
//! ## Key Features
//!
//! - **MSD radix engines**: Strings are decomposed into 1, 2 or 4-byte
//!   case-folded digits, packed with the element index into a single `u64`,
//!   and partitioned with stable counting passes. Small buckets fall back to
//!   insertion sort, merge sort or the standard library sort.
//! - **Bounded recursion**: A child bucket larger than half its parent is
//!   processed by the current frame, so stack depth stays within
//!   `ceil(log2(n))` even when every string shares a long prefix.
//! - **Comparison baselines**: Insertion, merge and library sorts over whole
//!   strings, useful as references.
//! - **Zero-Copy abstractions**: The [`KeyAccessor`] trait allows sorting
//!   arbitrary data structures without copying the underlying strings.
//!
//! ## Ordering
//!
//! Strings compare byte by byte after folding ASCII letters to lower case (see
//! [`compare_folded`]). A string ends at the end of its slice or its first NUL
//! byte, and a strict prefix sorts before any longer string. Bytes `>= 0x80`
//! compare by raw value. Content-identical strings may end up in any relative
//! order.
//!
//! ## Usage
//!
//! ```rust
//! use foldsort::{DigitWidth, Engine, Sorter};
//!
//! let mut data = vec!["a", "aa", "A", "aaa"];
//! Sorter::new(Engine::HybridRadixMerge(DigitWidth::Four)).sort(&mut data).unwrap();
//!
//! assert!(data[..2].iter().all(|s| s.eq_ignore_ascii_case("a")));
//! assert_eq!(&data[2..], &["aa", "aaa"]);
//! ```
//!
//! ### Custom Types
//!
//! ```rust
//! use foldsort::{KeyAccessor, sort_indices};
//!
//! struct Users(Vec<String>);
//!
//! impl KeyAccessor for Users {
//!     fn get_key(&self, index: usize) -> &[u8] {
//!         self.0[index].as_bytes()
//!     }
//!
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//! }
//!
//! let users = Users(vec!["bob".to_string(), "Alice".to_string()]);
//! assert_eq!(sort_indices(&users).unwrap(), vec![1, 0]);
//! ```
//!
//! ## Memory
//!
//! Radix engines reserve two arrays of `n` packed keys (`16 bytes` per item)
//! for the duration of a call; [`Engine::Merge`] reserves one copy of the input
//! slice. Allocation failure is reported as [`SortError::AllocationFailure`]
//! and leaves the input untouched.

pub mod algo;
pub mod core;
pub mod error;
mod fallback;
mod partition;
mod radix;
pub mod validate;

pub use crate::algo::{DigitWidth, Engine, Sorter, sort, sort_indices};
pub use crate::core::{KeyAccessor, MAX_ELEMENTS, compare_folded};
pub use crate::error::{Result, SortError};

pub mod prelude {
    pub use crate::algo::{DigitWidth, Engine, Sorter, sort, sort_indices};
    pub use crate::core::{KeyAccessor, compare_folded};
    pub use crate::error::SortError;
}
