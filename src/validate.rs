//! Independent checks of a sort result.
//!
//! These helpers do not share any code path with the engines beyond
//! [`compare_folded`], so they can be used to cross-check them.

use std::cmp::Ordering;

use crate::core::{KeyAccessor, compare_folded};

/// First violation found by a validation helper.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The result does not have one entry per input element.
    #[error("expected {expected} elements, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An entry refers to an element that does not exist.
    #[error("element {position} refers to index {index}, outside of 0..{len}")]
    OutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },

    /// An entry refers to an element already seen earlier in the result.
    #[error("element {position} repeats index {index}")]
    Duplicate { position: usize, index: usize },

    /// Two neighbouring entries are in descending order.
    #[error("elements {position} and {} appear in wrong order", .position + 1)]
    Misordered { position: usize },
}

/// Checks that `order` lists every index in `0..len` exactly once.
pub fn verify_permutation(order: &[usize], len: usize) -> Result<(), ValidationError> {
    if order.len() != len {
        return Err(ValidationError::LengthMismatch {
            expected: len,
            actual: order.len(),
        });
    }

    let mut seen = vec![false; len];
    for (position, &index) in order.iter().enumerate() {
        match seen.get_mut(index) {
            None => return Err(ValidationError::OutOfRange { position, index, len }),
            Some(true) => return Err(ValidationError::Duplicate { position, index }),
            Some(slot) => *slot = true,
        }
    }
    Ok(())
}

/// Checks that visiting `provider` in `order` yields non-decreasing strings.
pub fn verify_order<P: KeyAccessor + ?Sized>(provider: &P, order: &[usize]) -> Result<(), ValidationError> {
    let len = provider.len();
    if let Some((position, &index)) = order.iter().enumerate().find(|&(_, &index)| index >= len) {
        return Err(ValidationError::OutOfRange { position, index, len });
    }
    first_misordered(order.windows(2), |pair| {
        compare_folded(provider.get_key(pair[0]), provider.get_key(pair[1]))
    })
}

/// Checks that `data` is in non-decreasing case-insensitive order.
pub fn verify_sorted<T: AsRef<[u8]>>(data: &[T]) -> Result<(), ValidationError> {
    first_misordered(data.windows(2), |pair| compare_folded(pair[0].as_ref(), pair[1].as_ref()))
}

fn first_misordered<'a, T: 'a, I, F>(pairs: I, mut compare: F) -> Result<(), ValidationError>
where
    I: Iterator<Item = &'a [T]>,
    F: FnMut(&[T]) -> Ordering,
{
    match pairs.enumerate().find(|(_, pair)| compare(pair) == Ordering::Greater) {
        Some((position, _)) => Err(ValidationError::Misordered { position }),
        None => Ok(()),
    }
}
