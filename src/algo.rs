//! Engine selection and the uniform sort contract.
//!
//! Every engine orders strings by [`compare_folded`]. They differ only in how
//! they get there:
//! - **Comparison baselines** ([`Engine::Insertion`], [`Engine::Merge`],
//!   [`Engine::Library`], [`Engine::LibraryStable`]) sort the slice directly.
//! - **Radix engines** ([`Engine::Radix`], [`Engine::HybridRadixMerge`],
//!   [`Engine::HybridRadixLibrary`]) run an MSD radix sort over packed
//!   digit/index keys and then apply the resulting permutation.
//!
//! The main entry points are [`Sorter::sort`] and [`Sorter::sort_indices`].

use std::cmp::Ordering;

use crate::core::{KeyAccessor, PackedKey, compare_folded, ensure_supported};
use crate::error::Result;
use crate::fallback::{insertion_sort_by, merge_sort_by};
use crate::radix::{KeyFallback, RadixPlan, radix_order};

/// Buckets below this size fall back to insertion sort in [`Engine::Radix`].
pub const RADIX_INSERTION_THRESHOLD: usize = 42;

/// Buckets below this size leave the radix passes in the hybrid engines.
pub const HYBRID_SWITCH_THRESHOLD: usize = 1024;

/// Runs below this size are insertion sorted inside merge sort over packed keys.
pub const KEY_MERGE_INSERTION_THRESHOLD: usize = 110;

/// Runs below this size are insertion sorted inside [`Engine::Merge`].
pub const STRING_MERGE_INSERTION_THRESHOLD: usize = 17;

/// Number of bytes a radix engine consumes per partitioning level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigitWidth {
    One,
    Two,
    Four,
}

impl DigitWidth {
    /// Width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            DigitWidth::One => 1,
            DigitWidth::Two => 2,
            DigitWidth::Four => 4,
        }
    }
}

/// Sorting strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Straight insertion sort over whole strings. Quadratic; a reference only.
    Insertion,
    /// Merge sort over whole strings with an auxiliary buffer.
    Merge,
    /// `slice::sort_unstable_by` over whole strings.
    Library,
    /// `slice::sort_by` over whole strings.
    LibraryStable,
    /// MSD radix sort with insertion sort for small buckets.
    Radix(DigitWidth),
    /// MSD radix sort with merge sort for small buckets.
    HybridRadixMerge(DigitWidth),
    /// MSD radix sort with `slice::sort_unstable` for small buckets.
    HybridRadixLibrary(DigitWidth),
}

impl Engine {
    /// Every engine, in a fixed order. Useful for benchmarks and cross-checks.
    pub const ALL: [Engine; 13] = [
        Engine::Insertion,
        Engine::Merge,
        Engine::Library,
        Engine::LibraryStable,
        Engine::Radix(DigitWidth::One),
        Engine::Radix(DigitWidth::Two),
        Engine::Radix(DigitWidth::Four),
        Engine::HybridRadixMerge(DigitWidth::One),
        Engine::HybridRadixMerge(DigitWidth::Two),
        Engine::HybridRadixMerge(DigitWidth::Four),
        Engine::HybridRadixLibrary(DigitWidth::One),
        Engine::HybridRadixLibrary(DigitWidth::Two),
        Engine::HybridRadixLibrary(DigitWidth::Four),
    ];

    /// Short stable name, e.g. `radix2` or `hybrid-merge4`.
    pub fn name(self) -> String {
        match self {
            Engine::Insertion => "insertion".to_string(),
            Engine::Merge => "merge".to_string(),
            Engine::Library => "library".to_string(),
            Engine::LibraryStable => "library-stable".to_string(),
            Engine::Radix(w) => format!("radix{}", w.bytes()),
            Engine::HybridRadixMerge(w) => format!("hybrid-merge{}", w.bytes()),
            Engine::HybridRadixLibrary(w) => format!("hybrid-library{}", w.bytes()),
        }
    }

    fn default_small_bucket(self) -> usize {
        match self {
            Engine::Radix(_) => RADIX_INSERTION_THRESHOLD,
            Engine::HybridRadixMerge(_) | Engine::HybridRadixLibrary(_) => HYBRID_SWITCH_THRESHOLD,
            _ => 0,
        }
    }

    fn default_insertion(self) -> usize {
        match self {
            Engine::Merge => STRING_MERGE_INSERTION_THRESHOLD,
            _ => KEY_MERGE_INSERTION_THRESHOLD,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::Radix(DigitWidth::One)
    }
}

/// A configured sorting engine.
///
/// ```
/// use foldsort::{DigitWidth, Engine, Sorter};
///
/// let mut lines = vec!["banana", "Apple", "cherry"];
/// Sorter::new(Engine::Radix(DigitWidth::Two)).sort(&mut lines).unwrap();
/// assert_eq!(lines, vec!["Apple", "banana", "cherry"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sorter {
    engine: Engine,
    small_bucket: usize,
    insertion: usize,
}

impl Default for Sorter {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Sorter {
    /// Creates a sorter with the engine's default thresholds.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            small_bucket: engine.default_small_bucket(),
            insertion: engine.default_insertion(),
        }
    }

    /// Set the bucket size below which radix engines switch to their fallback.
    /// `0` keeps partitioning down to single elements. Ignored by comparison
    /// baselines.
    pub fn with_small_bucket_threshold(mut self, len: usize) -> Self {
        self.small_bucket = len;
        self
    }

    /// Set the run size below which merge sort switches to insertion sort.
    /// Used by [`Engine::Merge`] and [`Engine::HybridRadixMerge`].
    pub fn with_insertion_threshold(mut self, len: usize) -> Self {
        self.insertion = len;
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn small_bucket_threshold(&self) -> usize {
        self.small_bucket
    }

    pub fn insertion_threshold(&self) -> usize {
        self.insertion
    }

    /// Sorts `data` in place into ascending case-insensitive order.
    ///
    /// On error `data` is left untouched.
    ///
    /// # Errors
    ///
    /// [`SortError::UnsupportedSize`] if `data` holds more than
    /// [`MAX_ELEMENTS`] items, [`SortError::AllocationFailure`] if scratch
    /// storage cannot be reserved.
    ///
    /// [`SortError::UnsupportedSize`]: crate::SortError::UnsupportedSize
    /// [`SortError::AllocationFailure`]: crate::SortError::AllocationFailure
    /// [`MAX_ELEMENTS`]: crate::MAX_ELEMENTS
    pub fn sort<T: AsRef<[u8]> + Clone>(&self, data: &mut [T]) -> Result<()> {
        ensure_supported(data.len())?;
        if data.len() <= 1 {
            return Ok(());
        }

        let mut compare = |a: &T, b: &T| compare_folded(a.as_ref(), b.as_ref());
        match self.radix_plan() {
            Some((width, plan)) => {
                let mut order = radix_order(&*data, width, plan)?;
                apply_permutation(data, &mut order);
                Ok(())
            }
            None => self.sort_by_comparison(data, &mut compare),
        }
    }

    /// Computes the permutation that sorts `provider`, without modifying it.
    ///
    /// The result lists indices such that
    /// `provider.get_key(indices[i]) <= provider.get_key(indices[i + 1])`
    /// under [`compare_folded`].
    ///
    /// ```
    /// use foldsort::{Engine, Sorter};
    ///
    /// let data = vec!["banana", "Cherry", "apple"];
    /// let indices = Sorter::new(Engine::Merge).sort_indices(&data).unwrap();
    /// assert_eq!(indices, vec![2, 0, 1]);
    /// ```
    pub fn sort_indices<P: KeyAccessor + ?Sized>(&self, provider: &P) -> Result<Vec<usize>> {
        let len = provider.len();
        ensure_supported(len)?;

        if let Some((width, plan)) = self.radix_plan() {
            let order = radix_order(provider, width, plan)?;
            return Ok(order.into_iter().map(PackedKey::index).collect());
        }

        let mut indices = Vec::new();
        indices.try_reserve_exact(len)?;
        indices.extend(0..len);
        let mut compare = |&a: &usize, &b: &usize| compare_folded(provider.get_key(a), provider.get_key(b));
        self.sort_by_comparison(&mut indices, &mut compare)?;
        Ok(indices)
    }

    fn radix_plan(&self) -> Option<(usize, RadixPlan)> {
        let (width, fallback) = match self.engine {
            Engine::Radix(w) => (w, KeyFallback::Insertion),
            Engine::HybridRadixMerge(w) => (w, KeyFallback::Merge(self.insertion)),
            Engine::HybridRadixLibrary(w) => (w, KeyFallback::Library),
            _ => return None,
        };
        let plan = RadixPlan {
            small_bucket: self.small_bucket,
            fallback,
        };
        Some((width.bytes(), plan))
    }

    fn sort_by_comparison<T, F>(&self, data: &mut [T], compare: &mut F) -> Result<()>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.engine {
            Engine::Insertion => insertion_sort_by(data, compare),
            Engine::Merge if data.len() < self.insertion => insertion_sort_by(data, compare),
            Engine::Merge => {
                let mut wrk = Vec::new();
                wrk.try_reserve_exact(data.len())?;
                wrk.extend_from_slice(data);
                merge_sort_by(data, &mut wrk, self.insertion, compare);
            }
            Engine::Library => data.sort_unstable_by(compare),
            _ => data.sort_by(compare),
        }
        Ok(())
    }
}

/// Sorts `data` with the default engine.
///
/// # Examples
///
/// ```
/// let mut data = vec!["banana", "Apple", "apple", "Cherry"];
/// foldsort::sort(&mut data).unwrap();
///
/// assert!(data[..2].iter().all(|s| s.eq_ignore_ascii_case("apple")));
/// assert_eq!(&data[2..], &["banana", "Cherry"]);
/// ```
pub fn sort<T: AsRef<[u8]> + Clone>(data: &mut [T]) -> Result<()> {
    Sorter::default().sort(data)
}

/// Returns the sorting permutation of `provider` using the default engine.
pub fn sort_indices<P: KeyAccessor + ?Sized>(provider: &P) -> Result<Vec<usize>> {
    Sorter::default().sort_indices(provider)
}

/// Moves `data[order[i].index()]` to position `i` by following cycles.
///
/// Visited entries of `order` are overwritten so each element moves once.
fn apply_permutation<T>(data: &mut [T], order: &mut [PackedKey]) {
    for i in 0..data.len() {
        let mut current = i;
        while order[current].index() != i {
            let next = order[current].index();
            data.swap(current, next);
            order[current] = PackedKey::resolved(current); // Mark as visited/placed
            current = next;
        }
        order[current] = PackedKey::resolved(current);
    }
}
