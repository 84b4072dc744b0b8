//! Single-lane counting partition, the histogram pass of the radix engines.

use std::ops::Range;

use crate::core::PackedKey;
use cuneiform::cuneiform;

/// Number of buckets for one byte lane.
pub(crate) const RADIX_BUCKETS: usize = 256;

/// Exclusive prefix sums of one lane's byte values.
///
/// `data[v]` is the first position of byte value `v` in the partitioned
/// output and `data[256]` is the total length.
#[cuneiform]
pub(crate) struct Histogram {
    data: [usize; RADIX_BUCKETS + 1],
}

impl Histogram {
    /// Positions holding byte value `value` after the pass.
    #[inline]
    pub fn bucket(&self, value: usize) -> Range<usize> {
        self.data[value]..self.data[value + 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data[RADIX_BUCKETS]
    }
}

/// Distributes `src` into `dst` ordered by byte `lane` of each key's window.
///
/// 1. Counts frequencies of each byte value.
/// 2. Turns counts into bucket starting positions (exclusive prefix sum).
/// 3. Scatters keys to `dst[start[value]++]`.
///
/// The pass is stable, so running it over several lanes, least significant
/// first, sorts by all of them.
pub(crate) fn counting_partition(src: &[PackedKey], dst: &mut [PackedKey], lane: usize) -> Histogram {
    debug_assert_eq!(src.len(), dst.len());

    // Counts are stored one slot to the right so that the running sum below
    // yields starting positions directly.
    let mut histogram = Histogram {
        data: [0; RADIX_BUCKETS + 1],
    };
    src.iter().for_each(|key| {
        histogram.data[key.lane(lane) as usize + 1] += 1;
    });

    let mut sum = 0;
    histogram.data.iter_mut().for_each(|slot| {
        sum += *slot;
        *slot = sum;
    });

    let mut cursors = histogram.data;
    src.iter().for_each(|&key| {
        let value = key.lane(lane) as usize;
        dst[cursors[value]] = key;
        cursors[value] += 1;
    });

    histogram
}
