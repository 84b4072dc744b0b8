//! MSD radix refinement over packed keys.
//!
//! Keys start out holding the first 4-byte window of every string. Each level
//! partitions a bucket by its next W-byte digit with W stable counting passes,
//! then refines every child bucket whose members still compare equal and have
//! not run out of bytes. Buckets below the small-bucket threshold are handed to
//! a comparison fallback that sorts whole windows instead.
//!
//! Recursion depth is bounded by never recursing into a child larger than half
//! of its parent: that child is processed by the current frame once its
//! siblings are done.

use std::mem;
use std::ops::Range;

use crate::core::{DIGIT_LANES, KeyAccessor, PackedKey};
use crate::error::Result;
use crate::fallback::{insertion_sort_by, merge_sort_by};
use crate::partition::{Histogram, RADIX_BUCKETS, counting_partition};

/// Comparison sort applied to buckets below the small-bucket threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyFallback {
    Insertion,
    /// Merge sort with the given insertion cutoff.
    Merge(usize),
    Library,
}

/// Parameters of one radix run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RadixPlan {
    pub small_bucket: usize,
    pub fallback: KeyFallback,
}

/// Which of the two buffers holds a window's live keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Primary,
    Scratch,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Primary => Side::Scratch,
            Side::Scratch => Side::Primary,
        }
    }
}

/// Primary and scratch key arrays for one sort call.
///
/// Both arrays are reserved up front and released when the value is dropped,
/// whichever way the call exits.
pub(crate) struct ScratchBuffers {
    primary: Vec<PackedKey>,
    scratch: Vec<PackedKey>,
}

impl ScratchBuffers {
    /// Reserves both arrays and loads every string's first window.
    fn load<P: KeyAccessor + ?Sized>(provider: &P) -> Result<Self> {
        let len = provider.len();
        let mut primary = Vec::new();
        primary.try_reserve_exact(len)?;
        let mut scratch = Vec::new();
        scratch.try_reserve_exact(len)?;

        primary.extend((0..len).map(|index| PackedKey::pending(provider.load_digit(index, 0), index)));
        scratch.resize(len, PackedKey::default());
        Ok(Self { primary, scratch })
    }

    fn window(&mut self) -> Window<'_> {
        Window {
            primary: &mut self.primary,
            scratch: &mut self.scratch,
        }
    }
}

/// Aligned sub-ranges of the primary and scratch arrays.
struct Window<'a> {
    primary: &'a mut [PackedKey],
    scratch: &'a mut [PackedKey],
}

impl<'a> Window<'a> {
    fn len(&self) -> usize {
        self.primary.len()
    }

    fn live(&self, side: Side) -> &[PackedKey] {
        match side {
            Side::Primary => &*self.primary,
            Side::Scratch => &*self.scratch,
        }
    }

    /// Returns `(live, spare)` for keys living on `side`.
    fn split(&mut self, side: Side) -> (&mut [PackedKey], &mut [PackedKey]) {
        match side {
            Side::Primary => (&mut *self.primary, &mut *self.scratch),
            Side::Scratch => (&mut *self.scratch, &mut *self.primary),
        }
    }

    fn sub(&mut self, range: Range<usize>) -> Window<'_> {
        Window {
            primary: &mut self.primary[range.clone()],
            scratch: &mut self.scratch[range],
        }
    }

    fn into_sub(self, range: Range<usize>) -> Window<'a> {
        let Window { primary, scratch } = self;
        Window {
            primary: &mut primary[range.clone()],
            scratch: &mut scratch[range],
        }
    }

    /// Writes resolved handles for `range` into the primary array.
    fn resolve(&mut self, side: Side, range: Range<usize>) {
        match side {
            Side::Primary => self.primary[range].iter_mut().for_each(|key| *key = key.resolve()),
            Side::Scratch => self.primary[range.clone()]
                .iter_mut()
                .zip(&self.scratch[range])
                .for_each(|(dst, src)| *dst = src.resolve()),
        }
    }
}

/// Sorts the provider's strings and returns the resolved keys in order.
pub(crate) fn radix_order<P: KeyAccessor + ?Sized>(
    provider: &P,
    width: usize,
    plan: RadixPlan,
) -> Result<Vec<PackedKey>> {
    let mut buffers = ScratchBuffers::load(provider)?;
    let len = buffers.primary.len();
    if len > 1 {
        match width {
            1 => Refiner::<P, 1>::new(provider, plan, len).refine(buffers.window(), Side::Primary, 0, 0),
            2 => Refiner::<P, 2>::new(provider, plan, len).refine(buffers.window(), Side::Primary, 0, 0),
            _ => Refiner::<P, 4>::new(provider, plan, len).refine(buffers.window(), Side::Primary, 0, 0),
        }
    } else {
        buffers.window().resolve(Side::Primary, 0..len);
    }
    Ok(buffers.primary)
}

/// Recursive bucket refinement for digit width `W` (1, 2 or 4 bytes).
struct Refiner<'p, P: ?Sized, const W: usize> {
    provider: &'p P,
    plan: RadixPlan,
    /// ceil(log2(n)): no bucket is refined deeper than this.
    depth_limit: u32,
}

impl<'p, P: KeyAccessor + ?Sized, const W: usize> Refiner<'p, P, W> {
    fn new(provider: &'p P, plan: RadixPlan, len: usize) -> Self {
        debug_assert!(DIGIT_LANES % W == 0);
        Self {
            provider,
            plan,
            depth_limit: usize::BITS - (len - 1).leading_zeros(),
        }
    }

    /// Sorts a bucket whose members agree on every byte before `offset`.
    ///
    /// On return every position of the window holds a resolved handle in the
    /// primary array.
    fn refine(&self, mut window: Window<'_>, mut side: Side, mut offset: usize, depth: u32) {
        debug_assert!(depth <= self.depth_limit, "recursion depth {depth} over bound");

        loop {
            let len = window.len();
            if len < self.plan.small_bucket {
                let (live, spare) = window.split(side);
                self.settle(live, spare, offset, depth);
                window.resolve(side, 0..len);
                return;
            }

            if offset > 0 && offset % DIGIT_LANES == 0 {
                let (live, _) = window.split(side);
                self.reload(live, offset);
            }

            let first = offset % DIGIT_LANES;
            let histogram = self.partition(&mut window, &mut side, first);
            debug_assert_eq!(histogram.len(), len);
            offset += W;

            let half = len / 2;
            let mut oversized = None;
            for value in 0..RADIX_BUCKETS {
                let group = histogram.bucket(value);
                if group.is_empty() {
                    continue;
                }
                // A zero leading lane means every member ended before this digit.
                if value == 0 {
                    window.resolve(side, group);
                    continue;
                }

                let mut start = group.start;
                while start < group.end {
                    let (end, exhausted) = self.next_run(window.live(side), start, group.end, first);
                    let run = start..end;
                    start = end;

                    if run.len() == 1 || exhausted {
                        window.resolve(side, run);
                    } else if run.len() <= half {
                        self.refine(window.sub(run), side, offset, depth + 1);
                    } else {
                        oversized = Some(run);
                    }
                }
            }

            match oversized {
                Some(run) => window = window.into_sub(run),
                None => return,
            }
        }
    }

    /// Runs W stable passes over lanes `first..first + W`, least significant
    /// first, flipping `side` after each. The returned histogram is the one of
    /// the leading lane, which delimits the child groups.
    fn partition(&self, window: &mut Window<'_>, side: &mut Side, first: usize) -> Histogram {
        let mut lane = first + W - 1;
        loop {
            let (src, dst) = window.split(*side);
            let histogram = counting_partition(src, dst, lane);
            *side = side.flip();
            if lane == first {
                return histogram;
            }
            lane -= 1;
        }
    }

    /// Finds the end of the run of equal digits starting at `start`.
    ///
    /// Also reports whether the run's strings ended inside the digit, in which
    /// case its members are equal and need no further work.
    fn next_run(&self, keys: &[PackedKey], start: usize, end: usize, first: usize) -> (usize, bool) {
        let digit = keys[start].lanes(first, W);
        let exhausted = digit & 0xff == 0;
        if W == 1 {
            return (end, exhausted);
        }
        let run = keys[start + 1..end]
            .iter()
            .take_while(|key| key.lanes(first, W) == digit)
            .count();
        (start + 1 + run, exhausted)
    }

    /// Sorts a small bucket in place in `live` by whole windows, then refines
    /// runs of equal windows. `spare` is free storage of the same length.
    fn settle(&self, mut live: &mut [PackedKey], mut spare: &mut [PackedKey], mut offset: usize, depth: u32) {
        debug_assert!(depth <= self.depth_limit, "recursion depth {depth} over bound");

        loop {
            if offset > 0 && offset % DIGIT_LANES == 0 {
                self.reload(live, offset);
            }
            match self.plan.fallback {
                KeyFallback::Insertion => insertion_sort_by(live, &mut PackedKey::cmp),
                KeyFallback::Merge(cutoff) => merge_sort_by(live, spare, cutoff, &mut PackedKey::cmp),
                KeyFallback::Library => live.sort_unstable(),
            }
            offset += DIGIT_LANES - offset % DIGIT_LANES;

            let half = live.len() / 2;
            let mut oversized = None;
            let mut start = 0;
            while start < live.len() {
                let digit = live[start].digit();
                let end = start + live[start..].iter().take_while(|key| key.digit() == digit).count();
                let run = start..end;
                start = end;

                if run.len() < 2 || digit & 0xff == 0 {
                    continue;
                }
                if run.len() <= half {
                    self.settle(&mut live[run.clone()], &mut spare[run], offset, depth + 1);
                } else {
                    oversized = Some(run);
                }
            }

            match oversized {
                Some(run) => {
                    live = &mut mem::take(&mut live)[run.clone()];
                    spare = &mut mem::take(&mut spare)[run];
                }
                None => return,
            }
        }
    }

    /// Replaces each key's window with the one starting at `offset`.
    fn reload(&self, keys: &mut [PackedKey], offset: usize) {
        keys.iter_mut().for_each(|key| {
            let index = key.index();
            *key = PackedKey::pending(self.provider.load_digit(index, offset), index);
        });
    }
}
