//! [`MemoryRegion`] and [`MemoryRequest`], the address-space primitives every other component in
//! this crate is built from.
//!
//! The overlap/merge/intersection/partition shape here mirrors
//! `lib/core/memory/src/address.rs`'s `AddressRange` family, specialised to a single flat
//! `uintptr` address space (no separate physical/virtual newtypes, no canonical-address
//! validation) since that is all the memory bootstrap needs.

use crate::error::Error;

/// A half-open span of address space: `[start, start + size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MemoryRegion {
    start: usize,
    size: usize,
}

impl MemoryRegion {
    /// Constructs a new [`MemoryRegion`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if `start + size` overflows `usize`.
    pub fn new(start: usize, size: usize) -> Result<Self, Error> {
        start.checked_add(size).ok_or(Error::Overflow)?;
        Ok(Self { start, size })
    }

    /// The address of the first byte in the region.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The number of bytes in the region.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The address one past the last byte in the region.
    ///
    /// Never overflows: guaranteed not to by [`MemoryRegion::new`]'s precondition.
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Returns `true` if this region contains no addresses.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `self` fully contains `other`.
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Returns `true` if `self` and `other` share at least one address.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Returns `true` if `self`'s end equals `other`'s start, or vice versa.
    pub const fn is_adjacent_to(&self, other: &Self) -> bool {
        self.end() == other.start || other.end() == self.start
    }

    /// Returns the intersection of `self` and `other`, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        Some(Self {
            start,
            size: end - start,
        })
    }

    /// Returns the union of `self` and `other`.
    ///
    /// Only meaningful when the two regions overlap or are adjacent; callers are responsible for
    /// checking that (as [`crate::kernel_map`] does, guarded by a type and physical-address
    /// continuity check).
    pub fn union(&self, other: &Self) -> Self {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        Self {
            start,
            size: end - start,
        }
    }

    /// Splits `self` relative to `other` into (strictly below, overlap, strictly above) pieces.
    ///
    /// Each piece is `None` when empty. This is the primitive [`crate::enumerator`] uses to
    /// subtract an occupied region from a descriptor's span, and [`crate::placement`] uses to
    /// reason about where a candidate region must move to clear an intersecting occupied region.
    pub fn partition(&self, other: &Self) -> (Option<Self>, Option<Self>, Option<Self>) {
        let overlap = self.intersection(other);

        let Some(overlap) = overlap else {
            return (Some(*self), None, None);
        };

        let lower = if self.start < overlap.start {
            Some(Self {
                start: self.start,
                size: overlap.start - self.start,
            })
        } else {
            None
        };

        let upper = if overlap.end() < self.end() {
            Some(Self {
                start: overlap.end(),
                size: self.end() - overlap.end(),
            })
        } else {
            None
        };

        (lower, Some(overlap), upper)
    }
}

/// Rounds `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. Returns `None` if rounding up would overflow `usize`.
pub fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    value.checked_add(mask).map(|v| v & !mask)
}

/// A size-and-alignment allocation request.
///
/// The specification parameterizes this over a compile-time alignment `MemoryRequest<A>`; this
/// crate represents `A` as a runtime power-of-two value instead, since bootstrap combines
/// requests of differing, data-dependent alignments (e.g. `align_of::<KernelDescriptor>()` next
/// to `KERNEL_PAGESIZE`) in the same placement loop over a single collection type. See
/// `DESIGN.md`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRequest {
    size: usize,
    alignment: usize,
}

impl MemoryRequest {
    /// Constructs a new [`MemoryRequest`].
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn new(size: usize, alignment: usize) -> Self {
        assert!(alignment.is_power_of_two());
        Self { size, alignment }
    }

    /// The number of bytes requested.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The alignment requested, guaranteed to be a power of two.
    pub const fn alignment(&self) -> usize {
        self.alignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_and_intersection() {
        let a = MemoryRegion::new(0x1000, 0x1000).unwrap();
        let b = MemoryRegion::new(0x1800, 0x1000).unwrap();
        assert!(a.overlaps(&b));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.start(), 0x1800);
        assert_eq!(i.end(), 0x2000);
    }

    #[test]
    fn disjoint_regions_do_not_overlap() {
        let a = MemoryRegion::new(0x1000, 0x1000).unwrap();
        let b = MemoryRegion::new(0x3000, 0x1000).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn adjacency() {
        let a = MemoryRegion::new(0x1000, 0x1000).unwrap();
        let b = MemoryRegion::new(0x2000, 0x1000).unwrap();
        assert!(a.is_adjacent_to(&b));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn partition_straddling() {
        let d = MemoryRegion::new(0x1000, 0x4000).unwrap();
        let occ = MemoryRegion::new(0x2000, 0x1000).unwrap();
        let (lower, overlap, upper) = d.partition(&occ);
        assert_eq!(lower.unwrap(), MemoryRegion::new(0x1000, 0x1000).unwrap());
        assert_eq!(overlap.unwrap(), occ);
        assert_eq!(upper.unwrap(), MemoryRegion::new(0x3000, 0x2000).unwrap());
    }

    #[test]
    fn partition_disjoint() {
        let d = MemoryRegion::new(0x1000, 0x1000).unwrap();
        let occ = MemoryRegion::new(0x5000, 0x1000).unwrap();
        let (lower, overlap, upper) = d.partition(&occ);
        assert_eq!(lower.unwrap(), d);
        assert!(overlap.is_none());
        assert!(upper.is_none());
    }

    #[test]
    fn align_up_rounds() {
        assert_eq!(align_up(0x1001, 0x1000), Some(0x2000));
        assert_eq!(align_up(0x1000, 0x1000), Some(0x1000));
        assert_eq!(align_up(usize::MAX - 1, 0x1000), None);
    }

    #[test]
    fn overflowing_region_rejected() {
        assert_eq!(MemoryRegion::new(usize::MAX, 2), Err(Error::Overflow));
    }
}
