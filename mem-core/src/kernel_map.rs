//! The sanitised, owned kernel memory map derived from a [`crate::firmware::FirmwareMap`].
//!
//! Construction mirrors the merge/overlap-resolution walk `stub/src/platform/
//! frame_allocator.rs`'s `try_insert_region` performs over its own on-disk descriptor list, but
//! operates over an in-memory array built once during bootstrap rather than an incrementally
//! updated linked list.

use core::mem::MaybeUninit;

use conversion::u64_to_usize_checked;
use uefi::memory::MemoryType;

use crate::{
    collections::FixedVec,
    config::{KERNEL_PAGESIZE, ScratchBuffer},
    error::Error,
    firmware::{FirmwareDescriptor, FirmwareMapView},
    region::{MemoryRegion, MemoryRequest},
};

/// The sanitised classification of a [`KernelDescriptor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelMemoryType {
    /// Free memory available for general allocation.
    GeneralPurpose,
    /// Memory that is present but not available for general allocation.
    Unusable,
    /// A descriptor that failed sanitisation (overflow, zero-length, or contradicted a neighbor).
    Invalid,
}

/// A sanitised, fixed-layout memory region expressed in units of [`KERNEL_PAGESIZE`].
#[derive(Clone, Copy, Debug)]
pub struct KernelDescriptor {
    /// The classification of this region.
    pub kind: KernelMemoryType,
    /// The physical address at the start of the region.
    pub physical_start: usize,
    /// The virtual address at the start of the region.
    pub virtual_start: usize,
    /// The address one past the last byte of the region.
    virtual_end: usize,
    /// The number of kernel pages in the region.
    pub pages: u64,
}

impl KernelDescriptor {
    /// Returns the virtual span of this descriptor as a [`MemoryRegion`].
    ///
    /// # Panics
    ///
    /// Panics if called on an entry whose span could not be constructed (never true for an entry
    /// reachable through [`KernelMemoryMap::iter`], since invalid entries are excluded there).
    pub fn region(&self) -> MemoryRegion {
        MemoryRegion::new(self.virtual_start, self.virtual_end - self.virtual_start)
            .expect("invariant: virtual_start + (virtual_end - virtual_start) does not overflow")
    }

    /// Returns `true` if this descriptor's virtual span fully contains `other`.
    pub fn contains_region(&self, other: &MemoryRegion) -> bool {
        other.start() >= self.virtual_start && other.end() <= self.virtual_end
    }

    /// Returns `true` if this descriptor is [`KernelMemoryType::GeneralPurpose`].
    pub const fn is_general_purpose(&self) -> bool {
        matches!(self.kind, KernelMemoryType::GeneralPurpose)
    }
}

/// Converts one firmware descriptor into its sanitised kernel form.
///
/// Never fails: descriptors that cannot be represented (overflow, zero kernel pages after
/// translation) come back [`KernelMemoryType::Invalid`] rather than propagating an error, per the
/// "never halts" contract of kernel map construction.
fn convert(descriptor: FirmwareDescriptor) -> KernelDescriptor {
    let invalid = |physical_start: usize, virtual_start: usize| KernelDescriptor {
        kind: KernelMemoryType::Invalid,
        physical_start,
        virtual_start,
        virtual_end: virtual_start,
        pages: 0,
    };
    let overflowed = |physical_start: usize, virtual_start: usize| {
        crate::warn!("kernel map: descriptor at virtual {virtual_start:#x} overflowed during translation, invalidating");
        invalid(physical_start, virtual_start)
    };

    let Some(physical_start) = u64_to_usize_checked(descriptor.physical_start) else {
        return overflowed(0, 0);
    };
    let Some(virtual_start) = u64_to_usize_checked(descriptor.virtual_start) else {
        return overflowed(physical_start, 0);
    };

    let Some(firmware_bytes) = descriptor.pages.checked_mul(crate::config::FIRMWARE_PAGESIZE) else {
        return overflowed(physical_start, virtual_start);
    };
    let kernel_pages = firmware_bytes / KERNEL_PAGESIZE;
    if kernel_pages == 0 {
        return invalid(physical_start, virtual_start);
    }

    let Some(kernel_bytes) = kernel_pages.checked_mul(KERNEL_PAGESIZE) else {
        return overflowed(physical_start, virtual_start);
    };
    let Some(kernel_bytes) = u64_to_usize_checked(kernel_bytes) else {
        return overflowed(physical_start, virtual_start);
    };
    let Some(virtual_end) = virtual_start.checked_add(kernel_bytes) else {
        return overflowed(physical_start, virtual_start);
    };
    // physical_start + kernel_bytes must also fit, even though only the virtual span is
    // authoritative for placement; a physical overflow here indicates a firmware lie.
    if physical_start.checked_add(kernel_bytes).is_none() {
        return overflowed(physical_start, virtual_start);
    }

    let kind = if descriptor.memory_type == MemoryType::CONVENTIONAL {
        KernelMemoryType::GeneralPurpose
    } else {
        KernelMemoryType::Unusable
    };

    KernelDescriptor {
        kind,
        physical_start,
        virtual_start,
        virtual_end,
        pages: kernel_pages,
    }
}

/// Stable-partitions `slice` so that every entry satisfying `is_valid` is moved to a contiguous
/// prefix, preserving their relative order. Returns the length of that prefix.
///
/// The "invalid" entries left in the suffix are left in unspecified order; nothing reads them by
/// index again, only their presence (taking up the array's capacity) matters.
fn partition_valid_prefix<T>(slice: &mut [T], is_valid: impl Fn(&T) -> bool) -> usize {
    let mut valid_end = 0;
    for i in 0..slice.len() {
        if is_valid(&slice[i]) {
            slice.swap(i, valid_end);
            valid_end += 1;
        }
    }
    valid_end
}

/// Runs one left-to-right merge pass over the sorted valid prefix `slice[..len]`, invalidating
/// entries absorbed into a neighbor or contradicted by one.
fn merge_pass(slice: &mut [KernelDescriptor], len: usize) {
    let mut a_idx = 0;
    loop {
        while a_idx < len && matches!(slice[a_idx].kind, KernelMemoryType::Invalid) {
            a_idx += 1;
        }
        if a_idx + 1 >= len {
            return;
        }
        let mut b_idx = a_idx + 1;
        while b_idx < len && matches!(slice[b_idx].kind, KernelMemoryType::Invalid) {
            b_idx += 1;
        }
        if b_idx >= len {
            return;
        }

        let a = slice[a_idx];
        let b = slice[b_idx];

        let expected_physical = a.physical_start + (b.virtual_start - a.virtual_start);
        let same_type_and_continuous = core::mem::discriminant(&a.kind) == core::mem::discriminant(&b.kind)
            && b.physical_start == expected_physical;

        if a.virtual_end > b.virtual_start {
            // Overlap.
            if same_type_and_continuous {
                slice[b_idx].virtual_start = a.virtual_start;
                slice[b_idx].virtual_end = a.virtual_end.max(b.virtual_end);
                slice[b_idx].physical_start = a.physical_start;
                slice[b_idx].pages = (slice[b_idx].virtual_end - slice[b_idx].virtual_start) as u64 / KERNEL_PAGESIZE;
                slice[a_idx].kind = KernelMemoryType::Invalid;
            } else {
                crate::warn!(
                    "kernel map: descriptors at virtual {:#x} and {:#x} overlap but contradict each other, invalidating both",
                    a.virtual_start,
                    b.virtual_start
                );
                slice[a_idx].kind = KernelMemoryType::Invalid;
                slice[b_idx].kind = KernelMemoryType::Invalid;
            }
        } else if a.virtual_end == b.virtual_start && same_type_and_continuous {
            // Adjacent and mergeable.
            slice[b_idx].virtual_start = a.virtual_start;
            slice[b_idx].physical_start = a.physical_start;
            slice[b_idx].pages += a.pages;
            slice[a_idx].kind = KernelMemoryType::Invalid;
        }

        a_idx = b_idx;
    }
}

/// An owned, sanitised array of [`KernelDescriptor`]s.
pub struct KernelMemoryMap<'buf> {
    descriptors: FixedVec<'buf, KernelDescriptor>,
}

impl<'buf> KernelMemoryMap<'buf> {
    /// Returns the allocation request needed to hold the conversion of `view`'s descriptors before
    /// sanitisation (one slot per firmware descriptor, including the ones later invalidated).
    pub fn max_conversion_request(view: &FirmwareMapView) -> MemoryRequest {
        MemoryRequest::new(
            view.len() * size_of::<KernelDescriptor>(),
            align_of::<KernelDescriptor>(),
        )
    }

    /// Builds the sanitised kernel memory map from a firmware view.
    ///
    /// `storage` must be large enough to satisfy [`KernelMemoryMap::max_conversion_request`] for
    /// `view`, and aligned to `align_of::<KernelDescriptor>()` — the obligation
    /// [`crate::config::ScratchBuffer`] or a [`crate::resource::Resource`] allocation satisfies.
    pub fn build(view: FirmwareMapView, storage: &'buf mut [MaybeUninit<KernelDescriptor>]) -> Self {
        let mut descriptors = FixedVec::new(storage);
        for raw in view.iter() {
            descriptors
                .push(convert(raw))
                .ok()
                .expect("storage sized by max_conversion_request");
        }

        let slice = descriptors.as_mut_slice();
        let valid_len = partition_valid_prefix(slice, |d| !matches!(d.kind, KernelMemoryType::Invalid));
        slice[..valid_len].sort_unstable_by_key(|d| d.virtual_start);
        merge_pass(slice, valid_len);

        let final_len = partition_valid_prefix(descriptors.as_mut_slice(), |d| !matches!(d.kind, KernelMemoryType::Invalid));
        descriptors.as_mut_slice()[..final_len].sort_unstable_by_key(|d| d.virtual_start);
        descriptors.truncate(final_len);

        Self { descriptors }
    }

    /// Builds the sanitised kernel memory map using a stack-allocated [`ScratchBuffer`] as
    /// conversion storage, the primitive the very first bootstrap step (before any allocator
    /// exists) uses instead of caller-supplied storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `scratch` is smaller than
    /// [`KernelMemoryMap::max_conversion_request`] requires for `view`.
    pub fn build_from_scratch<const N: usize>(view: FirmwareMapView, scratch: &'buf mut ScratchBuffer<N>) -> Result<Self, Error> {
        if N < Self::max_conversion_request(&view).size() {
            return Err(Error::InvalidArgument);
        }
        Ok(Self::build(view, ScratchBuffer::as_uninit_slice::<KernelDescriptor>(scratch)))
    }

    /// The number of valid descriptors in the map.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the map has no valid descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterates the map's valid descriptors in ascending `virtual_start` order.
    pub fn iter(&self) -> impl Iterator<Item = &KernelDescriptor> {
        self.descriptors.as_slice().iter()
    }

    /// Returns the allocation request needed to clone this map's valid descriptors elsewhere.
    pub fn max_copy_request(&self) -> MemoryRequest {
        MemoryRequest::new(self.len() * size_of::<KernelDescriptor>(), align_of::<KernelDescriptor>())
    }

    /// Clones this map's valid descriptors into freshly provided storage.
    ///
    /// Generic over its own `'new`, independent of `'buf`: the destination storage is free to
    /// outlive (or be outlived by) the map being copied from, which is exactly what the bootstrap
    /// orchestrator in `manager.rs` needs when it relocates a conversion-scratch-backed map into
    /// its own long-lived bookkeeping storage.
    pub fn clone_into<'new>(&self, storage: &'new mut [MaybeUninit<KernelDescriptor>]) -> KernelMemoryMap<'new> {
        let mut descriptors = FixedVec::new(storage);
        for d in self.descriptors.as_slice() {
            descriptors.push(*d).ok().expect("storage sized by max_copy_request");
        }
        KernelMemoryMap { descriptors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::FirmwareMap;
    use core::ptr;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct RawDescriptor {
        memory_type: MemoryType,
        physical_start: u64,
        virtual_start: u64,
        number_of_pages: u64,
        attribute: u64,
    }

    fn build_view(entries: &[(MemoryType, u64, u64, u64)]) -> (std::vec::Vec<u8>, usize) {
        let stride = size_of::<RawDescriptor>();
        let mut blob = std::vec![0u8; entries.len() * stride];
        for (i, &(ty, phys, virt, pages)) in entries.iter().enumerate() {
            let raw = RawDescriptor {
                memory_type: ty,
                physical_start: phys,
                virtual_start: virt,
                number_of_pages: pages,
                attribute: 0,
            };
            // SAFETY: `blob` holds `entries.len() * stride` bytes.
            unsafe {
                ptr::write_unaligned(blob.as_mut_ptr().add(i * stride).cast::<RawDescriptor>(), raw);
            }
        }
        (blob, stride)
    }

    fn with_map<R>(entries: &[(MemoryType, u64, u64, u64)], f: impl FnOnce(KernelMemoryMap<'_>) -> R) -> R {
        let (blob, stride) = build_view(entries);
        // SAFETY: `blob` lives for the duration of this call.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let view = map.view();
        let mut storage = std::vec![const { MaybeUninit::uninit() }; entries.len()];
        let kmap = KernelMemoryMap::build(view, &mut storage);
        f(kmap)
    }

    #[test]
    fn s1_single_descriptor() {
        with_map(&[(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64 * 1024 * 1024 / 4096)], |map| {
            assert_eq!(map.len(), 1);
            let d = map.iter().next().unwrap();
            assert!(d.is_general_purpose());
            assert_eq!(d.virtual_start, 0x10_0000);
        });
    }

    #[test]
    fn s2_overlap_merge() {
        with_map(
            &[
                (MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 256),
                (MemoryType::CONVENTIONAL, 0x11_0000, 0x11_0000, 256),
            ],
            |map| {
                assert_eq!(map.len(), 1);
                let d = map.iter().next().unwrap();
                assert_eq!(d.pages, 512);
                assert_eq!(d.virtual_start, 0x10_0000);
            },
        );
    }

    #[test]
    fn s3_corrupt_overlap() {
        with_map(
            &[
                (MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 256),
                (MemoryType::CONVENTIONAL, 0xDEAD_0000, 0x11_0000, 256),
                (MemoryType::CONVENTIONAL, 0x20_0000, 0x20_0000, 16),
            ],
            |map| {
                // The first two entries contradict each other and are both invalidated; the third
                // survives untouched.
                assert_eq!(map.len(), 1);
                let d = map.iter().next().unwrap();
                assert_eq!(d.virtual_start, 0x20_0000);
            },
        );
    }

    #[test]
    fn sortedness_and_non_overlap() {
        with_map(
            &[
                (MemoryType::CONVENTIONAL, 0x40_0000, 0x40_0000, 16),
                (MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 16),
                (MemoryType::RESERVED, 0x20_0000, 0x20_0000, 16),
            ],
            |map| {
                let descriptors: std::vec::Vec<_> = map.iter().collect();
                for w in descriptors.windows(2) {
                    assert!(w[0].virtual_start < w[1].virtual_start);
                    assert!(!w[0].region().overlaps(&w[1].region()));
                }
            },
        );
    }

    #[test]
    fn sub_page_region_is_invalid() {
        with_map(&[(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 0)], |map| {
            assert_eq!(map.len(), 0);
        });
    }

    #[test]
    fn builds_from_scratch_buffer() {
        let entries = [(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64 * 1024 * 1024 / 4096)];
        let (blob, stride) = build_view(&entries);
        // SAFETY: `blob` outlives every use of `firmware_map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let mut scratch = crate::config::ScratchBuffer::<4096>::new();
        let map = KernelMemoryMap::build_from_scratch(firmware_map.view(), &mut scratch).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn rejects_undersized_scratch_buffer() {
        let entries = [(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64 * 1024 * 1024 / 4096)];
        let (blob, stride) = build_view(&entries);
        // SAFETY: `blob` outlives every use of `firmware_map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let mut scratch = crate::config::ScratchBuffer::<1>::new();
        assert!(matches!(KernelMemoryMap::build_from_scratch(firmware_map.view(), &mut scratch), Err(Error::InvalidArgument)));
    }
}
