//! The region placement engine: finding a free, aligned sub-region of the memory map.

use crate::{
    error::Error,
    kernel_map::KernelMemoryMap,
    region::{align_up, MemoryRegion, MemoryRequest},
};

/// Finds a region satisfying `request` that lies fully inside some general-purpose descriptor of
/// `map` and is disjoint from every region in `occupied` (sorted ascending by start).
///
/// First-fit by descriptor, lowest address within a descriptor: descriptors are visited in
/// ascending `virtual_start` order (the order [`KernelMemoryMap::iter`] already yields), and
/// within a descriptor the candidate is pushed past each intersecting occupied region in turn,
/// always re-aligning from the intersection's top.
///
/// # Errors
///
/// Returns [`Error::CannotMeetRequest`] if no such region exists.
pub fn meet_request(map: &KernelMemoryMap<'_>, occupied: &[MemoryRegion], request: MemoryRequest) -> Result<MemoryRegion, Error> {
    for descriptor in map.iter() {
        if !descriptor.is_general_purpose() {
            continue;
        }
        let region = descriptor.region();

        let Some(start) = align_up(region.start(), request.alignment()) else {
            continue;
        };
        let Some(mut candidate) = build_candidate(start, request.size()) else {
            continue;
        };

        if !descriptor.contains_region(&candidate) {
            continue;
        }

        // The occupied list is sorted, so once the candidate has moved past index `i`, no region
        // at index `< i` can intersect it; resume scanning from the last intersection point.
        let mut from = first_intersecting(occupied, 0, &candidate);
        loop {
            let Some(idx) = from else {
                return Ok(candidate);
            };
            let x = occupied[idx];

            let Some(new_start) = align_up(x.end(), request.alignment()) else {
                break;
            };
            let Some(new_candidate) = build_candidate(new_start, request.size()) else {
                break;
            };
            candidate = new_candidate;

            if !descriptor.contains_region(&candidate) {
                break;
            }

            from = first_intersecting(occupied, idx + 1, &candidate);
        }
    }

    Err(Error::CannotMeetRequest)
}

/// Constructs a candidate region of `size` bytes starting at `start`, or `None` on overflow.
fn build_candidate(start: usize, size: usize) -> Option<MemoryRegion> {
    MemoryRegion::new(start, size).ok()
}

/// Returns the index of the first region in `occupied[from..]` that intersects `candidate`.
///
/// `occupied` is sorted ascending by `start`, but may contain entries whose spans overlap each
/// other; this still finds the first one that intersects `candidate`, which is all placement
/// correctness requires.
fn first_intersecting(occupied: &[MemoryRegion], from: usize, candidate: &MemoryRegion) -> Option<usize> {
    occupied[from..]
        .iter()
        .position(|r| r.overlaps(candidate))
        .map(|i| i + from)
}

/// Inserts `region` into `occupied` (sorted ascending by start), preserving order, via
/// [`crate::collections::FixedVec::insert`].
///
/// # Errors
///
/// Returns [`Error::BadAlloc`] if `occupied` has no remaining capacity.
pub fn insert_sorted(occupied: &mut crate::collections::FixedVec<'_, MemoryRegion>, region: MemoryRegion) -> Result<(), Error> {
    let index = occupied
        .as_slice()
        .iter()
        .position(|r| r.start() > region.start())
        .unwrap_or(occupied.len());
    occupied.insert(index, region).map_err(|_| Error::BadAlloc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::{FirmwareMap, FirmwareMapView};
    use core::{mem::MaybeUninit, ptr};
    use uefi::memory::MemoryType;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct RawDescriptor {
        memory_type: MemoryType,
        physical_start: u64,
        virtual_start: u64,
        number_of_pages: u64,
        attribute: u64,
    }

    fn single_descriptor_map(virt: u64, kernel_pages: u64) -> (std::vec::Vec<u8>, usize) {
        let stride = size_of::<RawDescriptor>();
        let raw = RawDescriptor {
            memory_type: MemoryType::CONVENTIONAL,
            physical_start: virt,
            virtual_start: virt,
            number_of_pages: kernel_pages, // 4KiB firmware pages == kernel pages here
            attribute: 0,
        };
        let mut blob = std::vec![0u8; stride];
        // SAFETY: `blob` holds exactly `stride` bytes.
        unsafe { ptr::write_unaligned(blob.as_mut_ptr().cast::<RawDescriptor>(), raw) };
        (blob, stride)
    }

    fn with_view<R>(virt: u64, kernel_pages: u64, f: impl FnOnce(FirmwareMapView) -> R) -> R {
        let (blob, stride) = single_descriptor_map(virt, kernel_pages);
        // SAFETY: `blob` lives for the duration of this call.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), 1, stride, 1) };
        f(map.view())
    }

    #[test]
    fn s4_tight_packing() {
        with_view(0x10_0000, 4, |view| {
            let mut storage = std::vec![const { MaybeUninit::uninit() }; 1];
            let kmap = crate::kernel_map::KernelMemoryMap::build(view, &mut storage);

            let occupied = [
                MemoryRegion::new(0x10_0000, 4096).unwrap(),
                MemoryRegion::new(0x10_2000, 4096).unwrap(),
            ];
            let request = MemoryRequest::new(4096, 4096);

            let first = meet_request(&kmap, &occupied, request).unwrap();
            assert_eq!(first, MemoryRegion::new(0x10_1000, 4096).unwrap());

            let occupied2 = [occupied[0], first, occupied[1]];
            let second = meet_request(&kmap, &occupied2, request).unwrap();
            assert_eq!(second, MemoryRegion::new(0x10_3000, 4096).unwrap());

            let occupied3 = [occupied2[0], occupied2[1], occupied2[2], second];
            assert_eq!(meet_request(&kmap, &occupied3, request), Err(Error::CannotMeetRequest));
        });
    }

    #[test]
    fn placement_result_is_aligned_and_disjoint() {
        with_view(0x0, 64, |view| {
            let mut storage = std::vec![const { MaybeUninit::uninit() }; 1];
            let kmap = crate::kernel_map::KernelMemoryMap::build(view, &mut storage);
            let occupied = [MemoryRegion::new(0x1000, 0x2000).unwrap()];
            let request = MemoryRequest::new(0x800, 0x800);
            let region = meet_request(&kmap, &occupied, request).unwrap();
            assert_eq!(region.start() % 0x800, 0);
            assert_eq!(region.size(), 0x800);
            assert!(!region.overlaps(&occupied[0]));
        });
    }
}
