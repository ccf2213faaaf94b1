//! Enumerates the maximal free fragments of general-purpose memory: each descriptor's span minus
//! the occupied list.

use crate::{kernel_map::KernelMemoryMap, region::MemoryRegion};

/// Visits every maximal subrange of a general-purpose descriptor that is disjoint from `occupied`
/// (sorted ascending by start), across the whole map, in ascending address order.
///
/// Subtraction proceeds left-to-right within each descriptor: a running cursor starts at the
/// descriptor's base, advances past every occupied region that intersects the descriptor, and
/// emits the gap before each one. Occupied regions that overlap each other are handled correctly
/// because the cursor only ever moves forward.
pub fn enumerate_available(map: &KernelMemoryMap<'_>, occupied: &[MemoryRegion], mut visit: impl FnMut(MemoryRegion)) {
    for descriptor in map.iter() {
        if !descriptor.is_general_purpose() {
            continue;
        }
        let region = descriptor.region();
        let mut cursor = region.start();

        for occ in occupied {
            if occ.end() <= region.start() || occ.start() >= region.end() {
                continue;
            }
            let occ_start = occ.start().max(region.start());
            let occ_end = occ.end().min(region.end());

            if occ_start > cursor {
                if let Ok(gap) = MemoryRegion::new(cursor, occ_start - cursor) {
                    if !gap.is_empty() {
                        visit(gap);
                    }
                }
            }
            cursor = cursor.max(occ_end);
        }

        if cursor < region.end() {
            if let Ok(tail) = MemoryRegion::new(cursor, region.end() - cursor) {
                if !tail.is_empty() {
                    visit(tail);
                }
            }
        }
    }
}

/// Counts the number of fragments [`enumerate_available`] would visit.
pub fn count_available(map: &KernelMemoryMap<'_>, occupied: &[MemoryRegion]) -> usize {
    let mut count = 0;
    enumerate_available(map, occupied, |_| count += 1);
    count
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

    fn with_view<R>(virt: u64, kernel_pages: u64, f: impl FnOnce(FirmwareMapView) -> R) -> R {
        let stride = size_of::<RawDescriptor>();
        let raw = RawDescriptor {
            memory_type: MemoryType::CONVENTIONAL,
            physical_start: virt,
            virtual_start: virt,
            number_of_pages: kernel_pages,
            attribute: 0,
        };
        let mut blob = std::vec![0u8; stride];
        // SAFETY: `blob` holds exactly `stride` bytes.
        unsafe { ptr::write_unaligned(blob.as_mut_ptr().cast::<RawDescriptor>(), raw) };
        // SAFETY: `blob` lives for the duration of this call.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), 1, stride, 1) };
        f(map.view())
    }

    #[test]
    fn subtracts_middle_occupied_region() {
        with_view(0x10_0000, 4, |view| {
            let mut storage = std::vec![const { MaybeUninit::uninit() }; 1];
            let kmap = crate::kernel_map::KernelMemoryMap::build(view, &mut storage);
            let occupied = [MemoryRegion::new(0x10_1000, 0x1000).unwrap()];

            let mut fragments = std::vec::Vec::new();
            enumerate_available(&kmap, &occupied, |r| fragments.push(r));

            assert_eq!(fragments.len(), 2);
            assert_eq!(fragments[0], MemoryRegion::new(0x10_0000, 0x1000).unwrap());
            assert_eq!(fragments[1], MemoryRegion::new(0x10_2000, 0x2000).unwrap());
        });
    }

    #[test]
    fn fully_occupied_descriptor_yields_nothing() {
        with_view(0x10_0000, 1, |view| {
            let mut storage = std::vec![const { MaybeUninit::uninit() }; 1];
            let kmap = crate::kernel_map::KernelMemoryMap::build(view, &mut storage);
            let occupied = [MemoryRegion::new(0x10_0000, 0x1000).unwrap()];
            assert_eq!(count_available(&kmap, &occupied), 0);
        });
    }

    #[test]
    fn no_occupied_regions_yields_whole_descriptor() {
        with_view(0x10_0000, 4, |view| {
            let mut storage = std::vec![const { MaybeUninit::uninit() }; 1];
            let kmap = crate::kernel_map::KernelMemoryMap::build(view, &mut storage);
            let mut fragments = std::vec::Vec::new();
            enumerate_available(&kmap, &[], |r| fragments.push(r));
            assert_eq!(fragments, std::vec![MemoryRegion::new(0x10_0000, 0x4000).unwrap()]);
        });
    }
}
