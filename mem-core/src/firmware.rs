//! A read-only, bounded view over a firmware-owned memory-map blob.
//!
//! The firmware hands over a flat array of stride-sized records rather than an array of
//! `size_of::<FirmwareDescriptor>()`-sized ones, because later firmware revisions are free to grow
//! the descriptor by appending fields the stub does not know about. This mirrors how
//! `stub/src/platform/frame_allocator.rs` reads its own on-disk descriptor links: raw pointer
//! arithmetic in `uintptr` space, one `read_unaligned` per field, trailing bytes ignored.

use core::{fmt, mem, ptr};

use uefi::memory::MemoryType;

/// A single entry of the firmware memory map, widened to 64 bits throughout regardless of host
/// pointer width.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FirmwareDescriptor {
    /// The firmware-reported type of this region.
    pub memory_type: MemoryType,
    /// The physical address at the start of the region.
    pub physical_start: u64,
    /// The virtual address at the start of the region.
    pub virtual_start: u64,
    /// The number of firmware pages ([`crate::config::FIRMWARE_PAGESIZE`]-sized) in the region.
    pub pages: u64,
    /// The capability bit mask of the region.
    pub attributes: u64,
}

impl fmt::Debug for FirmwareDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirmwareDescriptor")
            .field("memory_type", &self.memory_type)
            .field("physical_start", &format_args!("{:#x}", self.physical_start))
            .field("virtual_start", &format_args!("{:#x}", self.virtual_start))
            .field("pages", &self.pages)
            .field("attributes", &format_args!("{:#x}", self.attributes))
            .finish()
    }
}

/// The on-the-wire layout read out of the firmware's blob at each stride step.
///
/// Matches the UEFI `EFI_MEMORY_DESCRIPTOR` layout exactly (`Type: u32` then implicit padding,
/// `PhysicalStart/VirtualStart/NumberOfPages/Attribute: u64`), so it can be read with
/// [`ptr::read_unaligned`] directly out of firmware-provided memory.
#[repr(C)]
#[derive(Clone, Copy)]
struct RawDescriptor {
    memory_type: MemoryType,
    physical_start: u64,
    virtual_start: u64,
    number_of_pages: u64,
    attribute: u64,
}

/// An untyped, stride-addressed array of firmware memory descriptors.
#[derive(Clone, Copy, Debug)]
pub struct FirmwareMap {
    /// Pointer to the first descriptor blob.
    descriptors: *const u8,
    /// Number of descriptor blobs in the array.
    count: usize,
    /// Byte distance between the start of consecutive descriptor blobs.
    ///
    /// Always `>= size_of::<RawDescriptor>()`.
    stride: usize,
    /// The firmware's reported descriptor format version.
    version: u32,
}

impl FirmwareMap {
    /// Constructs a new [`FirmwareMap`] view.
    ///
    /// # Safety
    ///
    /// `descriptors` must point to `count * stride` readable bytes for the entire lifetime this
    /// [`FirmwareMap`] (and any [`FirmwareMapView`] derived from it) is used, and `stride` must be
    /// at least `size_of::<FirmwareDescriptor>()`.
    pub const unsafe fn new(descriptors: *const u8, count: usize, stride: usize, version: u32) -> Self {
        Self {
            descriptors,
            count,
            stride,
            version,
        }
    }

    /// The number of descriptors in the map.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the map contains no descriptors.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The firmware's reported descriptor format version.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns a forward, random-access view over this map's descriptors.
    pub fn view(&self) -> FirmwareMapView {
        FirmwareMapView { map: *self }
    }

    /// The region of memory this map's own backing blob occupies, if it is representable.
    ///
    /// Returns `None` on overflow (`count * stride` or the resulting region does not fit in
    /// `usize`); the caller is responsible for treating the firmware's own map blob as occupied
    /// memory, since it is still physically resident at the address the firmware handed over.
    pub fn storage_region(&self) -> Option<crate::region::MemoryRegion> {
        let bytes = self.count.checked_mul(self.stride)?;
        crate::region::MemoryRegion::new(self.descriptors as usize, bytes).ok()
    }
}

/// The minimum stride a [`FirmwareMap`] may be constructed with: the size of one descriptor blob
/// in its on-the-wire layout.
pub const fn minimum_stride() -> usize {
    mem::size_of::<RawDescriptor>()
}

/// A forward- and random-access iterator over a [`FirmwareMap`]'s descriptors.
#[derive(Clone, Copy, Debug)]
pub struct FirmwareMapView {
    map: FirmwareMap,
}

impl FirmwareMapView {
    /// The number of descriptors reachable through this view.
    pub const fn len(&self) -> usize {
        self.map.count
    }

    /// Returns `true` if there are no descriptors to view.
    pub const fn is_empty(&self) -> bool {
        self.map.count == 0
    }

    /// Reads the descriptor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> FirmwareDescriptor {
        assert!(index < self.map.count, "firmware descriptor index out of bounds");

        debug_assert!(self.map.stride >= mem::size_of::<RawDescriptor>());

        // SAFETY:
        //
        // `self.map` was constructed with the invariant that `count * stride` bytes starting at
        // `descriptors` are readable, and `index < count`, so `descriptors + index * stride`
        // points to at least `size_of::<RawDescriptor>()` readable bytes. The read is unaligned
        // because `stride` carries no alignment guarantee.
        let raw = unsafe {
            let entry_ptr = self.map.descriptors.add(index * self.map.stride);
            ptr::read_unaligned(entry_ptr.cast::<RawDescriptor>())
        };

        FirmwareDescriptor {
            memory_type: raw.memory_type,
            physical_start: raw.physical_start,
            virtual_start: raw.virtual_start,
            pages: raw.number_of_pages,
            attributes: raw.attribute,
        }
    }

    /// Returns an iterator over every descriptor in the view, in array order.
    pub fn iter(&self) -> impl Iterator<Item = FirmwareDescriptor> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_blob(entries: &[(MemoryType, u64, u64, u64, u64)], stride: usize) -> std::vec::Vec<u8> {
        let mut blob = std::vec![0u8; entries.len() * stride];
        for (i, &(ty, phys, virt, pages, attr)) in entries.iter().enumerate() {
            let raw = RawDescriptor {
                memory_type: ty,
                physical_start: phys,
                virtual_start: virt,
                number_of_pages: pages,
                attribute: attr,
            };
            // SAFETY: `blob` holds `entries.len() * stride` bytes and `stride >=
            // size_of::<RawDescriptor>()`, so this write is in-bounds.
            unsafe {
                let dst = blob.as_mut_ptr().add(i * stride);
                ptr::write_unaligned(dst.cast::<RawDescriptor>(), raw);
            }
        }
        blob
    }

    #[test]
    fn reads_back_exact_stride() {
        let entries = [
            (MemoryType::CONVENTIONAL, 0x1000, 0x1000, 16, 0),
            (MemoryType::RESERVED, 0x11000, 0x11000, 4, 0),
        ];
        let stride = mem::size_of::<RawDescriptor>();
        let blob = build_blob(&entries, stride);

        // SAFETY: `blob` lives for the duration of this test and holds `entries.len() * stride`
        // bytes.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let view = map.view();
        assert_eq!(view.len(), 2);
        let d0 = view.get(0);
        assert_eq!(d0.memory_type, MemoryType::CONVENTIONAL);
        assert_eq!(d0.physical_start, 0x1000);
        assert_eq!(d0.pages, 16);
        let d1 = view.get(1);
        assert_eq!(d1.memory_type, MemoryType::RESERVED);
        assert_eq!(d1.pages, 4);
    }

    #[test]
    fn storage_region_spans_the_whole_blob() {
        let entries = [(MemoryType::CONVENTIONAL, 0x1000, 0x1000, 16, 0)];
        let stride = mem::size_of::<RawDescriptor>();
        let blob = build_blob(&entries, stride);

        // SAFETY: see above.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let region = map.storage_region().unwrap();
        assert_eq!(region.start(), blob.as_ptr() as usize);
        assert_eq!(region.size(), stride);
    }

    #[test]
    fn tolerates_oversized_stride() {
        let entries = [(MemoryType::CONVENTIONAL, 0x2000, 0x2000, 8, 0)];
        let stride = mem::size_of::<RawDescriptor>() + 16;
        let blob = build_blob(&entries, stride);

        // SAFETY: see above.
        let map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 2) };
        let d = map.view().get(0);
        assert_eq!(d.physical_start, 0x2000);
        assert_eq!(d.pages, 8);
    }
}
