//! The bootstrap orchestrator: turns a sanitised [`KernelMemoryMap`] and a caller-supplied list of
//! already-occupied regions into a working [`MemoryManager`] with no heap allocator involved at
//! any step before the manager itself exists.
//!
//! The build walk mirrors `stub/src/platform/frame_allocator.rs`'s own bring-up sequence: convert
//! the firmware's view, reserve the bookkeeping the allocator itself will need, then hand back a
//! single object the rest of the kernel allocates through. Every region this module carves is
//! obtained the same way: [`crate::placement::meet_request`] against the still-growing occupied
//! list, immediately recorded via [`crate::placement::insert_sorted`] before the next request is
//! placed, so that no two carvings can ever overlap.

use core::{mem::MaybeUninit, ptr::NonNull, slice};

use conversion::u64_to_usize_checked;

use crate::{
    collections::FixedVec,
    config::{KERNEL_PAGESIZE, MEM_CHUNK_LEVELS},
    enumerator,
    error::Error,
    kernel_map::{KernelDescriptor, KernelMemoryMap},
    placement,
    region::{MemoryRegion, MemoryRequest},
    resource::{buddy::BuddyResource, distributed::DistributedResource, monotonic::MonotonicBuffer, Resource},
};

/// Number of placement-loop carvings bootstrap performs before it can enumerate final fragments:
/// one each for the relocated kernel map, the final occupied list, and the available-fragment
/// bookkeeping. Also used as the slack added to the available-fragment count estimate, since each
/// of these three carvings can split one free fragment in two.
const BOOTSTRAP_ALLOTMENTS: usize = 3;

/// The fully bootstrapped memory subsystem: a sanitised kernel map, the list of everything
/// reserved against it, the array of free fragments each wrapped as its own allocation resource,
/// and the distributed/buddy resource stack built on top of them.
///
/// Every collection here, and the `DistributedResource`/`BuddyResource` pair, is placement-built
/// directly into memory [`MemoryManager::build`] carved out of the kernel map and never relocated
/// again; `MemoryManager` itself holds only pointer-sized handles (a `BuddyResource`, a reference
/// into the carved storage, and the three `FixedVec`/`KernelMemoryMap` views), so moving a
/// `MemoryManager` around does not invalidate anything it refers to. `distributed` is kept as a
/// reference rather than an owned field specifically so that `general`'s upstream reference
/// (`&'static dyn Resource`, coerced from it) never points back into `MemoryManager`'s own storage
/// — only outward, into the bootstrap carving. See `DESIGN.md`.
///
/// Fields are declared, and therefore dropped, in the order `general`, `distributed`, `fragments`,
/// `kernel_map`, `occupied`: the buddy resource's `Drop` impl hands its top-level blocks back to
/// `distributed`, so it must run first; `distributed` and `fragments` have no `Drop` impl of their
/// own, but ordering them before `kernel_map`/`occupied` keeps the "things the allocator stack
/// depends on" group visibly separate from the "plain bookkeeping records" group.
pub struct MemoryManager {
    general: BuddyResource<'static>,
    distributed: &'static DistributedResource<'static>,
    fragments: FixedVec<'static, MonotonicBuffer>,
    kernel_map: KernelMemoryMap<'static>,
    occupied: FixedVec<'static, MemoryRegion>,
}

impl MemoryManager {
    /// Bootstraps a [`MemoryManager`] from a sanitised firmware-derived `map` and the regions
    /// already known to be occupied (the kernel image, the kernel stack, the firmware map's own
    /// backing storage, and the [`crate::environment::Environment`] record itself — see
    /// [`crate::environment::occupied_memory`]).
    ///
    /// `initial_occupied` must be sorted ascending by start. `scratch` is working storage for the
    /// running occupied list the placement loop consults; it must hold at least
    /// `initial_occupied.len() + `[`BOOTSTRAP_ALLOTMENTS`] entries, which
    /// [`MemoryManager::max_scratch_request`] computes for a given `map`/`initial_occupied` pair.
    ///
    /// Every region this function carves comes from `map` itself (real, firmware-described
    /// physical/virtual address space) and is, by bootstrap discipline, never returned to any
    /// `Resource` for reallocation; this is what justifies ascribing `'static` to the references
    /// this function builds by hand below, each documented at its own unsafe block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `initial_occupied` is unsorted, if any entry is not
    /// contained within some descriptor of `map`, or if `scratch` is too small. Returns
    /// [`Error::CannotMeetRequest`] if bootstrap's own bookkeeping cannot be placed.
    pub fn build(map: &KernelMemoryMap<'_>, initial_occupied: &[MemoryRegion], scratch: &mut [MaybeUninit<MemoryRegion>]) -> Result<MemoryManager, Error> {
        if !initial_occupied.windows(2).all(|w| w[0].start() <= w[1].start()) {
            return Err(Error::InvalidArgument);
        }
        for region in initial_occupied {
            if !map.iter().any(|d| d.contains_region(region)) {
                return Err(Error::InvalidArgument);
            }
        }

        let final_count = initial_occupied.len().checked_add(BOOTSTRAP_ALLOTMENTS).ok_or(Error::Overflow)?;
        if scratch.len() < final_count {
            return Err(Error::InvalidArgument);
        }

        let mut running = FixedVec::new(&mut scratch[..final_count]);
        for region in initial_occupied {
            running.push(*region).ok().expect("scratch sliced to final_count");
        }

        // Computed before any of this bootstrap's own carvings, per `BOOTSTRAP_ALLOTMENTS`'s doc.
        let available_capacity = enumerator::count_available(map, running.as_slice())
            .checked_add(BOOTSTRAP_ALLOTMENTS)
            .ok_or(Error::Overflow)?;

        let mem_map_request = map.max_copy_request();
        let occupied_request = MemoryRequest::new(final_count * size_of::<MemoryRegion>(), align_of::<MemoryRegion>());
        let available_request = available_allotment_request(available_capacity)?;

        let mem_map_region = placement::meet_request(map, running.as_slice(), mem_map_request)?;
        placement::insert_sorted(&mut running, mem_map_region)?;

        let occupied_region = placement::meet_request(map, running.as_slice(), occupied_request)?;
        placement::insert_sorted(&mut running, occupied_region)?;

        let available_region = placement::meet_request(map, running.as_slice(), available_request)?;
        placement::insert_sorted(&mut running, available_region)?;

        crate::config::assert_invariant(running.len() == final_count, "MemoryManager::build: running occupied list diverged from final_count");

        // SAFETY: `mem_map_region` was just carved from `map` and recorded in `running`, so it is
        // disjoint from every other region this function (or its caller) has reserved, and
        // bootstrap never hands a carved region back to any `Resource`, so it remains writable and
        // unaliased for the rest of the program's life.
        let mem_map_buffer = unsafe { MonotonicBuffer::new(mem_map_region.start(), mem_map_region.size()) };
        let mem_map_ptr = mem_map_buffer.allocate(mem_map_request.size(), mem_map_request.alignment())?;
        // SAFETY: `mem_map_ptr` denotes exactly `map.len() * size_of::<KernelDescriptor>()` bytes
        // (since `mem_map_request == map.max_copy_request()`), carved exclusively for the
        // relocated kernel map and never freed; ascribing `'static` is sound per this function's
        // own doc comment.
        let mem_map_storage = unsafe { raw_slice_mut::<KernelDescriptor>(mem_map_ptr, map.len()) };
        let kernel_map = map.clone_into(mem_map_storage);

        // SAFETY: see the `mem_map_buffer` construction above; the same reasoning applies to each
        // region carved below.
        let occupied_buffer = unsafe { MonotonicBuffer::new(occupied_region.start(), occupied_region.size()) };
        let occupied_ptr = occupied_buffer.allocate(occupied_request.size(), occupied_request.alignment())?;
        // SAFETY: see `mem_map_storage` above.
        let occupied_storage = unsafe { raw_slice_mut::<MemoryRegion>(occupied_ptr, final_count) };
        let mut occupied = FixedVec::new(occupied_storage);
        for region in running.as_slice() {
            occupied.push(*region).ok().expect("occupied storage sized to final_count");
        }

        // SAFETY: see `mem_map_buffer` construction above.
        let available_buffer = unsafe { MonotonicBuffer::new(available_region.start(), available_region.size()) };

        let fragments_ptr = available_buffer.allocate(available_capacity * size_of::<MonotonicBuffer>(), align_of::<MonotonicBuffer>())?;
        // SAFETY: see `mem_map_storage` above.
        let fragments_storage = unsafe { raw_slice_mut::<MonotonicBuffer>(fragments_ptr, available_capacity) };
        let mut fragments = FixedVec::new(fragments_storage);
        enumerator::enumerate_available(&kernel_map, occupied.as_slice(), |fragment| {
            // SAFETY: `fragment` is a maximal free region disjoint from every region recorded in
            // `occupied`, produced by `enumerate_available` from `kernel_map`/`occupied` alone.
            let buf = unsafe { MonotonicBuffer::new(fragment.start(), fragment.size()) };
            fragments.push(buf).ok().expect("fragment storage sized by count_available + BOOTSTRAP_ALLOTMENTS");
        });

        let refs_ptr = available_buffer.allocate(fragments.len() * size_of::<&'static dyn Resource>(), align_of::<&'static dyn Resource>())?;
        // SAFETY: `fragments_ptr + i * size_of::<MonotonicBuffer>()` for `i < fragments.len()` was
        // just initialized above by the `fragments.push` calls and, like every other bootstrap
        // carving, is never freed or moved again; a `'static` shared reference to it is therefore
        // sound even though `fragments`'s own `as_slice()` could only lend it for `&self`'s call.
        let refs_slice: &'static [&'static dyn Resource] = unsafe {
            let base = fragments_ptr.as_ptr();
            for i in 0..fragments.len() {
                let elem_ptr = base.add(i * size_of::<MonotonicBuffer>());
                let elem: &'static MonotonicBuffer = &*elem_ptr.cast::<MonotonicBuffer>();
                refs_ptr
                    .as_ptr()
                    .cast::<&'static dyn Resource>()
                    .add(i)
                    .write(elem as &'static dyn Resource);
            }
            slice::from_raw_parts(refs_ptr.as_ptr().cast::<&'static dyn Resource>(), fragments.len())
        };

        let dist_ptr = available_buffer.allocate(size_of::<DistributedResource<'static>>(), align_of::<DistributedResource<'static>>())?;
        // SAFETY: `dist_ptr` denotes fresh, correctly aligned memory for one
        // `DistributedResource`, carved exclusively for this purpose and never freed or aliased
        // again; `refs_slice` outlives it for the same reason it is itself `'static`.
        let distributed: &'static DistributedResource<'static> = unsafe {
            dist_ptr.as_ptr().cast::<DistributedResource<'static>>().write(DistributedResource::new(refs_slice));
            &*dist_ptr.as_ptr().cast::<DistributedResource<'static>>()
        };

        let pagesize = u64_to_usize_checked(KERNEL_PAGESIZE).ok_or(Error::Overflow)?;
        let smallest_chunk = pagesize >> MEM_CHUNK_LEVELS;
        let general = BuddyResource::new(smallest_chunk, pagesize, pagesize, distributed)?;

        Ok(MemoryManager {
            general,
            distributed,
            fragments,
            kernel_map,
            occupied,
        })
    }

    /// The allocation request `scratch` must satisfy for [`MemoryManager::build`] to accept it,
    /// given the same `map`/`initial_occupied` pair that will be passed to it.
    pub fn max_scratch_request(initial_occupied: &[MemoryRegion]) -> MemoryRequest {
        let count = initial_occupied.len().saturating_add(BOOTSTRAP_ALLOTMENTS);
        MemoryRequest::new(count * size_of::<MemoryRegion>(), align_of::<MemoryRegion>())
    }

    /// The single entry point the rest of the kernel allocates general-purpose memory through.
    pub fn general_resource(&self) -> &dyn Resource {
        &self.general
    }

    /// The sanitised kernel memory map this manager was bootstrapped from.
    pub fn kernel_map(&self) -> &KernelMemoryMap<'static> {
        &self.kernel_map
    }

    /// Every region this manager considers reserved: the caller's `initial_occupied` plus the
    /// three bookkeeping allotments bootstrap carved for itself.
    pub fn occupied(&self) -> &[MemoryRegion] {
        self.occupied.as_slice()
    }
}

/// Hands bootstrap's finished [`MemoryManager`] off to the scheduler.
///
/// This crate only exposes the hook the kernel binary that links it is expected to call exactly
/// once, at the end of bootstrap, to transfer ownership of `manager` onward; what happens after
/// that point is scheduling, not memory bootstrap, and has no implementation here.
#[cold]
pub fn morph_into_scheduler(manager: MemoryManager) -> ! {
    let _ = manager;
    crate::config::trap()
}

/// The allocation request for the "available" bootstrap allotment: storage for `capacity`
/// [`MonotonicBuffer`]s, `capacity` `&dyn Resource` upstream references, and one
/// [`DistributedResource`], bump-allocated from it in that order by [`MemoryManager::build`].
fn available_allotment_request(capacity: usize) -> Result<MemoryRequest, Error> {
    let buffers_bytes = capacity.checked_mul(size_of::<MonotonicBuffer>()).ok_or(Error::Overflow)?;
    let refs_align = align_of::<&'static dyn Resource>();
    let refs_bytes = capacity.checked_mul(size_of::<&'static dyn Resource>()).ok_or(Error::Overflow)?;
    let dist_align = align_of::<DistributedResource<'static>>();
    let dist_bytes = size_of::<DistributedResource<'static>>();
    let align = align_of::<MonotonicBuffer>().max(refs_align).max(dist_align);

    // Three independent bump allocations out of the same `MonotonicBuffer`, each of which can
    // waste up to `align - 1` bytes of alignment padding.
    let padding = align.checked_mul(3).ok_or(Error::Overflow)?;
    let total = buffers_bytes
        .checked_add(refs_bytes)
        .and_then(|v| v.checked_add(dist_bytes))
        .and_then(|v| v.checked_add(padding))
        .ok_or(Error::Overflow)?;

    Ok(MemoryRequest::new(total, align))
}

/// Reinterprets `len * size_of::<T>()` bytes starting at `ptr` as a `'static`-lived, writable,
/// uninitialized slice.
///
/// # Safety
///
/// `ptr` must denote `len * size_of::<T>()` writable bytes, correctly aligned for `T`, that are
/// never freed or aliased for the remainder of the program.
unsafe fn raw_slice_mut<T>(ptr: NonNull<u8>, len: usize) -> &'static mut [MaybeUninit<T>] {
    // SAFETY: forwarded from this function's own safety contract.
    unsafe { slice::from_raw_parts_mut(ptr.as_ptr().cast::<MaybeUninit<T>>(), len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::FirmwareMap;
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

    fn build_blob(entries: &[(MemoryType, u64, u64, u64)]) -> (std::vec::Vec<u8>, usize) {
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
            unsafe { ptr::write_unaligned(blob.as_mut_ptr().add(i * stride).cast::<RawDescriptor>(), raw) };
        }
        (blob, stride)
    }

    /// One 8 KiB unusable region followed by 8 MiB of conventional memory, with the kernel image
    /// and stack carved out of the front of that conventional span — the shape a real bootloader
    /// handoff takes.
    #[test]
    fn s6_full_manager_bootstrap_allocates_from_general_resource() {
        let entries = [
            (MemoryType::RESERVED, 0x0, 0x0, 2),
            (MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 8 * 1024 * 1024 / 4096),
        ];
        let (blob, stride) = build_blob(&entries);
        // SAFETY: `blob` outlives every use of `map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), entries.len(), stride, 1) };
        let view = firmware_map.view();

        let mut conv_storage = std::vec![const { MaybeUninit::uninit() }; entries.len()];
        let kernel_map = KernelMemoryMap::build(view, &mut conv_storage);

        let kernel_image = MemoryRegion::new(0x10_0000, 0x10_0000).unwrap();
        let kernel_stack = MemoryRegion::new(0x20_0000, 0x8000).unwrap();
        let initial_occupied = [kernel_image, kernel_stack];

        let request = MemoryManager::max_scratch_request(&initial_occupied);
        let scratch_len = request.size() / size_of::<MemoryRegion>();
        let mut scratch = std::vec![const { MaybeUninit::uninit() }; scratch_len];

        let manager = MemoryManager::build(&kernel_map, &initial_occupied, &mut scratch).unwrap();

        let resource = manager.general_resource();
        let block = resource.allocate(1024, 8).unwrap();
        let block_region = MemoryRegion::new(block.as_ptr() as usize, 1024).unwrap();

        assert!(!kernel_image.overlaps(&block_region));
        assert!(!kernel_stack.overlaps(&block_region));
        for occ in manager.occupied() {
            assert!(!occ.overlaps(&block_region));
        }

        // SAFETY: `block` was just returned by this same resource with this same size/align.
        unsafe { resource.deallocate(block, 1024, 8) };
    }

    #[test]
    fn rejects_unsorted_initial_occupied() {
        let entries = [(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64)];
        let (blob, stride) = build_blob(&entries);
        // SAFETY: `blob` outlives every use of `map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), 1, stride, 1) };
        let mut conv_storage = std::vec![const { MaybeUninit::uninit() }; 1];
        let kernel_map = KernelMemoryMap::build(firmware_map.view(), &mut conv_storage);

        let unsorted = [MemoryRegion::new(0x10_1000, 0x1000).unwrap(), MemoryRegion::new(0x10_0000, 0x1000).unwrap()];
        let mut scratch = std::vec![const { MaybeUninit::uninit() }; 8];
        assert!(matches!(MemoryManager::build(&kernel_map, &unsorted, &mut scratch), Err(Error::InvalidArgument)));
    }

    #[test]
    fn rejects_occupied_region_outside_every_descriptor() {
        let entries = [(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64)];
        let (blob, stride) = build_blob(&entries);
        // SAFETY: `blob` outlives every use of `map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), 1, stride, 1) };
        let mut conv_storage = std::vec![const { MaybeUninit::uninit() }; 1];
        let kernel_map = KernelMemoryMap::build(firmware_map.view(), &mut conv_storage);

        let stray = [MemoryRegion::new(0xDEAD_0000, 0x1000).unwrap()];
        let mut scratch = std::vec![const { MaybeUninit::uninit() }; 8];
        assert!(matches!(MemoryManager::build(&kernel_map, &stray, &mut scratch), Err(Error::InvalidArgument)));
    }

    #[test]
    fn rejects_undersized_scratch() {
        let entries = [(MemoryType::CONVENTIONAL, 0x10_0000, 0x10_0000, 64)];
        let (blob, stride) = build_blob(&entries);
        // SAFETY: `blob` outlives every use of `map`/`view` below.
        let firmware_map = unsafe { FirmwareMap::new(blob.as_ptr(), 1, stride, 1) };
        let mut conv_storage = std::vec![const { MaybeUninit::uninit() }; 1];
        let kernel_map = KernelMemoryMap::build(firmware_map.view(), &mut conv_storage);

        let mut scratch = std::vec![const { MaybeUninit::uninit() }; 1];
        assert!(matches!(MemoryManager::build(&kernel_map, &[], &mut scratch), Err(Error::InvalidArgument)));
    }
}
