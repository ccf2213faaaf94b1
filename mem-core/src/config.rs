//! Target configuration constants and the stack-scratch primitive bootstrap depends on before any
//! allocator exists.

use core::{mem::MaybeUninit, slice};

/// Size, in bytes, of one kernel page.
///
/// Must be a power of two. This default (4 KiB) matches the firmware pagesize used by
/// [`crate::firmware`]; a target with a different native page size would override this constant.
pub const KERNEL_PAGESIZE: u64 = 4096;

/// The firmware's own pagesize, used to interpret [`crate::firmware::FirmwareDescriptor::pages`].
///
/// Fixed by the UEFI specification.
pub const FIRMWARE_PAGESIZE: u64 = 4096;

/// Platform maximum alignment: the alignment to which every [`crate::resource::buddy`] payload
/// pointer is guaranteed to be aligned, regardless of the caller's requested alignment.
pub const MAX_ALIGN: usize = 16;

/// `log2` of the ratio between [`KERNEL_PAGESIZE`] and the buddy resource's smallest block size.
///
/// The bootstrap buddy resource is parameterized with `min_block = KERNEL_PAGESIZE >>
/// MEM_CHUNK_LEVELS`. Chosen so that `min_block` (64 bytes, at the default 4 KiB page size) clears
/// the buddy free-list header footprint with room to spare; a shift of 10 or more would ask for a
/// block smaller than one [`crate::resource::buddy`] header.
pub const MEM_CHUNK_LEVELS: u32 = 6;

/// Whether debug assertions (and therefore [`trap`] on [`crate::error::Error::AssertionFailure`])
/// are active.
///
/// Tied to `cfg(debug_assertions)` rather than a separate flag so host test builds exercise the
/// same assertions a debug boot build would.
pub const DEBUG_ASSERT_ENABLED: bool = cfg!(debug_assertions);

/// Halts execution.
///
/// On real boot targets this would disable interrupts and spin forever; on the host (and in
/// tests) it panics, which is the closest host-observable equivalent of "never returns".
#[cold]
pub fn trap() -> ! {
    panic!("mem-core: trap()")
}

/// Checks an internal invariant, logging and [`trap`]ping when it is violated in a debug build.
///
/// In release builds (`DEBUG_ASSERT_ENABLED == false`) a violated invariant leaves its guarded
/// precondition's behavior undefined rather than halting, matching
/// [`crate::error::Error::AssertionFailure`]'s own documented semantics.
#[inline]
#[track_caller]
pub fn assert_invariant(condition: bool, msg: &str) {
    if DEBUG_ASSERT_ENABLED && !condition {
        crate::error!("internal invariant violated: {msg}");
        trap();
    }
}

/// A stack-allocated scratch buffer aligned to [`MAX_ALIGN`].
///
/// This is the safe-Rust equivalent of the `alloca_with_align(size, align)` primitive: a large,
/// appropriately aligned local array the very first bootstrap step (firmware-to-kernel map
/// conversion, via [`crate::kernel_map::KernelMemoryMap::build_from_scratch`]) uses before any
/// allocator exists. `N` is chosen by the caller to be large enough for
/// [`crate::kernel_map::KernelMemoryMap::max_conversion_request`].
#[repr(align(16))]
pub struct ScratchBuffer<const N: usize>(pub [u8; N]);

impl<const N: usize> ScratchBuffer<N> {
    /// Constructs a new, zeroed scratch buffer on the caller's stack.
    pub const fn new() -> Self {
        Self([0; N])
    }

    /// Returns the buffer's contents as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Reinterprets this buffer's bytes as a slot array for `T`, the form placement-built
    /// collections like [`crate::collections::FixedVec`] expect.
    ///
    /// Slots past `N / size_of::<T>()` are simply unavailable; this never reads or writes beyond
    /// `N` bytes.
    pub fn as_uninit_slice<T>(&mut self) -> &mut [MaybeUninit<T>] {
        assert_invariant(align_of::<T>() <= MAX_ALIGN, "ScratchBuffer::as_uninit_slice: T's alignment exceeds MAX_ALIGN");
        let count = N / size_of::<T>();
        // SAFETY: `self.0` is `N` bytes, aligned to `MAX_ALIGN` (at least `align_of::<T>()`, just
        // checked) by this type's `repr(align(16))`, and `count * size_of::<T>() <= N`, so the
        // resulting slice denotes exactly `count` live, writable, correctly aligned, possibly
        // uninitialized `T` slots.
        unsafe { slice::from_raw_parts_mut(self.0.as_mut_ptr().cast::<MaybeUninit<T>>(), count) }
    }
}

impl<const N: usize> Default for ScratchBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_uninit_slice_covers_whole_buffer() {
        let mut scratch = ScratchBuffer::<64>::new();
        let slots: &mut [MaybeUninit<u64>] = scratch.as_uninit_slice();
        assert_eq!(slots.len(), 8);
        slots[0].write(42);
        // SAFETY: slot 0 was just initialized.
        assert_eq!(unsafe { slots[0].assume_init() }, 42);
    }
}
