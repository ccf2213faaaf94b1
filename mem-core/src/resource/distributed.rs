//! A fan-out [`Resource`] that routes each allocation to the first upstream able to satisfy it,
//! tagging the block with the upstream's index so deallocation can find its way back.

use core::{mem::size_of, ptr::NonNull};

use crate::error::Error;

use super::Resource;

/// Allocates across a fixed slice of upstream resources, trying each in order.
///
/// The upstream slice's own storage is expected to come from a
/// [`MonotonicBuffer`](super::monotonic::MonotonicBuffer) placement-constructed by the bootstrap
/// orchestrator (see `manager.rs`); this type only borrows it.
pub struct DistributedResource<'a> {
    upstreams: &'a [&'a dyn Resource],
}

impl<'a> DistributedResource<'a> {
    /// Wraps `upstreams` as a [`DistributedResource`].
    pub fn new(upstreams: &'a [&'a dyn Resource]) -> Self {
        Self { upstreams }
    }

    /// Computes the padding between a requested payload of `size` bytes and the trailing upstream
    /// tag, plus the total block size including that tag.
    fn layout(size: usize) -> Option<(usize, usize)> {
        let tag_align = align_of::<usize>();
        let padding = crate::region::align_up(size, tag_align)? - size;
        let total = size.checked_add(padding)?.checked_add(size_of::<usize>())?;
        Some((padding, total))
    }
}

impl Resource for DistributedResource<'_> {
    fn allocate(&self, size: usize, align: usize) -> Result<NonNull<u8>, Error> {
        let (padding, total) = Self::layout(size).ok_or(Error::BadAlloc)?;

        for (index, upstream) in self.upstreams.iter().enumerate() {
            if let Ok(ptr) = upstream.allocate(total, align) {
                // SAFETY: `ptr` is the base of a `total`-byte block this call just allocated, and
                // `size + padding` lies strictly within that block because `total = size + padding
                // + size_of::<usize>()`, leaving room for the trailing tag.
                unsafe {
                    ptr.as_ptr().add(size + padding).cast::<usize>().write_unaligned(index);
                }
                return Ok(ptr);
            }
        }

        Err(Error::BadAlloc)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        let Some((padding, total)) = Self::layout(size) else {
            return;
        };

        // SAFETY: `ptr` was returned by `Self::allocate` with this `size`, which wrote the
        // upstream index at this exact offset.
        let index = unsafe { ptr.as_ptr().add(size + padding).cast::<usize>().read_unaligned() };

        if let Some(upstream) = self.upstreams.get(index) {
            // SAFETY: forwarding to the upstream that produced this block, with the same total
            // size and alignment it was allocated with.
            unsafe { upstream.deallocate(ptr, total, align) };
        }
    }

    fn is_equal(&self, other: &dyn Resource) -> bool {
        super::resource_identity(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::monotonic::MonotonicBuffer;

    #[test]
    fn routes_deallocation_to_originating_upstream() {
        let mut a_backing = std::vec![0u8; 64];
        let mut b_backing = std::vec![0u8; 64];
        // SAFETY: both buffers are live locals for the duration of this test.
        let a = unsafe { MonotonicBuffer::new(a_backing.as_mut_ptr() as usize, a_backing.len()) };
        // SAFETY: see above.
        let b = unsafe { MonotonicBuffer::new(b_backing.as_mut_ptr() as usize, b_backing.len()) };

        // Exhaust `a` first so the second allocation must land on `b`.
        a.allocate(60, 1).unwrap();

        let upstreams: [&dyn Resource; 2] = [&a, &b];
        let dist = DistributedResource::new(&upstreams);

        let block = dist.allocate(8, 8).unwrap();
        assert!(block.as_ptr() as usize >= b_backing.as_ptr() as usize);
        assert!((block.as_ptr() as usize) < b_backing.as_ptr() as usize + b_backing.len());

        // SAFETY: `block` was just returned by `dist.allocate(8, 8)`.
        unsafe { dist.deallocate(block, 8, 8) };
    }

    #[test]
    fn fails_when_every_upstream_is_exhausted() {
        let mut backing = std::vec![0u8; 8];
        // SAFETY: `backing` is a live local for the duration of this test.
        let only = unsafe { MonotonicBuffer::new(backing.as_mut_ptr() as usize, backing.len()) };
        let upstreams: [&dyn Resource; 1] = [&only];
        let dist = DistributedResource::new(&upstreams);
        assert_eq!(dist.allocate(64, 1), Err(Error::BadAlloc));
    }
}
