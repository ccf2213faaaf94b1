//! The `Resource` abstraction and its three composable implementations: [`monotonic::MonotonicBuffer`],
//! [`distributed::DistributedResource`], and [`buddy::BuddyResource`].
//!
//! Runtime polymorphism here uses a trait behind `&dyn Resource` rather than a hand-rolled sealed
//! enum, matching the host workspace's own preference for trait objects at heterogeneous-upstream
//! seams (its `platform::generic::Platform` trait plays the same role for platform backends).

pub mod buddy;
pub mod distributed;
pub mod monotonic;

use core::ptr::NonNull;

use crate::error::Error;

/// A source of raw, untyped memory.
///
/// All three implementations are single-threaded: `allocate`/`deallocate` take `&self` and use
/// interior mutability internally, matching [`MonotonicBuffer`](monotonic::MonotonicBuffer)'s own
/// single bump cursor and this crate's single-threaded concurrency model.
pub trait Resource {
    /// Allocates `size` bytes aligned to `align` (a power of two).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadAlloc`] if the request cannot be satisfied.
    fn allocate(&self, size: usize, align: usize) -> Result<NonNull<u8>, Error>;

    /// Returns a block previously returned by [`Resource::allocate`] with the same `size` and
    /// `align`.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by a prior call to `self.allocate(size, align)` and not
    /// already deallocated.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize);

    /// Returns `true` if `other` is the same concrete resource as `self`.
    ///
    /// Identity comparison only (address equality); there is no downcasting anywhere in the
    /// allocator stack.
    fn is_equal(&self, other: &dyn Resource) -> bool;
}

/// Compares two resources for identity by the address of their trait object's data pointer.
pub fn resource_identity(a: &dyn Resource, b: &dyn Resource) -> bool {
    core::ptr::addr_eq(a, b)
}
