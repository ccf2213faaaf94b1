//! The error taxonomy surfaced by [`crate`]'s public operations.

use core::{error, fmt};

/// Errors that can be surfaced by the memory bootstrap core.
///
/// Descriptor-level corruption ([`Error::CorruptMap`]) and arithmetic overflow
/// ([`Error::Overflow`]) encountered while sanitising the firmware memory map are handled locally
/// by [`crate::kernel_map`] and never reach a caller; they are listed here only so that internal
/// helpers share one error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A caller violated a documented precondition: an unsorted occupied list, a region not
    /// contained within any descriptor of the map, or invalid buddy-allocator parameters.
    InvalidArgument,
    /// A resource could not satisfy an allocation request.
    BadAlloc,
    /// The region placement engine exhausted the memory map without finding a region that meets
    /// the request.
    CannotMeetRequest,
    /// Two firmware descriptors contradict each other (overlap with differing types, or
    /// overlapping regions whose physical addresses do not line up).
    ///
    /// Handled locally; kept as a variant so that [`crate::kernel_map`]'s internal helpers can
    /// share the same `Result` type as the rest of the crate.
    CorruptMap,
    /// Arithmetic performed on a descriptor or request overflowed the address space.
    ///
    /// Handled locally; see [`Error::CorruptMap`].
    Overflow,
    /// An internal invariant was violated.
    ///
    /// In debug builds this traps via [`crate::config::trap`]; in release builds the behavior is
    /// defined by whichever precondition was violated.
    AssertionFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidArgument => "invalid argument",
            Self::BadAlloc => "allocation could not be satisfied",
            Self::CannotMeetRequest => "no region satisfies the request",
            Self::CorruptMap => "firmware memory map is internally inconsistent",
            Self::Overflow => "arithmetic overflow",
            Self::AssertionFailure => "internal invariant violated",
        };
        f.write_str(msg)
    }
}

impl error::Error for Error {}

/// Convenience alias for this crate's fallible operations.
pub type Result<T> = core::result::Result<T, Error>;
