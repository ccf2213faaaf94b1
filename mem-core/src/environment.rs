//! The versioned boundary record the bootloader hands the core at entry.
//!
//! Shaped the way `lib/stub_api`'s `HeaderV0`/`GenericTableV0` pair describes its own
//! forward-compatible protocol table: a small, never-changing [`Environment`] header carrying a
//! `least_compatible_version` gate, pointing at a version-specific payload read out with the same
//! unsafe-pointer-cast-and-validate style `revm/src/stub_protocol.rs`'s `validate_protocol_table`
//! uses at its own bootloader boundary.

use core::mem;

use crate::{
    error::Error,
    firmware::{self, FirmwareMap},
    region::MemoryRegion,
};

/// The boundary record passed to the core by its bootloader.
///
/// `data` points at a `least_compatible_version`-tagged payload; this core understands exactly one
/// payload shape, [`EnvironmentV1`], selected when `least_compatible_version == 1`.
#[derive(Clone, Copy, Debug)]
pub struct Environment {
    data: *const u8,
    version: u32,
    least_compatible_version: u32,
}

impl Environment {
    /// The only `least_compatible_version` this core understands.
    pub const SUPPORTED_LEAST_COMPATIBLE_VERSION: u32 = 1;

    /// Wraps a boundary record as reported by the bootloader.
    ///
    /// # Safety
    ///
    /// If `least_compatible_version == Self::SUPPORTED_LEAST_COMPATIBLE_VERSION`, `data` must
    /// point to a live, readable `EnvironmentV1` for as long as the returned value (and any
    /// `EnvironmentV1` obtained through [`Environment::as_v1`]) is used.
    pub const unsafe fn new(data: *const u8, version: u32, least_compatible_version: u32) -> Self {
        Self {
            data,
            version,
            least_compatible_version,
        }
    }

    /// The bootloader's own reported protocol version, for diagnostics only.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Reads the `EnvironmentV1` payload this record points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `data` is null or `least_compatible_version` is not
    /// [`Environment::SUPPORTED_LEAST_COMPATIBLE_VERSION`].
    pub fn as_v1(&self) -> Result<&EnvironmentV1, Error> {
        if self.data.is_null() {
            return Err(Error::InvalidArgument);
        }
        if self.least_compatible_version != Self::SUPPORTED_LEAST_COMPATIBLE_VERSION {
            return Err(Error::InvalidArgument);
        }

        // SAFETY: `Environment::new`'s caller guaranteed `data` points to a live `EnvironmentV1`
        // whenever `least_compatible_version` equals `SUPPORTED_LEAST_COMPATIBLE_VERSION`, which
        // was just checked.
        Ok(unsafe { &*self.data.cast::<EnvironmentV1>() })
    }

    /// The address and size of the [`Environment`] record itself, for [`occupied_memory`].
    fn record_region(&self) -> Result<MemoryRegion, Error> {
        MemoryRegion::new(self.data as usize, mem::size_of::<EnvironmentV1>())
    }
}

/// A region of address space expressed the way the boundary record carries it: a plain
/// `(start, size)` pair rather than [`MemoryRegion`], since the bootloader side of this boundary
/// has no reason to share this crate's own invariant-checked type.
#[derive(Clone, Copy, Debug)]
pub struct RawMemoryRegion {
    /// The address of the first byte of the region.
    pub start: usize,
    /// The number of bytes in the region.
    pub size: usize,
}

impl RawMemoryRegion {
    /// Validates this region, yielding [`Error::Overflow`] if `start + size` does not fit in
    /// `usize`.
    pub fn to_region(self) -> Result<MemoryRegion, Error> {
        MemoryRegion::new(self.start, self.size)
    }
}

/// The wire shape of a firmware memory map as carried across the boundary.
#[derive(Clone, Copy, Debug)]
pub struct RawFirmwareMap {
    /// Pointer to the first descriptor blob.
    pub descriptors: *const u8,
    /// Number of descriptor blobs in the array.
    pub number_of_descriptors: usize,
    /// Byte distance between the start of consecutive descriptor blobs.
    pub descriptor_size: usize,
    /// The firmware's reported descriptor format version.
    pub descriptor_version: u32,
    /// The oldest descriptor format version this core can interpret; must equal `1` for the
    /// layout [`crate::firmware`] reads.
    pub least_compatible_version: u32,
}

impl RawFirmwareMap {
    /// The only `least_compatible_version` this core understands.
    pub const SUPPORTED_LEAST_COMPATIBLE_VERSION: u32 = 1;

    /// Validates and wraps this record as a [`FirmwareMap`].
    ///
    /// # Safety
    ///
    /// `self.descriptors` must point to `self.number_of_descriptors * self.descriptor_size`
    /// readable bytes for the lifetime of the returned [`FirmwareMap`]'s use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `least_compatible_version` is unsupported or
    /// `descriptor_size` is smaller than one descriptor blob.
    pub unsafe fn to_firmware_map(&self) -> Result<FirmwareMap, Error> {
        if self.least_compatible_version != Self::SUPPORTED_LEAST_COMPATIBLE_VERSION {
            return Err(Error::InvalidArgument);
        }
        if self.descriptor_size < firmware::minimum_stride() {
            return Err(Error::InvalidArgument);
        }

        // SAFETY: forwarded from this function's own safety contract.
        Ok(unsafe { FirmwareMap::new(self.descriptors, self.number_of_descriptors, self.descriptor_size, self.descriptor_version) })
    }
}

/// The version-1 payload of an [`Environment`] boundary record.
#[derive(Clone, Copy, Debug)]
pub struct EnvironmentV1 {
    /// The region occupied by the loaded kernel image.
    pub kernel_image_region: RawMemoryRegion,
    /// The region occupied by the kernel's initial stack.
    pub kernel_stack_region: RawMemoryRegion,
    /// The firmware-provided memory map.
    pub memmap: RawFirmwareMap,
}

/// The fixed number of regions [`occupied_memory`] always reports.
pub const OCCUPIED_MEMORY_COUNT: usize = 4;

/// Computes the set of regions bootstrap must treat as already occupied before it places anything
/// of its own: the firmware memory map's own backing storage, the [`Environment`] record itself,
/// the kernel image, and the kernel stack.
///
/// # Safety
///
/// `v1.memmap.descriptors` must point to readable memory as required by
/// [`RawFirmwareMap::to_firmware_map`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] or [`Error::Overflow`] if any region is not representable.
pub unsafe fn occupied_memory(env: &Environment, v1: &EnvironmentV1) -> Result<[MemoryRegion; OCCUPIED_MEMORY_COUNT], Error> {
    // SAFETY: forwarded from this function's own safety contract.
    let memmap = unsafe { v1.memmap.to_firmware_map()? };
    let memmap_storage = memmap.storage_region().ok_or(Error::Overflow)?;

    Ok([
        memmap_storage,
        env.record_region()?,
        v1.kernel_image_region.to_region()?,
        v1.kernel_stack_region.to_region()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;
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

    fn fixture(blob: &[u8]) -> EnvironmentV1 {
        EnvironmentV1 {
            kernel_image_region: RawMemoryRegion {
                start: 0x10_0000,
                size: 0x10_0000,
            },
            kernel_stack_region: RawMemoryRegion {
                start: 0x80_0000,
                size: 0x8000,
            },
            memmap: RawFirmwareMap {
                descriptors: blob.as_ptr(),
                number_of_descriptors: 1,
                descriptor_size: size_of::<RawDescriptor>(),
                descriptor_version: 1,
                least_compatible_version: 1,
            },
        }
    }

    #[test]
    fn rejects_null_data() {
        // SAFETY: `least_compatible_version` is deliberately wrong here, so `as_v1` must reject
        // the record before it would ever dereference the null pointer.
        let env = unsafe { Environment::new(ptr::null(), 1, 0) };
        assert!(matches!(env.as_v1(), Err(Error::InvalidArgument)));
    }

    #[test]
    fn rejects_unsupported_version() {
        let marker = 0u8;
        // SAFETY: `least_compatible_version` is wrong, so `data` is never read.
        let env = unsafe { Environment::new(&marker, 1, 2) };
        assert!(matches!(env.as_v1(), Err(Error::InvalidArgument)));
    }

    #[test]
    fn reads_back_v1_and_computes_occupied_memory() {
        let stride = size_of::<RawDescriptor>();
        let raw = RawDescriptor {
            memory_type: MemoryType::CONVENTIONAL,
            physical_start: 0x20_0000,
            virtual_start: 0x20_0000,
            number_of_pages: 4,
            attribute: 0,
        };
        let mut blob = std::vec![0u8; stride];
        // SAFETY: `blob` holds exactly `stride` bytes.
        unsafe { ptr::write_unaligned(blob.as_mut_ptr().cast::<RawDescriptor>(), raw) };

        let v1 = fixture(&blob);
        // SAFETY: `v1` is a local value outliving this call.
        let env = unsafe { Environment::new(core::ptr::from_ref(&v1).cast::<u8>(), 1, 1) };

        let got = env.as_v1().unwrap();
        assert_eq!(got.kernel_image_region.start, 0x10_0000);

        // SAFETY: `blob` and `v1` both outlive this call.
        let occupied = unsafe { occupied_memory(&env, got) }.unwrap();
        assert_eq!(occupied.len(), OCCUPIED_MEMORY_COUNT);
        assert_eq!(occupied[0], MemoryRegion::new(blob.as_ptr() as usize, stride).unwrap());
        assert_eq!(occupied[2], MemoryRegion::new(0x10_0000, 0x10_0000).unwrap());
        assert_eq!(occupied[3], MemoryRegion::new(0x80_0000, 0x8000).unwrap());
    }
}
