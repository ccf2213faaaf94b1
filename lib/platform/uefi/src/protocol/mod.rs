//! Definitions of UEFI protocol interfaces.

pub mod console;
pub mod decompress;
pub mod device_path;
pub mod device_path_utilities;
pub mod loaded_image;
pub mod loaded_image_device_path;
