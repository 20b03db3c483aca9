//! Fixed layout constants of the cine container and the offset arithmetic
//! derived from them.

use crate::types::setup::Setup;

/// Size of the file header at offset 0
pub const FILE_HEADER_LENGTH: usize = 44;
/// Size of the bitmap-info header that follows the file header
pub const BITMAP_INFO_LENGTH: usize = 40;
/// Leading setup bytes that hold deprecated fields (only TrigFrame is
/// meaningful there, and only to the vendor viewer)
pub const SETUP_DEPRECATED_SKIP: usize = 140;
/// Distance from the setup marker to ImWidth, the first retained field
pub const SETUP_INITIAL_SKIP: usize = 597;
/// Zero-filled tail of the setup structure
pub const SETUP_ZERO_AREA_LENGTH: usize = 1212;
/// Bytes decoded from ImWidth through the end of Description
pub const SETUP_LAYOUT_LENGTH: usize = 4955;

/// Absolute offset of the setup marker
pub const SETUP_MARK_OFFSET: usize =
    FILE_HEADER_LENGTH + BITMAP_INFO_LENGTH + SETUP_DEPRECATED_SKIP;
/// Absolute offset of ImWidth
pub const SETUP_FIELDS_OFFSET: usize = SETUP_MARK_OFFSET + SETUP_INITIAL_SKIP;

/// Tagged-block and annotation headers
pub const BLOCK_HEADER_LENGTH: usize = 8;
pub const ANNOTATION_FIXED_LENGTH: u32 = 8;

/// Fixed-point scale of `Time64` fractions and exposure fractions
pub const TICKS_PER_SECOND: f64 = 4_294_967_296.0;

/// Frames decoded between progress notifications
pub const PROGRESS_INTERVAL: usize = 500;

/// Computes the start of the tagged-block region, which is the sum of:
///  - the file header and bitmap-info header lengths
///  - the declared setup length (which counts the deprecated leading bytes)
pub fn tagged_block_start(setup: &Setup) -> usize {
    FILE_HEADER_LENGTH + BITMAP_INFO_LENGTH + setup.declared_length as usize
}

/// Number of retained-field bytes the setup claims to hold. Negative when the
/// declared length cannot even cover the skipped regions.
pub fn setup_read_length(declared_length: u16) -> i64 {
    i64::from(declared_length)
        - (SETUP_INITIAL_SKIP + SETUP_ZERO_AREA_LENGTH + SETUP_DEPRECATED_SKIP) as i64
}
