//! Type definitions for the cine container format

pub mod bitmap_info;
pub mod flat_fields;
pub mod header;
pub mod offset_table;
pub mod pixel_data;
pub mod setup;
pub mod tagged_block;

// Re-export the main types for convenience
pub use bitmap_info::{BitmapInfoHeader, SampleDepth};
pub use flat_fields::FlatFields;
pub use header::{CINE_FILE_TYPE, FileHeader, Time64};
pub use offset_table::FrameOffsetTable;
pub use pixel_data::{FrameAnnotation, FrameProgress, FrameStack, PixelFrame};
pub use setup::Setup;
pub use tagged_block::{
    BlockHeader, BlockKind, ExposureOnlyBlock, TaggedBlock, TaggedBlocks, TimeOnlyBlock,
};
