//! Decoder for `.cine` high-speed camera recordings.
//!
//! A container is decoded in one pass: file header, bitmap-info header,
//! setup, tagged blocks, frame-offset table, frames.
//!
//! ```no_run
//! use cine::{CineFile, DecodeOptions};
//!
//! let options = DecodeOptions::builder().frame_range((0, 100)).build();
//! let cine = CineFile::open("shot.cine", &options)?;
//! println!("{}", cine.summary());
//! # Ok::<(), cine::CineError>(())
//! ```

pub mod cine_file;
pub mod error;
pub mod options;
pub mod parser;
pub mod types;
pub mod utils;

pub use cine_file::CineFile;
pub use error::{CineError, Result, StructuralWarning};
pub use options::DecodeOptions;
pub use parser::ByteCursor;
pub use types::{
    BitmapInfoHeader, BlockHeader, BlockKind, ExposureOnlyBlock, FileHeader, FlatFields,
    FrameAnnotation, FrameOffsetTable, FrameProgress, FrameStack, PixelFrame, SampleDepth, Setup,
    TaggedBlock, TaggedBlocks, Time64, TimeOnlyBlock,
};
