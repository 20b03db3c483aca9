//! Error and warning types for cine decoding

use thiserror::Error;

/// Result type for cine decoding
pub type Result<T> = std::result::Result<T, CineError>;

/// Fatal decode errors. Any of these aborts the decode and no partial
/// container is returned.
#[derive(Error, Debug)]
pub enum CineError {
    /// The first two bytes are not the `CI` file marker
    #[error("not a cine container: expected file type \"CI\", found {found:?}")]
    BadMagic { found: [u8; 2] },

    /// A read asked for more bytes than the stream holds
    #[error("truncated stream at offset {offset}: requested {requested} bytes, {available} available")]
    TruncatedStream {
        offset: usize,
        requested: usize,
        available: usize,
    },

    /// An absolute seek past the end of the stream
    #[error("seek to offset {offset} is past the end of the stream ({len} bytes)")]
    SeekOutOfBounds { offset: usize, len: usize },

    /// A fixed-width record could not be unpacked from a slice of the right length
    #[error("malformed record at offset {offset}: {reason}")]
    Layout { offset: usize, reason: String },

    /// Tagged-block type code with no decoder
    #[error("unsupported tagged-block type {code}{} at offset {offset}", .name.map(|n| format!(" ({n})")).unwrap_or_default())]
    UnsupportedBlockType {
        code: u16,
        name: Option<&'static str>,
        offset: usize,
    },

    /// Tagged-block header declaring fewer bytes than the header itself
    #[error("malformed tagged block at offset {offset}: block size {block_size} is smaller than its 8-byte header")]
    MalformedBlock { offset: usize, block_size: u32 },

    /// The tagged blocks do not tile `[tag_start, OffImageOffsets)` exactly
    #[error("tagged-block region [{start}, {end}) is inconsistent at offset {offset}: {reason}")]
    TaggedRegion {
        start: usize,
        end: usize,
        offset: usize,
        reason: &'static str,
    },

    /// Pixel bit depth other than 8 or 16
    #[error("unsupported bit depth {0}: only 8 and 16 bit samples can be decoded")]
    UnsupportedBitDepth(u16),

    /// Frame annotation size smaller than its own size fields
    #[error("malformed annotation for frame {frame} at offset {offset}: size {annotation_size} < 8")]
    MalformedAnnotation {
        frame: usize,
        offset: usize,
        annotation_size: u32,
    },

    /// Declared pixel payload does not match the frame geometry
    #[error("frame {frame}: pixel payload is {actual} bytes, geometry requires {expected}")]
    PixelPayloadMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// Requested frame range does not fit the available frames
    #[error("frame range {lo}..{hi} is invalid for {available} frames")]
    FrameRange { lo: usize, hi: usize, available: usize },

    /// Flattened field view could not be built
    #[error("failed to build flat field view: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal findings that suggest the file was written by a format version
/// whose setup layout differs from the one decoded here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralWarning {
    #[error("setup marker is {found:?}, expected \"ST\"; file format may have changed or file may be damaged")]
    SetupMarkMismatch { found: [u8; 2] },

    #[error("setup declares {declared_read_length} bytes of retained fields, layout decodes {layout_length}")]
    SetupLengthMismatch {
        declared_read_length: i64,
        layout_length: usize,
    },
}
