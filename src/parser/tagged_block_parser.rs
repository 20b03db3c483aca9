//! Parser for the tagged blocks between the setup and the frame-offset table

use std::ops::Range;

use ndarray::Array1;
use tracing::debug;
use winnow::{
    Parser,
    binary::{le_u16, le_u32},
    combinator::repeat,
    error::ContextError,
};

use super::cursor::ByteCursor;
use crate::error::{CineError, Result};
use crate::types::header::Time64;
use crate::types::tagged_block::{
    BlockHeader, BlockKind, ExposureOnlyBlock, TaggedBlock, TaggedBlocks, TimeOnlyBlock,
    vendor_block_name,
};
use crate::utils::{BLOCK_HEADER_LENGTH, TICKS_PER_SECOND};

/// Parses an 8-byte block header: u32 size, u16 type, u16 more-blocks flag
pub fn block_header(input: &mut &[u8]) -> std::result::Result<BlockHeader, ContextError> {
    (le_u32, le_u16, le_u16)
        .map(|(block_size, block_type, more_blocks)| {
            BlockHeader::builder()
                .block_size(block_size)
                .block_type(block_type)
                .more_blocks(more_blocks)
                .build()
        })
        .parse_next(input)
}

/// Parses a `Time64` entry, fraction first
pub fn time64(input: &mut &[u8]) -> std::result::Result<Time64, ContextError> {
    (le_u32, le_u32)
        .map(|(fraction, seconds)| Time64::new(fraction, seconds))
        .parse_next(input)
}

/// Restricts a per-frame sequence to the requested frames
fn select_frames<T: Clone>(values: Vec<T>, frames: Option<&Range<usize>>) -> Result<Vec<T>> {
    match frames {
        None => Ok(values),
        Some(range) if range.start <= range.end && range.end <= values.len() => {
            Ok(values[range.clone()].to_vec())
        }
        Some(range) => Err(CineError::FrameRange {
            lo: range.start,
            hi: range.end,
            available: values.len(),
        }),
    }
}

/// Decodes the payload of one block whose header has already been read.
fn decode_block(
    cursor: &mut ByteCursor<'_>,
    kind: BlockKind,
    header: BlockHeader,
    trigger: Time64,
    frames: Option<&Range<usize>>,
) -> Result<TaggedBlock> {
    let count = header.data_length() / kind.entry_size();
    let block = match kind {
        BlockKind::TimeOnly => {
            let times: Vec<Time64> =
                cursor.decode(count * kind.entry_size(), repeat(count, time64))?;
            let times = select_frames(times, frames)?;
            let time_float = times.iter().map(|t| t.seconds_since(trigger)).collect();
            TaggedBlock::TimeOnly(TimeOnlyBlock {
                header,
                times,
                time_float,
            })
        }
        BlockKind::ExposureOnly => {
            let fractions: Vec<u32> =
                cursor.decode(count * kind.entry_size(), repeat(count, le_u32))?;
            let fractions = select_frames(fractions, frames)?;
            let exposure_float: Array1<f64> = fractions
                .iter()
                .map(|&f| f64::from(f) / TICKS_PER_SECOND)
                .collect();
            TaggedBlock::ExposureOnly(ExposureOnlyBlock {
                header,
                fractions,
                exposure_float,
            })
        }
    };
    // bytes that do not make up a whole entry
    cursor.skip(header.data_length() - count * kind.entry_size())?;
    Ok(block)
}

/// Reads tagged blocks from `tag_start` up to `region_end` (the frame-offset
/// table). The blocks must tile the region exactly.
///
/// `frames`, when given, selects the per-frame entries kept from each block.
pub fn parse_tagged_blocks(
    cursor: &mut ByteCursor<'_>,
    tag_start: usize,
    region_end: usize,
    trigger: Time64,
    frames: Option<&Range<usize>>,
) -> Result<TaggedBlocks> {
    let region_error = |offset: usize, reason: &'static str| CineError::TaggedRegion {
        start: tag_start,
        end: region_end,
        offset,
        reason,
    };
    if tag_start > region_end {
        return Err(region_error(tag_start, "setup ends past the frame-offset table"));
    }

    cursor.seek(tag_start)?;
    let mut blocks = TaggedBlocks::default();
    let mut tagged_length = 0usize;

    while tag_start + tagged_length < region_end {
        let offset = tag_start + tagged_length;
        if region_end - offset < BLOCK_HEADER_LENGTH {
            return Err(region_error(offset, "trailing bytes are too short for a block header"));
        }

        let header = cursor.decode(BLOCK_HEADER_LENGTH, block_header)?;
        let kind = BlockKind::from_code(header.block_type).ok_or_else(|| {
            CineError::UnsupportedBlockType {
                code: header.block_type,
                name: vendor_block_name(header.block_type),
                offset,
            }
        })?;

        let block_size = header.block_size as usize;
        if block_size < BLOCK_HEADER_LENGTH {
            return Err(CineError::MalformedBlock {
                offset,
                block_size: header.block_size,
            });
        }
        if block_size > region_end - offset {
            return Err(region_error(offset, "block runs past the frame-offset table"));
        }

        let block = decode_block(cursor, kind, header, trigger, frames)?;
        debug!(
            offset,
            block_size,
            kind = ?kind,
            more_blocks = header.more_blocks,
            "decoded tagged block"
        );
        blocks.insert(block);
        tagged_length += block_size;
    }

    Ok(blocks)
}
