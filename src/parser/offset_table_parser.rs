//! Parser for the frame-offset table

use winnow::{binary::le_u64, combinator::repeat};

use super::cursor::ByteCursor;
use crate::error::Result;
use crate::types::header::FileHeader;
use crate::types::offset_table::FrameOffsetTable;

/// Reads one u64 offset per image at `OffImageOffsets`.
///
/// The whole table is read whatever frame range is wanted; it is small and
/// any entry may be needed.
pub fn parse_offset_table(
    cursor: &mut ByteCursor<'_>,
    header: &FileHeader,
) -> Result<FrameOffsetTable> {
    let frame_count = header.image_count as usize;
    cursor.seek(header.off_image_offsets as usize)?;
    let offsets: Vec<u64> = cursor.decode(frame_count * 8, repeat(frame_count, le_u64))?;
    Ok(FrameOffsetTable::new(offsets))
}
