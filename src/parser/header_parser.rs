use winnow::{
    Parser,
    binary::{le_i32, le_u16, le_u32},
    error::ContextError,
    token::take,
};

use super::cursor::ByteCursor;
use crate::error::{CineError, Result};
use crate::types::bitmap_info::BitmapInfoHeader;
use crate::types::header::{CINE_FILE_TYPE, FileHeader, Time64};
use crate::utils::{BITMAP_INFO_LENGTH, FILE_HEADER_LENGTH};

/// Parses the 44-byte file header fields.
///
/// The header layout is as follows:
/// - 2 bytes: file type (`CI`)
/// - 3 little‑endian u16 values: header size, compression, version
/// - i32 first movie image, u32 total image count, i32 first image number
/// - 4 u32 values: image count, offsets of the image header, setup and
///   frame-offset table
/// - 2 u32 values: trigger time fraction, trigger time seconds
pub fn file_header_fields(input: &mut &[u8]) -> std::result::Result<FileHeader, ContextError> {
    let file_type = take(2usize).parse_next(input)?;
    let header_size = le_u16.parse_next(input)?;
    let compression = le_u16.parse_next(input)?;
    let version = le_u16.parse_next(input)?;
    let first_movie_image = le_i32.parse_next(input)?;
    let total_image_count = le_u32.parse_next(input)?;
    let first_image_no = le_i32.parse_next(input)?;
    let image_count = le_u32.parse_next(input)?;
    let off_image_header = le_u32.parse_next(input)?;
    let off_setup = le_u32.parse_next(input)?;
    let off_image_offsets = le_u32.parse_next(input)?;
    let trigger_fraction = le_u32.parse_next(input)?;
    let trigger_seconds = le_u32.parse_next(input)?;

    Ok(FileHeader::builder()
        .file_type(String::from_utf8_lossy(file_type).into_owned())
        .header_size(header_size)
        .compression(compression)
        .version(version)
        .first_movie_image(first_movie_image)
        .total_image_count(total_image_count)
        .first_image_no(first_image_no)
        .image_count(image_count)
        .off_image_header(off_image_header)
        .off_setup(off_setup)
        .off_image_offsets(off_image_offsets)
        .trigger_time(Time64::new(trigger_fraction, trigger_seconds))
        .build())
}

/// Parses the 40-byte bitmap-info header fields (`<I 2l 2H 2I 2l 2I`).
pub fn bitmap_info_fields(
    input: &mut &[u8],
) -> std::result::Result<BitmapInfoHeader, ContextError> {
    Ok(BitmapInfoHeader::builder()
        .bi_size(le_u32.parse_next(input)?)
        .bi_width(le_i32.parse_next(input)?)
        .bi_height(le_i32.parse_next(input)?)
        .bi_planes(le_u16.parse_next(input)?)
        .bi_bit_count(le_u16.parse_next(input)?)
        .bi_compression(le_u32.parse_next(input)?)
        .bi_size_image(le_u32.parse_next(input)?)
        .bi_x_pels_per_meter(le_i32.parse_next(input)?)
        .bi_y_pels_per_meter(le_i32.parse_next(input)?)
        .bi_clr_used(le_u32.parse_next(input)?)
        .bi_clr_important(le_u32.parse_next(input)?)
        .build())
}

/// Checks the file type marker, then decodes the file header from offset 0.
///
/// Only the two marker bytes are read when the marker is wrong.
pub fn parse_file_header(cursor: &mut ByteCursor<'_>) -> Result<FileHeader> {
    cursor.seek(0)?;
    let marker = cursor.read(2)?;
    if marker != CINE_FILE_TYPE {
        return Err(CineError::BadMagic {
            found: [marker[0], marker[1]],
        });
    }
    cursor.seek(0)?;
    cursor.decode(FILE_HEADER_LENGTH, file_header_fields)
}

/// Decodes the bitmap-info header that directly follows the file header.
pub fn parse_bitmap_info_header(cursor: &mut ByteCursor<'_>) -> Result<BitmapInfoHeader> {
    cursor.seek(FILE_HEADER_LENGTH)?;
    cursor.decode(BITMAP_INFO_LENGTH, bitmap_info_fields)
}
