use std::ops::Range;

use itertools::Itertools;
use ndarray::{Array3, ArrayViewMut2, Axis};
use tracing::debug;

use super::cursor::ByteCursor;
use crate::error::{CineError, Result};
use crate::types::bitmap_info::SampleDepth;
use crate::types::offset_table::FrameOffsetTable;
use crate::types::pixel_data::{FrameAnnotation, FrameProgress, FrameStack};
use crate::types::setup::Setup;
use crate::utils::{ANNOTATION_FIXED_LENGTH, PROGRESS_INTERVAL};

/// Parses the annotation in front of a frame record:
/// - 4 bytes: annotation size (u32, little‑endian), both size fields included
/// - `annotation_size - 8` bytes: annotation payload, skipped
/// - 4 bytes: pixel payload size (u32, little‑endian)
///
/// Leaves the cursor on the first pixel byte.
pub fn parse_frame_annotation(
    cursor: &mut ByteCursor<'_>,
    frame: usize,
) -> Result<FrameAnnotation> {
    let offset = cursor.position();
    let annotation_size = cursor.read_u32()?;
    if annotation_size < ANNOTATION_FIXED_LENGTH {
        return Err(CineError::MalformedAnnotation {
            frame,
            offset,
            annotation_size,
        });
    }
    cursor.skip((annotation_size - ANNOTATION_FIXED_LENGTH) as usize)?;
    let image_size = cursor.read_u32()?;
    Ok(FrameAnnotation::builder()
        .annotation_size(annotation_size)
        .image_size(image_size)
        .build())
}

/// Widens raw little-endian samples into `dest`, filling it in logical
/// (row-major) order.
pub fn widen_samples(payload: &[u8], depth: SampleDepth, mut dest: ArrayViewMut2<'_, f64>) {
    match depth {
        SampleDepth::Eight => dest
            .iter_mut()
            .zip(payload)
            .for_each(|(pixel, &sample)| *pixel = f64::from(sample)),
        SampleDepth::Sixteen => dest
            .iter_mut()
            .zip(payload.iter().tuples())
            .for_each(|(pixel, (&lo, &hi))| *pixel = f64::from(u16::from_le_bytes([lo, hi]))),
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_stack(pixels: &mut Array3<f64>, payloads: &[&[u8]], depth: SampleDepth) {
    for (frame, payload) in pixels.axis_iter_mut(Axis(0)).zip(payloads) {
        widen_samples(payload, depth, frame);
    }
}

#[cfg(feature = "parallel")]
fn fill_stack(pixels: &mut Array3<f64>, payloads: &[&[u8]], depth: SampleDepth) {
    use rayon::prelude::*;

    pixels
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(payloads.par_iter())
        .for_each(|(frame, payload)| widen_samples(payload, depth, frame));
}

/// Decodes the frames in `frames` (indices into `table`) into a stack.
///
/// Each frame is located through its own offset-table entry, so frames before
/// the range are never touched. When frame records are contiguous this reads
/// exactly what a single seek to the first frame followed by sequential reads
/// would; the two differ only for files whose records have gaps between them.
/// Records are read in ascending frame order; `progress` is called every
/// [`PROGRESS_INTERVAL`] frames and once at the end.
pub fn decode_frames<F>(
    cursor: &mut ByteCursor<'_>,
    setup: &Setup,
    depth: SampleDepth,
    table: &FrameOffsetTable,
    frames: Range<usize>,
    mut progress: F,
) -> Result<FrameStack>
where
    F: FnMut(FrameProgress),
{
    let (width, height) = (setup.im_width as usize, setup.im_height as usize);
    let expected = setup.pixels_per_frame() * depth.bytes_per_sample();
    let total = frames.len();

    let mut payloads = Vec::with_capacity(total);
    for frame in frames.clone() {
        let offset = table.get_offset(frame).ok_or_else(|| CineError::FrameRange {
            lo: frames.start,
            hi: frames.end,
            available: table.len(),
        })?;
        cursor.seek(usize::try_from(offset).unwrap_or(usize::MAX))?;

        let annotation = parse_frame_annotation(cursor, frame)?;
        if annotation.image_size as usize != expected {
            return Err(CineError::PixelPayloadMismatch {
                frame,
                expected,
                actual: annotation.image_size as usize,
            });
        }
        payloads.push(cursor.read(expected)?);

        let decoded = payloads.len();
        if decoded % PROGRESS_INTERVAL == 0 || decoded == total {
            debug!(decoded, total, "read frames");
            progress(FrameProgress { decoded, total });
        }
    }

    let mut pixels = Array3::zeros((total, width, height));
    fill_stack(&mut pixels, &payloads, depth);
    Ok(FrameStack { pixels, frames })
}
