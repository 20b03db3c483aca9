//! Types for frame records and decoded pixel data

use std::ops::Range;

use bon::Builder;
use ndarray::{Array3, ArrayView2, Axis};

/// Sizes read from the variable-length annotation in front of each frame:
/// - 4 bytes: annotation size, both size fields included
/// - `annotation_size - 8` bytes: annotation payload (discarded)
/// - 4 bytes: pixel payload size in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct FrameAnnotation {
    pub annotation_size: u32,
    pub image_size: u32,
}

/// One decoded frame, `(im_width, im_height)`
pub type PixelFrame<'a> = ArrayView2<'a, f64>;

/// Decoded frames of a contiguous range of the recording.
///
/// `pixels` has shape `(frames, im_width, im_height)`; stack index `k` holds
/// file frame `frames.start + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStack {
    pub pixels: Array3<f64>,
    pub frames: Range<usize>,
}

impl FrameStack {
    pub fn len(&self) -> usize {
        self.pixels.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> usize {
        self.pixels.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.pixels.len_of(Axis(2))
    }

    /// Frame at stack index `k`
    pub fn frame(&self, k: usize) -> Option<PixelFrame<'_>> {
        (k < self.len()).then(|| self.pixels.index_axis(Axis(0), k))
    }

    /// Frame by its index in the file
    pub fn file_frame(&self, frame: usize) -> Option<PixelFrame<'_>> {
        if !self.frames.contains(&frame) {
            return None;
        }
        self.frame(frame - self.frames.start)
    }

    pub fn iter(&self) -> impl Iterator<Item = PixelFrame<'_>> {
        self.pixels.axis_iter(Axis(0))
    }
}

/// Progress notification sent while frames are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameProgress {
    pub decoded: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_file_frame_is_offset_by_range_start() {
        let pixels = Array3::from_shape_vec((2, 1, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let stack = FrameStack {
            pixels,
            frames: 5..7,
        };
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.file_frame(6).unwrap(), array![[3.0, 4.0]]);
        assert!(stack.file_frame(4).is_none());
        assert!(stack.file_frame(7).is_none());
        assert!(stack.frame(2).is_none());
    }
}
