use ndarray::Array1;
use serde::Serialize;

/// Absolute file offsets of every frame record in the recording, indexed by
/// frame number relative to the first image in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOffsetTable {
    pub offsets: Array1<u64>,
}

impl FrameOffsetTable {
    pub fn new(offsets: Vec<u64>) -> Self {
        Self {
            offsets: Array1::from_vec(offsets),
        }
    }

    /// Get offset for a frame
    pub fn get_offset(&self, frame: usize) -> Option<u64> {
        self.offsets.get(frame).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
