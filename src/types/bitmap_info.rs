use bon::Builder;
use serde::Serialize;

use crate::error::{CineError, Result};

/// The 40-byte BITMAPINFOHEADER following the file header.
///
/// `bi_bit_count` is the storage depth (8 or 16) and may differ from the
/// recorded depth in [`Setup::real_bpp`](crate::types::Setup::real_bpp).
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct BitmapInfoHeader {
    pub bi_size: u32,
    pub bi_width: i32,
    pub bi_height: i32,
    pub bi_planes: u16,
    pub bi_bit_count: u16,
    pub bi_compression: u32,
    pub bi_size_image: u32,
    pub bi_x_pels_per_meter: i32,
    pub bi_y_pels_per_meter: i32,
    pub bi_clr_used: u32,
    pub bi_clr_important: u32,
}

impl BitmapInfoHeader {
    pub fn sample_depth(&self) -> Result<SampleDepth> {
        SampleDepth::try_from(self.bi_bit_count)
    }
}

/// Storage width of one pixel sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    Eight,
    Sixteen,
}

impl SampleDepth {
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
        }
    }
}

impl TryFrom<u16> for SampleDepth {
    type Error = CineError;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            other => Err(CineError::UnsupportedBitDepth(other)),
        }
    }
}
