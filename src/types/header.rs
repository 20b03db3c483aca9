use bon::Builder;
use serde::Serialize;

use crate::utils::TICKS_PER_SECOND;

/// Expected value of [`FileHeader::file_type`]
pub const CINE_FILE_TYPE: &[u8; 2] = b"CI";

/// 32.32 fixed-point timestamp: `seconds` whole seconds plus
/// `fraction / 2^32` of a second. Stored fraction first on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Time64 {
    pub fraction: u32,
    pub seconds: u32,
}

impl Time64 {
    pub fn new(fraction: u32, seconds: u32) -> Self {
        Self { fraction, seconds }
    }

    /// Seconds elapsed since `origin`.
    ///
    /// The difference is taken in 128-bit fixed point so large second counts
    /// do not swamp the sub-second part; the result is rounded to `f64` once.
    pub fn seconds_since(self, origin: Time64) -> f64 {
        let whole = i128::from(self.seconds) - i128::from(origin.seconds);
        let frac = i128::from(self.fraction) - i128::from(origin.fraction);
        let ticks = whole * (1i128 << 32) + frac;
        ticks as f64 / TICKS_PER_SECOND
    }
}

/// The 44-byte CINEFILEHEADER at the start of every file.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct FileHeader {
    pub file_type: String,
    pub header_size: u16,
    pub compression: u16,
    pub version: u16,
    pub first_movie_image: i32,
    pub total_image_count: u32,
    pub first_image_no: i32,
    pub image_count: u32,
    pub off_image_header: u32,
    pub off_setup: u32,
    pub off_image_offsets: u32,
    pub trigger_time: Time64,
}
