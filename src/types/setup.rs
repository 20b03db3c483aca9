//! The retained subset of the SETUP structure

use bon::Builder;
use serde::Serialize;

/// Recording settings. Only fields that stay meaningful across camera
/// generations are kept; deprecated, reserved and viewer-only fields are
/// skipped by position while decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct Setup {
    /// Marker as read; `ST` for a well-formed structure
    #[serde(skip)]
    pub mark: [u8; 2],
    /// Length of the whole structure, deprecated leading bytes included
    pub declared_length: u16,

    pub im_width: u16,
    pub im_height: u16,
    pub serial: u32,
    pub frame_rate: u32,
    pub post_trigger: u32,
    pub camera_version: u32,
    pub firmware_version: u32,
    pub software_version: u32,
    /// Recorded bit depth; samples are stored widened to 8 or 16 bits
    pub real_bpp: u32,

    // Current session calibration
    pub ci_calib: u32,
    pub calib_width: u32,
    pub calib_height: u32,
    pub calib_rate: u32,
    pub calib_exp: u32,
    pub calib_edr: u32,
    pub calib_temp: u32,

    pub sensor: u32,
    pub shutter_ns: u32,
    pub edr_shutter_ns: u32,
    pub frame_delay_ns: u32,

    pub description: String,
}

impl Setup {
    pub fn mark_str(&self) -> String {
        String::from_utf8_lossy(&self.mark).into_owned()
    }

    /// Number of samples in one frame
    pub fn pixels_per_frame(&self) -> usize {
        self.im_width as usize * self.im_height as usize
    }
}
