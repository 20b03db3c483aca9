//! Decode options

use std::ops::Range;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{CineError, Result};

/// Controls which stages of the decode run.
///
/// Built with [`DecodeOptions::builder`] or deserialized from JSON; missing
/// JSON keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Leave the tagged-block collection empty without reading it
    #[builder(default)]
    pub skip_tagged_blocks: bool,
    /// Do not read the frame-offset table or any frame
    #[builder(default)]
    pub skip_images: bool,
    /// Half-open `(lo, hi)` range of frames, applied to images and to the
    /// per-frame tagged-block sequences alike
    pub frame_range: Option<(usize, usize)>,
    /// Also expose every retained field under its own name
    #[builder(default = true)]
    pub expose_flat_fields: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DecodeOptions {
    /// Headers and setup only
    pub fn headers_only() -> Self {
        Self::builder()
            .skip_tagged_blocks(true)
            .skip_images(true)
            .build()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The frames to decode out of `image_count`; the full recording when no
    /// range was requested.
    pub fn resolve_frame_range(&self, image_count: usize) -> Result<Range<usize>> {
        match self.frame_range {
            None => Ok(0..image_count),
            Some((lo, hi)) if lo <= hi && hi <= image_count => Ok(lo..hi),
            Some((lo, hi)) => Err(CineError::FrameRange {
                lo,
                hi,
                available: image_count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_decode_everything() {
        let options = DecodeOptions::default();
        assert!(!options.skip_tagged_blocks);
        assert!(!options.skip_images);
        assert!(options.expose_flat_fields);
        assert_eq!(options.resolve_frame_range(10).unwrap(), 0..10);
    }

    #[test]
    fn test_json_fills_missing_keys_with_defaults() -> Result<()> {
        let options = DecodeOptions::from_json(r#"{"skip_images": true, "frame_range": [2, 5]}"#)?;
        assert_eq!(
            options,
            DecodeOptions::builder()
                .skip_images(true)
                .frame_range((2, 5))
                .build()
        );
        Ok(())
    }

    #[test]
    fn test_frame_range_must_fit_recording() {
        let options = DecodeOptions::builder().frame_range((3, 2)).build();
        assert!(matches!(
            options.resolve_frame_range(10),
            Err(CineError::FrameRange { lo: 3, hi: 2, .. })
        ));
        let options = DecodeOptions::builder().frame_range((0, 11)).build();
        assert!(options.resolve_frame_range(10).is_err());
        let options = DecodeOptions::builder().frame_range((10, 10)).build();
        assert_eq!(options.resolve_frame_range(10).unwrap(), 10..10);
    }
}
