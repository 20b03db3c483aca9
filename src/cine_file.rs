use std::ops::Range;
use std::path::Path;

use itertools::Itertools;
use ndarray::ArrayView1;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, StructuralWarning};
use crate::options::DecodeOptions;
use crate::parser::{
    ByteCursor, decode_frames, parse_bitmap_info_header, parse_file_header, parse_offset_table,
    parse_setup, parse_tagged_blocks,
};
use crate::types::{
    BitmapInfoHeader, FileHeader, FlatFields, FrameOffsetTable, FrameProgress, FrameStack,
    PixelFrame, Setup, TaggedBlocks,
};
use crate::utils::file_utils::read_binary_file_mmap;
use crate::utils::tagged_block_start;

/// A decoded cine recording: the three fixed records, any tagged blocks and
/// the requested frames.
#[derive(Debug, Clone)]
pub struct CineFile {
    pub header: FileHeader,
    pub bitmap_info: BitmapInfoHeader,
    pub setup: Setup,
    pub tagged_blocks: TaggedBlocks,
    /// `None` when images were skipped
    pub frame_offsets: Option<FrameOffsetTable>,
    /// `None` when images were skipped
    pub images: Option<FrameStack>,
    /// Frames selected by the options, in file frame indices
    pub frame_range: Range<usize>,
    /// Non-fatal layout findings, in the order they were met
    pub warnings: Vec<StructuralWarning>,
    flat: Option<FlatFields>,
}

impl CineFile {
    /// Memory-map and decode a cine file
    pub fn open(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
        Self::open_with_progress(path, options, |_| {})
    }

    pub fn open_with_progress<F>(
        path: impl AsRef<Path>,
        options: &DecodeOptions,
        progress: F,
    ) -> Result<Self>
    where
        F: FnMut(FrameProgress),
    {
        let path = path.as_ref();
        info!(path = %path.display(), "reading cine file");
        let mmap_data = read_binary_file_mmap(path)?;
        Self::decode_with_progress(&mmap_data, options, progress)
    }

    /// Decode a cine container held in memory
    pub fn from_bytes(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        Self::decode_with_progress(data, options, |_| {})
    }

    /// Decode only the fixed records and the setup
    pub fn header_only(data: &[u8]) -> Result<Self> {
        Self::from_bytes(data, &DecodeOptions::headers_only())
    }

    /// Decode, reporting frame progress to `progress`.
    ///
    /// Stages run in file order: file header, bitmap-info header, setup,
    /// tagged blocks, frame-offset table, frames. Later stages locate their
    /// data from lengths and offsets declared by earlier ones.
    pub fn decode_with_progress<F>(
        data: &[u8],
        options: &DecodeOptions,
        progress: F,
    ) -> Result<Self>
    where
        F: FnMut(FrameProgress),
    {
        let mut cursor = ByteCursor::new(data);
        let mut warnings = Vec::new();

        let header = parse_file_header(&mut cursor)?;
        let bitmap_info = parse_bitmap_info_header(&mut cursor)?;
        let setup = parse_setup(&mut cursor, &mut warnings)?;
        debug!(
            version = header.version,
            image_count = header.image_count,
            bit_count = bitmap_info.bi_bit_count,
            "decoded headers"
        );

        let frame_range = options.resolve_frame_range(header.image_count as usize)?;

        let tagged_blocks = if options.skip_tagged_blocks {
            TaggedBlocks::default()
        } else {
            parse_tagged_blocks(
                &mut cursor,
                tagged_block_start(&setup),
                header.off_image_offsets as usize,
                header.trigger_time,
                options.frame_range.map(|_| &frame_range),
            )?
        };

        let (frame_offsets, images) = if options.skip_images {
            (None, None)
        } else {
            let depth = bitmap_info.sample_depth()?;
            let table = parse_offset_table(&mut cursor, &header)?;
            let stack = decode_frames(
                &mut cursor,
                &setup,
                depth,
                &table,
                frame_range.clone(),
                progress,
            )?;
            (Some(table), Some(stack))
        };

        let flat = if options.expose_flat_fields {
            Some(FlatFields::from_records(
                &header,
                &bitmap_info,
                &setup,
                &tagged_blocks,
            )?)
        } else {
            None
        };

        Ok(Self {
            header,
            bitmap_info,
            setup,
            tagged_blocks,
            frame_offsets,
            images,
            frame_range,
            warnings,
            flat,
        })
    }

    /// Frame times in seconds relative to the trigger, for the selected frames
    pub fn time_float(&self) -> Option<ArrayView1<'_, f64>> {
        self.tagged_blocks
            .time_only()
            .map(|block| block.time_float.view())
    }

    /// Exposure of each selected frame in seconds
    pub fn exposure_float(&self) -> Option<ArrayView1<'_, f64>> {
        self.tagged_blocks
            .exposure_only()
            .map(|block| block.exposure_float.view())
    }

    /// Number of decoded frames
    pub fn frame_count(&self) -> usize {
        self.images.as_ref().map_or(0, FrameStack::len)
    }

    /// Decoded frame at stack index `k` (file frame `frame_range.start + k`)
    pub fn frame(&self, k: usize) -> Option<PixelFrame<'_>> {
        self.images.as_ref()?.frame(k)
    }

    /// A retained field by name, when flat fields were requested
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.flat.as_ref()?.get(name)
    }

    pub fn flat_fields(&self) -> Option<&FlatFields> {
        self.flat.as_ref()
    }

    /// Get a summary of the file contents
    pub fn summary(&self) -> String {
        let mut result = String::new();

        result.push_str("Header:\n");
        result.push_str(&format!(
            "  Frame size: {}x{} @ {} bit (recorded {} bit)\n",
            self.setup.im_width,
            self.setup.im_height,
            self.bitmap_info.bi_bit_count,
            self.setup.real_bpp
        ));
        result.push_str(&format!(
            "  Images: {} (first image {})\n",
            self.header.image_count, self.header.first_image_no
        ));
        result.push_str(&format!(
            "  Trigger: {}s + {}/2^32\n",
            self.header.trigger_time.seconds, self.header.trigger_time.fraction
        ));

        result.push_str("\nCamera:\n");
        result.push_str(&format!("  Serial: {}\n", self.setup.serial));
        result.push_str(&format!("  Frame rate: {} fps\n", self.setup.frame_rate));
        result.push_str(&format!("  Shutter: {} ns\n", self.setup.shutter_ns));
        if !self.setup.description.is_empty() {
            result.push_str(&format!("  Description: {}\n", self.setup.description));
        }

        if !self.tagged_blocks.is_empty() {
            result.push_str(&format!(
                "\nTagged blocks: {}\n",
                self.tagged_blocks
                    .iter()
                    .map(|block| format!("{:?}", block.kind()))
                    .join(", ")
            ));
        }

        if let Some(images) = &self.images {
            result.push_str(&format!(
                "\nDecoded frames {}..{} ({})\n",
                images.frames.start,
                images.frames.end,
                images.len()
            ));
        }

        if !self.warnings.is_empty() {
            result.push_str(&format!(
                "\nWarnings:\n  {}\n",
                self.warnings.iter().join("\n  ")
            ));
        }

        result
    }
}
