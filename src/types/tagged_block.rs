//! Types for the tagged metadata blocks between the setup and the frame table

use std::collections::BTreeMap;

use bon::Builder;
use ndarray::Array1;
use serde::Serialize;

use super::header::Time64;

/// The 8-byte header in front of every tagged block:
/// - 4 bytes: block size, header included
/// - 2 bytes: block type code
/// - 2 bytes: 0 in the last block, 1 otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Builder)]
pub struct BlockHeader {
    pub block_size: u32,
    pub block_type: u16,
    pub more_blocks: u16,
}

impl BlockHeader {
    /// Bytes following the header
    pub fn data_length(&self) -> usize {
        (self.block_size as usize).saturating_sub(crate::utils::BLOCK_HEADER_LENGTH)
    }
}

/// Block types this crate can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BlockKind {
    TimeOnly,
    ExposureOnly,
}

impl BlockKind {
    pub const fn code(self) -> u16 {
        match self {
            Self::TimeOnly => 1002,
            Self::ExposureOnly => 1003,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1002 => Some(Self::TimeOnly),
            1003 => Some(Self::ExposureOnly),
            _ => None,
        }
    }

    /// Bytes per entry in the block payload
    pub const fn entry_size(self) -> usize {
        match self {
            Self::TimeOnly => 8,
            Self::ExposureOnly => 4,
        }
    }
}

/// Vendor names of block types that exist in the format but have no decoder
/// here. Used only to make errors readable.
pub fn vendor_block_name(code: u16) -> Option<&'static str> {
    match code {
        1000 => Some("AnalogData"),
        1001 => Some("ImageTime"),
        1004 => Some("RangeData"),
        1005 => Some("BinSig"),
        1006 => Some("AnaSig"),
        _ => None,
    }
}

/// Per-frame absolute timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOnlyBlock {
    pub header: BlockHeader,
    pub times: Vec<Time64>,
    /// Seconds relative to the trigger
    pub time_float: Array1<f64>,
}

/// Per-frame exposure durations as 0.32 fixed point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureOnlyBlock {
    pub header: BlockHeader,
    pub fractions: Vec<u32>,
    /// Exposure in seconds
    pub exposure_float: Array1<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TaggedBlock {
    TimeOnly(TimeOnlyBlock),
    ExposureOnly(ExposureOnlyBlock),
}

impl TaggedBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::TimeOnly(_) => BlockKind::TimeOnly,
            Self::ExposureOnly(_) => BlockKind::ExposureOnly,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        match self {
            Self::TimeOnly(block) => &block.header,
            Self::ExposureOnly(block) => &block.header,
        }
    }
}

/// Decoded tagged blocks keyed by kind. A kind that appears twice keeps the
/// later block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaggedBlocks {
    blocks: BTreeMap<BlockKind, TaggedBlock>,
}

impl TaggedBlocks {
    pub fn insert(&mut self, block: TaggedBlock) -> Option<TaggedBlock> {
        self.blocks.insert(block.kind(), block)
    }

    pub fn get(&self, kind: BlockKind) -> Option<&TaggedBlock> {
        self.blocks.get(&kind)
    }

    pub fn time_only(&self) -> Option<&TimeOnlyBlock> {
        match self.blocks.get(&BlockKind::TimeOnly)? {
            TaggedBlock::TimeOnly(block) => Some(block),
            _ => None,
        }
    }

    pub fn exposure_only(&self) -> Option<&ExposureOnlyBlock> {
        match self.blocks.get(&BlockKind::ExposureOnly)? {
            TaggedBlock::ExposureOnly(block) => Some(block),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaggedBlock> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
