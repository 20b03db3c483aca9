//! Cine container parsing functionality

pub mod cursor;
mod header_parser;
mod offset_table_parser;
pub mod pixel_parser;
mod setup_parser;
pub mod tagged_block_parser;

// Re-export the parsing functions
pub use cursor::ByteCursor;
pub use header_parser::{parse_bitmap_info_header, parse_file_header};
pub use offset_table_parser::parse_offset_table;
pub use pixel_parser::{decode_frames, parse_frame_annotation, widen_samples};
pub use setup_parser::{SETUP_MARK, parse_setup};
pub use tagged_block_parser::parse_tagged_blocks;
