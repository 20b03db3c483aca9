//! Utility functions for file handling and container layout arithmetic

pub mod file_utils;
pub mod misc;

pub use file_utils::*;
pub use misc::*;
