use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Memory-map a cine file read-only.
///
/// Recordings routinely run to many gigabytes; mapping lets the frame table
/// address any frame without pulling the preceding ones into RAM.
pub fn read_binary_file_mmap(path: impl AsRef<Path>) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: the file is not modified while the mmap is active
    unsafe { Mmap::map(&file) }
}
