//! Core traits for boot_info

use std::io::{Read, Seek};

/// Combined trait for Read + Seek
///
/// Every decoder takes its image through this seam, so tests can hand in
/// `Cursor` buffers and the CLI can hand in `File` streams.
pub trait ReadSeek: Read + Seek + Send {}

/// Blanket implementation for any type that implements Read + Seek
impl<T: Read + Seek + Send> ReadSeek for T {}
