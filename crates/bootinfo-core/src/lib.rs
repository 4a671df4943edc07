//! # bootinfo-core
//!
//! Core error handling and stream traits for the boot_info analyzer.
//!
//! This crate provides the foundational pieces shared by the decoders,
//! the fingerprinter, and the CLI:
//! - **Error / Result**: typed failures for truncated images, out-of-bounds
//!   probes, and malformed reference tables
//! - **ReadSeek**: the seam every decoder reads images through

pub mod error;
pub mod traits;

// Re-export commonly used items
pub use error::{Error, Result};
pub use traits::ReadSeek;
