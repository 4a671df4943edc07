//! # bootinfo-tables
//!
//! Boot-sector partition table decoders for the boot_info analyzer:
//! - **MBR**: fixed 4-entry table at offset 0x1BE, plus the trailing
//!   16-byte boot-record probe per partition
//! - **GPT**: GUID-keyed entry array behind a fixed 0x400-byte skip
//!   (a documented approximation, not general GPT support)
//! - **typedb**: the external `code,description` reference table used to
//!   resolve MBR partition type codes
//!
//! ## Example
//!
//! ```rust,no_run
//! use bootinfo_tables::mbr::MbrTable;
//! use std::fs::File;
//!
//! let mut file = File::open("disk.raw").unwrap();
//! let table = MbrTable::parse(&mut file).unwrap();
//! for entry in table.entries() {
//!     println!("type 0x{:02x} at LBA {}", entry.partition_type, entry.start_lba);
//! }
//! ```

pub mod gpt;
pub mod mbr;
pub mod typedb;

pub use gpt::GptTable;
pub use mbr::MbrTable;
pub use typedb::PartitionTypeDb;
