//! GPT (GUID Partition Table) entry decoding
//!
//! This decoder is a deliberate approximation of the real format: it skips
//! a fixed 0x400 bytes to reach the entry array and reads a caller-chosen
//! number of 128-byte entries, four by default. The header signature,
//! revision, CRCs, and the header-declared entry count are never examined.
//! That is enough for boot-sector triage of well-formed images; it is not
//! general GPT support.

use std::io::SeekFrom;

use bootinfo_core::{Error, ReadSeek, Result};

/// A decoded 128-byte GPT partition entry
///
/// Only the type GUID and the LBA range are kept. The unique partition
/// GUID and the attributes/name region are read past and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GptPartitionEntry {
    /// Partition type GUID, in raw on-disk byte order
    pub type_guid: [u8; 16],
    /// First LBA (inclusive)
    pub start_lba: u64,
    /// Last LBA (inclusive)
    pub end_lba: u64,
}

impl GptPartitionEntry {
    /// Size of a partition entry in bytes
    pub const SIZE: usize = 128;

    /// Decode an entry from its on-disk 128 bytes
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let mut type_guid = [0u8; 16];
        type_guid.copy_from_slice(&bytes[0..16]);

        // Bytes 16..32 hold the unique partition GUID, discarded
        let start_lba = u64::from_le_bytes([
            bytes[32], bytes[33], bytes[34], bytes[35],
            bytes[36], bytes[37], bytes[38], bytes[39],
        ]);
        let end_lba = u64::from_le_bytes([
            bytes[40], bytes[41], bytes[42], bytes[43],
            bytes[44], bytes[45], bytes[46], bytes[47],
        ]);
        // Bytes 48..128 hold attributes and the UTF-16 name, discarded

        Self {
            type_guid,
            start_lba,
            end_lba,
        }
    }

    /// Render the type GUID as 32 uppercase hex characters in raw byte
    /// order, without canonical GUID grouping
    pub fn type_guid_hex(&self) -> String {
        hex::encode_upper(self.type_guid)
    }
}

/// GPT partition entry array
#[derive(Debug, Clone)]
pub struct GptTable {
    entries: Vec<GptPartitionEntry>,
}

impl GptTable {
    /// Fixed byte offset of the entry array (header skip, unverified)
    pub const ENTRY_ARRAY_OFFSET: u64 = 0x400;

    /// Default number of entries to decode
    pub const DEFAULT_NUM_PARTITIONS: usize = 4;

    /// Parse the first four partition entries from a stream
    pub fn parse(stream: &mut dyn ReadSeek) -> Result<Self> {
        Self::parse_with_count(stream, Self::DEFAULT_NUM_PARTITIONS)
    }

    /// Parse a chosen number of partition entries from a stream
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedImage`] if fewer than 128 bytes remain
    /// for any entry; partial entries are never returned.
    pub fn parse_with_count(stream: &mut dyn ReadSeek, count: usize) -> Result<Self> {
        let image_len = stream.seek(SeekFrom::End(0))?;

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let offset = Self::ENTRY_ARRAY_OFFSET + (i * GptPartitionEntry::SIZE) as u64;
            let available = image_len.saturating_sub(offset);
            if available < GptPartitionEntry::SIZE as u64 {
                return Err(Error::truncated(offset, GptPartitionEntry::SIZE, available));
            }

            stream.seek(SeekFrom::Start(offset))?;
            let mut raw = [0u8; GptPartitionEntry::SIZE];
            stream.read_exact(&mut raw)?;
            entries.push(GptPartitionEntry::from_bytes(&raw));
        }

        tracing::debug!(entries = entries.len(), "decoded GPT entry array");
        Ok(Self { entries })
    }

    /// Decoded entries, in on-disk order
    pub fn entries(&self) -> &[GptPartitionEntry] {
        &self.entries
    }
}
