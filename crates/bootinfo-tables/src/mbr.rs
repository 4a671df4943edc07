//! MBR (Master Boot Record) partition table decoding

use std::io::SeekFrom;

use bootinfo_core::{Error, ReadSeek, Result};

/// A single 16-byte MBR partition entry
///
/// Multi-byte integers keep their on-disk little-endian interpretation.
/// The CHS triples are carried opaquely; LBA fields supersede them on any
/// disk this tool is pointed at.
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0x0     1     Boot indicator
/// 0x1     3     Start CHS (opaque)
/// 0x4     1     Partition type code
/// 0x5     3     End CHS (opaque)
/// 0x8     4     Start LBA (u32 LE)
/// 0xC     4     Sector count (u32 LE)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MbrPartitionEntry {
    pub boot_indicator: u8,
    pub start_chs: [u8; 3],
    pub partition_type: u8,
    pub end_chs: [u8; 3],
    pub start_lba: u32,
    pub sector_count: u32,
}

impl MbrPartitionEntry {
    /// Size of a partition entry in bytes
    pub const SIZE: usize = 16;

    /// Decode an entry from its on-disk 16 bytes
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            boot_indicator: bytes[0],
            start_chs: [bytes[1], bytes[2], bytes[3]],
            partition_type: bytes[4],
            end_chs: [bytes[5], bytes[6], bytes[7]],
            start_lba: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            sector_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        }
    }

    /// Re-encode the entry; reproduces the source bytes exactly
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = self.boot_indicator;
        out[1..4].copy_from_slice(&self.start_chs);
        out[4] = self.partition_type;
        out[5..8].copy_from_slice(&self.end_chs);
        out[8..12].copy_from_slice(&self.start_lba.to_le_bytes());
        out[12..16].copy_from_slice(&self.sector_count.to_le_bytes());
        out
    }
}

/// MBR partition table
///
/// The table always holds exactly four slots, in on-disk order, including
/// all-zero "unused" ones. Nothing is validated: no boot signature check
/// and no filtering, so callers see the table exactly as stored.
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0x000   446   Bootstrap code
/// 0x1BE   16    Partition entry 1
/// 0x1CE   16    Partition entry 2
/// 0x1DE   16    Partition entry 3
/// 0x1EE   16    Partition entry 4
/// 0x1FE   2     Boot signature
/// ```
#[derive(Debug, Clone)]
pub struct MbrTable {
    entries: [MbrPartitionEntry; 4],
}

impl MbrTable {
    /// Absolute offset of the first partition entry
    pub const PARTITION_TABLE_OFFSET: u64 = 0x1BE;

    /// Number of partition entries in an MBR (a true format limit)
    pub const NUM_PARTITIONS: usize = 4;

    /// Parse an MBR partition table from a readable and seekable stream
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedImage`] if fewer than 16 bytes remain for
    /// any entry; partial entries are never returned.
    pub fn parse(stream: &mut dyn ReadSeek) -> Result<Self> {
        let image_len = stream.seek(SeekFrom::End(0))?;

        let mut entries = [MbrPartitionEntry::default(); Self::NUM_PARTITIONS];
        for (i, slot) in entries.iter_mut().enumerate() {
            let offset = Self::PARTITION_TABLE_OFFSET + (i * MbrPartitionEntry::SIZE) as u64;
            let available = image_len.saturating_sub(offset);
            if available < MbrPartitionEntry::SIZE as u64 {
                return Err(Error::truncated(offset, MbrPartitionEntry::SIZE, available));
            }

            stream.seek(SeekFrom::Start(offset))?;
            let mut raw = [0u8; MbrPartitionEntry::SIZE];
            stream.read_exact(&mut raw)?;
            *slot = MbrPartitionEntry::from_bytes(&raw);
        }

        tracing::debug!(entries = Self::NUM_PARTITIONS, "decoded MBR partition table");
        Ok(Self { entries })
    }

    /// All four partition slots, in on-disk order
    pub fn entries(&self) -> &[MbrPartitionEntry; 4] {
        &self.entries
    }
}

/// Length of the boot-record tail probe
pub const TAIL_LEN: usize = 16;

/// Read the 16 bytes preceding the end of a partition's first sector.
///
/// The probe offset is the literal byte offset `start_lba + 512 - 16`;
/// the LBA value is not scaled by the sector size.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] when the probe would run past the end of
/// the image; a short read is never returned.
pub fn boot_record_tail(
    stream: &mut dyn ReadSeek,
    entry: &MbrPartitionEntry,
) -> Result<[u8; TAIL_LEN]> {
    let offset = entry.start_lba as u64 + 512 - TAIL_LEN as u64;
    let image_len = stream.seek(SeekFrom::End(0))?;
    let available = image_len.saturating_sub(offset);
    if available < TAIL_LEN as u64 {
        return Err(Error::out_of_bounds(offset, TAIL_LEN, available));
    }

    stream.seek(SeekFrom::Start(offset))?;
    let mut tail = [0u8; TAIL_LEN];
    stream.read_exact(&mut tail)?;
    Ok(tail)
}
