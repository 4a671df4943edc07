//! Console report formatting
//!
//! Pure line formatters for the MBR listing, the boot-record tail dumps,
//! and the GPT per-partition blocks. Printing stays in `main` so these can
//! be exercised directly in tests.

use bootinfo_tables::gpt::GptTable;
use bootinfo_tables::mbr::MbrTable;
use bootinfo_tables::typedb::PartitionTypeDb;

/// MBR listing: one line per table slot, resolved against the reference
/// table. A code absent from the table still gets a line, so no slot is
/// silently dropped.
pub fn mbr_listing(table: &MbrTable, typedb: &PartitionTypeDb) -> Vec<String> {
    table
        .entries()
        .iter()
        .map(|entry| {
            let size = entry.sector_count as u64 * 512;
            match typedb.lookup(entry.partition_type) {
                Some(record) => format!(
                    "({}) {} , {}, {}",
                    record.code_str, record.description, entry.start_lba, size
                ),
                None => format!(
                    "({:02x}) unknown type , {}, {}",
                    entry.partition_type, entry.start_lba, size
                ),
            }
        })
        .collect()
}

/// Space-separated two-digit lowercase hex
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// GPT report: a fixed block of lines per decoded entry, 1-based
pub fn gpt_report(table: &GptTable) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in table.entries().iter().enumerate() {
        lines.push(format!("Partition number: {}", i + 1));
        lines.push(String::new());
        lines.push(format!("Partition Type GUID: {}", entry.type_guid_hex()));
        lines.push(format!(
            "Starting LBA address in hex: 0x{:x}",
            entry.start_lba
        ));
        lines.push(format!("Ending LBA address in hex: 0x{:x}", entry.end_lba));
        lines.push(format!(
            "Starting LBA address in decimal: {}",
            entry.start_lba
        ));
        lines.push(format!("Ending LBA address in decimal: {}", entry.end_lba));
    }
    lines
}
