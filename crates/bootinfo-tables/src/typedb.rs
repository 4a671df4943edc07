//! Partition-type reference table
//!
//! Loads the external two-column source (`code,description`, one record
//! per line) that maps one-byte MBR partition type codes to human-readable
//! names. The table is read once per run and immutable afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bootinfo_core::{Error, Result};

/// One reference record: a type code and its description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    /// Parsed one-byte type code
    pub code: u8,
    /// Two-digit lowercase hex form of the code, normalized regardless of
    /// source casing or padding
    pub code_str: String,
    /// Description with trailing whitespace trimmed
    pub description: String,
}

/// Ordered reference table of partition type records
///
/// Records keep source order; [`lookup`](Self::lookup) takes the first
/// match, so earlier records win when codes duplicate.
#[derive(Debug, Clone)]
pub struct PartitionTypeDb {
    records: Vec<TypeRecord>,
}

impl PartitionTypeDb {
    /// Number of records the standard reference table carries
    pub const STANDARD_RECORD_COUNT: usize = 98;

    /// Load the first `expected` records from a reference table file
    ///
    /// Records beyond `expected` are ignored. The file handle is released
    /// on every exit path.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] when the source cannot be opened or read
    /// - [`Error::TableUnderflow`] when fewer than `expected` records exist
    /// - [`Error::InvalidTableRecord`] when a code is not 1-2 hex digits
    pub fn load(path: &Path, expected: usize) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::with_capacity(expected);
        for (idx, line) in reader.lines().enumerate() {
            if records.len() == expected {
                break;
            }
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(Self::parse_record(idx + 1, &line)?);
        }

        if records.len() < expected {
            return Err(Error::TableUnderflow {
                expected,
                found: records.len(),
            });
        }

        tracing::debug!(records = records.len(), "loaded partition type table");
        Ok(Self { records })
    }

    fn parse_record(line_no: usize, line: &str) -> Result<TypeRecord> {
        let (code_part, description) = line
            .split_once(',')
            .ok_or_else(|| Error::invalid_record(line_no, "missing ',' delimiter"))?;

        let code_part = code_part.trim();
        let code = u8::from_str_radix(code_part, 16)
            .map_err(|_| Error::invalid_record(line_no, format!("bad hex code {code_part:?}")))?;

        Ok(TypeRecord {
            code,
            code_str: format!("{code:02x}"),
            description: description.trim_end().to_string(),
        })
    }

    /// Resolve a type code by linear scan in source order; the first
    /// matching record wins
    pub fn lookup(&self, code: u8) -> Option<&TypeRecord> {
        self.records.iter().find(|r| r.code == code)
    }

    /// All loaded records, in source order
    pub fn records(&self) -> &[TypeRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_and_lookup() {
        let file = write_table(&["01,FAT12", "07,NTFS", "83,Linux"]);
        let db = PartitionTypeDb::load(file.path(), 3).unwrap();

        let record = db.lookup(0x07).unwrap();
        assert_eq!(record.code_str, "07");
        assert_eq!(record.description, "NTFS");
        assert!(db.lookup(0x42).is_none());
    }

    #[test]
    fn test_single_digit_code_is_left_padded() {
        let file = write_table(&["7,NTFS"]);
        let db = PartitionTypeDb::load(file.path(), 1).unwrap();

        let record = db.lookup(0x07).unwrap();
        assert_eq!(record.code, 0x07);
        assert_eq!(record.code_str, "07");
    }

    #[test]
    fn test_code_comparison_is_case_insensitive() {
        let file = write_table(&["0B,FAT32 CHS", "aB,unused label"]);
        let db = PartitionTypeDb::load(file.path(), 2).unwrap();

        assert_eq!(db.lookup(0x0B).unwrap().description, "FAT32 CHS");
        assert_eq!(db.lookup(0xAB).unwrap().description, "unused label");
    }

    #[test]
    fn test_code_str_is_normalized_lowercase() {
        let file = write_table(&["0B,FAT32 CHS", "aB,unused label", "7,NTFS"]);
        let db = PartitionTypeDb::load(file.path(), 3).unwrap();

        assert_eq!(db.lookup(0x0B).unwrap().code_str, "0b");
        assert_eq!(db.lookup(0xAB).unwrap().code_str, "ab");
        assert_eq!(db.lookup(0x07).unwrap().code_str, "07");
    }

    #[test]
    fn test_description_trailing_whitespace_is_trimmed() {
        let file = write_table(&["07,NTFS \t"]);
        let db = PartitionTypeDb::load(file.path(), 1).unwrap();
        assert_eq!(db.lookup(0x07).unwrap().description, "NTFS");
    }

    #[test]
    fn test_first_match_wins_on_duplicate_codes() {
        let file = write_table(&["07,NTFS", "07,exFAT"]);
        let db = PartitionTypeDb::load(file.path(), 2).unwrap();
        assert_eq!(db.lookup(0x07).unwrap().description, "NTFS");
    }

    #[test]
    fn test_extra_trailing_records_are_ignored() {
        let file = write_table(&["01,FAT12", "07,NTFS", "83,Linux"]);
        let db = PartitionTypeDb::load(file.path(), 2).unwrap();

        assert_eq!(db.records().len(), 2);
        assert!(db.lookup(0x83).is_none());
    }

    #[test]
    fn test_underflow_is_fatal() {
        let file = write_table(&["01,FAT12"]);
        let err = PartitionTypeDb::load(file.path(), 98).unwrap_err();

        match err {
            Error::TableUnderflow { expected, found } => {
                assert_eq!(expected, 98);
                assert_eq!(found, 1);
            }
            other => panic!("expected TableUnderflow, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_code_is_fatal() {
        let file = write_table(&["zz,bogus"]);
        let err = PartitionTypeDb::load(file.path(), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidTableRecord { line: 1, .. }));
    }

    #[test]
    fn test_missing_delimiter_is_fatal() {
        let file = write_table(&["07 NTFS"]);
        let err = PartitionTypeDb::load(file.path(), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidTableRecord { .. }));
    }

    #[test]
    fn test_unopenable_source_is_fatal() {
        let err =
            PartitionTypeDb::load(Path::new("/nonexistent/PartitionTypes.csv"), 98).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
