//! boot_info - boot-sector partition table analyzer
//!
//! Decodes the MBR or GPT partition table of a raw disk image, resolves
//! MBR type codes against an external reference table, probes the last 16
//! bytes of each MBR partition's first sector, and records MD5/SHA-256
//! fingerprints of the whole image for provenance.

mod report;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use std::process;

use bootinfo_digest::{fingerprint_file, write_artifacts};
use bootinfo_tables::gpt::GptTable;
use bootinfo_tables::mbr::{boot_record_tail, MbrTable};
use bootinfo_tables::typedb::PartitionTypeDb;

#[derive(Parser)]
#[command(name = "boot_info")]
#[command(about = "Boot sector partition table analyzer")]
#[command(version)]
struct Cli {
    /// Partition table type to decode
    #[arg(short = 't', long = "type", value_enum)]
    table_type: TableType,

    /// Raw image file to analyze
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Partition type reference table (lines of code,description)
    #[arg(long, default_value = "PartitionTypes.csv")]
    table: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableType {
    Mbr,
    Gpt,
}

fn main() {
    // Argument problems are user errors and exit 1; help/version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut image = File::open(&cli.file)
        .with_context(|| format!("opening image {}", cli.file.display()))?;

    match cli.table_type {
        TableType::Mbr => {
            let table = MbrTable::parse(&mut image)?;
            let typedb =
                PartitionTypeDb::load(&cli.table, PartitionTypeDb::STANDARD_RECORD_COUNT)
                    .with_context(|| format!("loading reference table {}", cli.table.display()))?;

            println!();
            for line in report::mbr_listing(&table, &typedb) {
                println!("{line}");
            }

            for (i, entry) in table.entries().iter().enumerate() {
                let tail = boot_record_tail(&mut image, entry)?;
                println!("Partition number: {}", i + 1);
                println!("Last 16 bytes of boot record: {}", report::hex_dump(&tail));
            }
        }
        TableType::Gpt => {
            let table = GptTable::parse(&mut image)?;
            for line in report::gpt_report(&table) {
                println!("{line}");
            }
        }
    }

    let fingerprint = fingerprint_file(&cli.file)?;
    write_artifacts(&cli.file, &fingerprint)?;
    tracing::info!(
        md5 = %fingerprint.md5,
        sha256 = %fingerprint.sha256,
        "image fingerprinted"
    );

    Ok(())
}
