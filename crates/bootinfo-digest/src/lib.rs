//! Whole-image fingerprinting for provenance records
//!
//! Streams an image through incremental MD5 and SHA-256 accumulators and
//! persists each digest to its own artifact file. The digests are a pure
//! function of the file bytes; chunking never affects them.

use md5::{Digest, Md5};
use sha2::Sha256;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bootinfo_core::Result;

/// Chunk size for streaming reads
const CHUNK_SIZE: usize = 64 * 1024;

/// MD5 and SHA-256 digests of one image, as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub md5: String,
    pub sha256: String,
}

/// Stream a reader through both digest accumulators
pub fn fingerprint_reader<R: Read>(reader: &mut R) -> Result<Fingerprint> {
    let mut md5 = Md5::new();
    let mut sha256 = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        md5.update(&buffer[..n]);
        sha256.update(&buffer[..n]);
    }

    Ok(Fingerprint {
        md5: hex::encode(md5.finalize()),
        sha256: hex::encode(sha256.finalize()),
    })
}

/// Fingerprint a file on disk
///
/// # Errors
///
/// An unopenable file is fatal for the whole run.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let mut file = File::open(path)?;
    fingerprint_reader(&mut file)
}

/// Artifact paths for an image: `MD5-<name>.txt` and `SHA-256-<name>.txt`
/// in the image's directory
pub fn artifact_paths(image: &Path) -> (PathBuf, PathBuf) {
    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.display().to_string());
    let dir = image.parent().unwrap_or_else(|| Path::new(""));

    (
        dir.join(format!("MD5-{name}.txt")),
        dir.join(format!("SHA-256-{name}.txt")),
    )
}

/// Persist both digests next to the image
pub fn write_artifacts(image: &Path, fingerprint: &Fingerprint) -> Result<(PathBuf, PathBuf)> {
    let (md5_path, sha256_path) = artifact_paths(image);
    std::fs::write(&md5_path, &fingerprint.md5)?;
    std::fs::write(&sha256_path, &fingerprint.sha256)?;

    tracing::debug!(
        md5 = %md5_path.display(),
        sha256 = %sha256_path.display(),
        "wrote digest artifacts"
    );
    Ok((md5_path, sha256_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_digests() {
        let fp = fingerprint_reader(&mut Cursor::new(Vec::new())).unwrap();

        assert_eq!(fp.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            fp.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_vector() {
        let fp = fingerprint_reader(&mut Cursor::new(b"Hello, World!".to_vec())).unwrap();

        // MD5("Hello, World!") = 65a8e27d8879283831b664bd8b7f0ad4
        assert_eq!(fp.md5, "65a8e27d8879283831b664bd8b7f0ad4");
        // SHA256("Hello, World!") = dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f
        assert_eq!(
            fp.sha256,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_chunking_does_not_affect_digests() {
        // Spans several chunks plus a final partial one
        let data: Vec<u8> = (0u8..=255).cycle().take(3 * CHUNK_SIZE + 1234).collect();

        let streamed = fingerprint_reader(&mut Cursor::new(data.clone())).unwrap();
        let one_shot = Fingerprint {
            md5: hex::encode(Md5::digest(&data)),
            sha256: hex::encode(Sha256::digest(&data)),
        };
        assert_eq!(streamed, one_shot);

        let again = fingerprint_reader(&mut Cursor::new(data)).unwrap();
        assert_eq!(streamed, again);
    }

    #[test]
    fn test_single_byte_flip_changes_both_digests() {
        let data: Vec<u8> = (0u8..=255).cycle().take(CHUNK_SIZE + 77).collect();
        let mut flipped = data.clone();
        flipped[CHUNK_SIZE / 2] ^= 0x01;

        let a = fingerprint_reader(&mut Cursor::new(data)).unwrap();
        let b = fingerprint_reader(&mut Cursor::new(flipped)).unwrap();
        assert_ne!(a.md5, b.md5);
        assert_ne!(a.sha256, b.sha256);
    }

    #[test]
    fn test_artifact_paths_use_file_name() {
        let (md5_path, sha256_path) = artifact_paths(Path::new("/data/images/disk.raw"));
        assert_eq!(md5_path, Path::new("/data/images/MD5-disk.raw.txt"));
        assert_eq!(sha256_path, Path::new("/data/images/SHA-256-disk.raw.txt"));
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("disk.raw");
        std::fs::write(&image, b"sector data").unwrap();

        let fp = fingerprint_file(&image).unwrap();
        let (md5_path, sha256_path) = write_artifacts(&image, &fp).unwrap();

        assert_eq!(md5_path, dir.path().join("MD5-disk.raw.txt"));
        assert_eq!(sha256_path, dir.path().join("SHA-256-disk.raw.txt"));
        assert_eq!(std::fs::read_to_string(&md5_path).unwrap(), fp.md5);
        assert_eq!(std::fs::read_to_string(&sha256_path).unwrap(), fp.sha256);
    }

    #[test]
    fn test_unopenable_image_is_fatal() {
        let err = fingerprint_file(Path::new("/nonexistent/disk.raw")).unwrap_err();
        assert!(matches!(err, bootinfo_core::Error::Io(_)));
    }
}
