// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{PersistenceError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use crc64fast::Digest;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub updated_at_ms: i64,
    pub checksum: u64,
}

impl DocumentHeader {
    pub const SIZE: usize = 4 + 4 + 8 + 8; // 24 bytes
    pub const MAGIC: [u8; 4] = *b"AXDC";

    pub fn new(updated_at_ms: i64, body: &[u8]) -> Self {
        Self {
            magic: Self::MAGIC,
            version: 1,
            updated_at_ms,
            checksum: body_checksum(body),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic);
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.updated_at_ms.to_le_bytes());
        buf[16..24].copy_from_slice(&self.checksum.to_le_bytes());
        buf
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != Self::MAGIC {
            return Err(PersistenceError::InvalidMagic);
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != 1 {
            return Err(PersistenceError::InvalidFormat(format!("unsupported document version {}", version)));
        }
        let updated_at_ms = reader.read_i64::<LittleEndian>()?;
        let checksum = reader.read_u64::<LittleEndian>()?;

        Ok(Self {
            magic,
            version,
            updated_at_ms,
            checksum,
        })
    }
}

pub fn body_checksum(body: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(body);
    digest.sum64()
}

/// Replaces the document at `path` atomically: temp file, fsync, rename.
pub fn write_to(path: impl AsRef<Path>, updated_at_ms: i64, body: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&DocumentHeader::new(updated_at_ms, body).to_bytes())?;
        file.write_all(body)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Reads a document and checks its body against the stored checksum.
pub fn read_document(path: impl AsRef<Path>) -> Result<(DocumentHeader, Vec<u8>)> {
    let mut file = File::open(path)?;
    let header = DocumentHeader::read_from(&mut file)?;
    let mut body = Vec::new();
    file.read_to_end(&mut body)?;

    let found = body_checksum(&body);
    if found != header.checksum {
        return Err(PersistenceError::ChecksumMismatch {
            expected: header.checksum,
            found,
        });
    }
    Ok((header, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_document_header_serialization() {
        let header = DocumentHeader::new(1234567890, b"{}");
        let bytes = header.to_bytes();

        let decoded = DocumentHeader::read_from(&bytes[..]).unwrap();

        assert_eq!(header, decoded);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = [0u8; DocumentHeader::SIZE];
        bytes[0..4].copy_from_slice(b"BADM");
        let result = DocumentHeader::read_from(&bytes[..]);
        assert!(matches!(result, Err(PersistenceError::InvalidMagic)));
    }

    #[test]
    fn test_rewrite_replaces_body() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.doc");
        write_to(&path, 1, br#"{"status":"ACTIVE"}"#).unwrap();
        write_to(&path, 2, br#"{"status":"DIVERGENCE_DETECTED"}"#).unwrap();

        let (header, body) = read_document(&path).unwrap();
        assert_eq!(header.updated_at_ms, 2);
        assert_eq!(body, br#"{"status":"DIVERGENCE_DETECTED"}"#);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("core.doc");
        write_to(&path, 1, br#"{"weights":[1,2,3]}"#).unwrap();

        let mut data = std::fs::read(&path).unwrap();
        let idx = DocumentHeader::SIZE + 13;
        data[idx] = b'9';
        std::fs::write(&path, &data).unwrap();

        assert!(matches!(read_document(&path), Err(PersistenceError::ChecksumMismatch { .. })));
    }
}
