// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{PersistenceError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc64fast::Digest;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalEntryHeader {
    pub recorded_at_ms: i64,
    pub payload_len: u32,
    pub checksum: u64,
}

impl WalEntryHeader {
    pub const SIZE: usize = 8 + 4 + 8; // 20 bytes
    /// Largest payload a frame may carry. Anything above is a garbled header.
    pub const MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let recorded_at_ms = reader.read_i64::<LittleEndian>()?;
        let payload_len = reader.read_u32::<LittleEndian>()?;
        let checksum = reader.read_u64::<LittleEndian>()?;

        Ok(Self {
            recorded_at_ms,
            payload_len,
            checksum,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        // Writes into a Vec cannot fail.
        let _ = buf.write_i64::<LittleEndian>(self.recorded_at_ms);
        let _ = buf.write_u32::<LittleEndian>(self.payload_len);
        let _ = buf.write_u64::<LittleEndian>(self.checksum);
        buf
    }
}

pub struct WalEntry {
    pub header: WalEntryHeader,
    pub payload: Vec<u8>,
}

pub fn entry_checksum(recorded_at_ms: i64, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&recorded_at_ms.to_le_bytes());
    digest.write(&(payload.len() as u32).to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

/// Appends one framed entry and syncs it to disk before returning.
pub fn append_entry(path: impl AsRef<Path>, recorded_at_ms: i64, payload: &[u8]) -> Result<()> {
    let payload_len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= WalEntryHeader::MAX_PAYLOAD_LEN)
        .ok_or_else(|| PersistenceError::InvalidFormat(format!("payload too large: {} bytes", payload.len())))?;

    let header = WalEntryHeader {
        recorded_at_ms,
        payload_len,
        checksum: entry_checksum(recorded_at_ms, payload),
    };

    // One write call per entry so concurrent appenders never interleave inside a frame.
    let mut frame = header.to_bytes();
    frame.extend_from_slice(payload);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(&frame)?;
    file.sync_data()?;

    Ok(())
}

/// Sequential reader over a collection log.
///
/// A frame cut short by a crash (torn tail) ends iteration and is flagged via
/// [`WalReader::torn_tail`]; a complete frame with a bad checksum is an error.
pub struct WalReader {
    reader: BufReader<File>,
    offset: u64,
    torn_tail: bool,
}

impl WalReader {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            offset: 0,
            torn_tail: false,
        })
    }

    /// Bytes consumed by complete frames so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn torn_tail(&self) -> bool {
        self.torn_tail
    }

    fn read_header(&mut self) -> Option<Result<WalEntryHeader>> {
        let mut buf = [0u8; WalEntryHeader::SIZE];
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
        if filled == 0 {
            return None;
        }
        if filled < buf.len() {
            self.torn_tail = true;
            return None;
        }
        Some(WalEntryHeader::read_from(&buf[..]))
    }
}

impl Iterator for WalReader {
    type Item = Result<WalEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.torn_tail {
            return None;
        }

        let header = match self.read_header()? {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        if header.payload_len > WalEntryHeader::MAX_PAYLOAD_LEN {
            return Some(Err(PersistenceError::InvalidFormat(format!(
                "frame at offset {} declares {} payload bytes",
                self.offset, header.payload_len
            ))));
        }

        let mut payload = vec![0u8; header.payload_len as usize];
        if let Err(e) = self.reader.read_exact(&mut payload) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                self.torn_tail = true;
                return None;
            }
            return Some(Err(PersistenceError::IoError(e)));
        }

        // The frame is complete even if its checksum fails.
        self.offset += (WalEntryHeader::SIZE + payload.len()) as u64;

        let found = entry_checksum(header.recorded_at_ms, &payload);
        if found != header.checksum {
            return Some(Err(PersistenceError::ChecksumMismatch {
                expected: header.checksum,
                found,
            }));
        }

        Some(Ok(WalEntry { header, payload }))
    }
}

pub fn read_stream(path: impl AsRef<Path>) -> Result<WalReader> {
    WalReader::new(path)
}

/// Cuts an incomplete trailing frame left by a crash, so the next append
/// starts on a frame boundary. Returns the number of bytes removed.
///
/// Complete frames with a bad checksum are kept; they are reported by readers.
/// A frame whose header is unreadable stops the walk with an error and nothing
/// is truncated.
pub fn truncate_torn_tail(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let mut reader = match read_stream(path) {
        Ok(r) => r,
        Err(PersistenceError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    for entry in reader.by_ref() {
        match entry {
            Ok(_) | Err(PersistenceError::ChecksumMismatch { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    if !reader.torn_tail() {
        return Ok(0);
    }

    let keep = reader.offset();
    let file = OpenOptions::new().write(true).open(path)?;
    let len = file.metadata()?.len();
    file.set_len(keep)?;
    file.sync_all()?;
    Ok(len - keep)
}
