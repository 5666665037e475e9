//! Builds small ZIP archives for tests.
//!
//! Shared between the unit tests (mounted as `crate::fixture`) and the
//! integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::DeflateEncoder;

struct FixtureEntry {
    name: String,
    method: u16,
    data: Vec<u8>,
    crc32: u32,
    uncompressed_size: u32,
}

#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<FixtureEntry>,
    comment: Vec<u8>,
    zip64: bool,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(self, name: &str, data: &[u8]) -> Self {
        self.stored_with_size(name, data, data.len() as u32)
    }

    /// A STORED entry whose headers claim `declared_size` bytes.
    pub fn stored_with_size(mut self, name: &str, data: &[u8], declared_size: u32) -> Self {
        self.entries.push(FixtureEntry {
            name: name.to_string(),
            method: 0,
            data: data.to_vec(),
            crc32: crc32(data),
            uncompressed_size: declared_size,
        });
        self
    }

    pub fn deflated(mut self, name: &str, data: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        self.entries.push(FixtureEntry {
            name: name.to_string(),
            method: 8,
            data: encoder.finish().unwrap(),
            crc32: crc32(data),
            uncompressed_size: data.len() as u32,
        });
        self
    }

    /// A STORED entry with a wrong checksum in its headers.
    pub fn corrupted(mut self, name: &str, data: &[u8]) -> Self {
        self.entries.push(FixtureEntry {
            name: name.to_string(),
            method: 0,
            data: data.to_vec(),
            crc32: !crc32(data),
            uncompressed_size: data.len() as u32,
        });
        self
    }

    /// Write ZIP64 records: saturated Central Directory fields with a
    /// 0x0001 extra field, a ZIP64 EOCD and its locator.
    pub fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut offsets = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            offsets.push(out.len() as u32);
            out.extend_from_slice(b"PK\x03\x04");
            put_u16(&mut out, 20); // version needed
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, entry.method);
            put_u16(&mut out, 0); // mod time
            put_u16(&mut out, 0x21); // mod date, 1980-01-01
            put_u32(&mut out, entry.crc32);
            put_u32(&mut out, entry.data.len() as u32);
            put_u32(&mut out, entry.uncompressed_size);
            put_u16(&mut out, entry.name.len() as u16);
            put_u16(&mut out, 0); // extra field
            out.extend_from_slice(entry.name.as_bytes());
            out.extend_from_slice(&entry.data);
        }

        let cd_offset = out.len() as u32;
        for (entry, offset) in self.entries.iter().zip(&offsets) {
            out.extend_from_slice(b"PK\x01\x02");
            put_u16(&mut out, 20); // version made by
            put_u16(&mut out, 20); // version needed
            put_u16(&mut out, 0); // flags
            put_u16(&mut out, entry.method);
            put_u16(&mut out, 0);
            put_u16(&mut out, 0x21);
            put_u32(&mut out, entry.crc32);
            if self.zip64 {
                put_u32(&mut out, u32::MAX);
                put_u32(&mut out, u32::MAX);
            } else {
                put_u32(&mut out, entry.data.len() as u32);
                put_u32(&mut out, entry.uncompressed_size);
            }
            put_u16(&mut out, entry.name.len() as u16);
            put_u16(&mut out, if self.zip64 { 28 } else { 0 }); // extra field
            put_u16(&mut out, 0); // comment
            put_u16(&mut out, 0); // disk number
            put_u16(&mut out, 0); // internal attributes
            put_u32(&mut out, 0); // external attributes
            put_u32(&mut out, if self.zip64 { u32::MAX } else { *offset });
            out.extend_from_slice(entry.name.as_bytes());
            if self.zip64 {
                put_u16(&mut out, 0x0001);
                put_u16(&mut out, 24);
                put_u64(&mut out, entry.uncompressed_size as u64);
                put_u64(&mut out, entry.data.len() as u64);
                put_u64(&mut out, *offset as u64);
            }
        }
        let cd_size = out.len() as u32 - cd_offset;

        if self.zip64 {
            let eocd64_offset = out.len() as u64;
            out.extend_from_slice(b"PK\x06\x06");
            put_u64(&mut out, 44); // size of the rest of the record
            put_u16(&mut out, 45); // version made by
            put_u16(&mut out, 45); // version needed
            put_u32(&mut out, 0); // disk number
            put_u32(&mut out, 0); // disk with Central Directory
            put_u64(&mut out, self.entries.len() as u64);
            put_u64(&mut out, self.entries.len() as u64);
            put_u64(&mut out, cd_size as u64);
            put_u64(&mut out, cd_offset as u64);

            out.extend_from_slice(b"PK\x06\x07");
            put_u32(&mut out, 0); // disk with ZIP64 EOCD
            put_u64(&mut out, eocd64_offset);
            put_u32(&mut out, 1); // total disks
        }

        let (count, cd_size, cd_offset) = if self.zip64 {
            (u16::MAX, u32::MAX, u32::MAX)
        } else {
            (self.entries.len() as u16, cd_size, cd_offset)
        };
        out.extend_from_slice(b"PK\x05\x06");
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        put_u16(&mut out, count);
        put_u16(&mut out, count);
        put_u32(&mut out, cd_size);
        put_u32(&mut out, cd_offset);
        put_u16(&mut out, self.comment.len() as u16);
        out.extend_from_slice(&self.comment);
        out
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

/// Writes `bytes` into a fresh temporary file.
pub fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// The path of `name` in `dir`, as the string a request would carry.
pub fn archive_id(dir: &Path, name: &str) -> (PathBuf, String) {
    let path = dir.join(name);
    let id = path.to_str().unwrap().to_string();
    (path, id)
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data);
    crc.sum()
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}
