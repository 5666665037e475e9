use flate2::read::DeflateDecoder;
use std::io::Read;
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Context, Result, anyhow, bail};

use super::parser::ZipParser;
use super::structures::{ArchiveEntry, CentralDirectory, CompressionMethod};

/// An opened ZIP archive.
///
/// Opening locates the Central Directory; listing and reading entries
/// go back to the source each time.
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
    directory: CentralDirectory,
}

impl<R: ReadAt> ZipExtractor<R> {
    /// Open the archive behind `reader`.
    ///
    /// Fails if the source carries no End of Central Directory record.
    pub async fn open(reader: Arc<R>) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let directory = parser.locate_directory().await?;
        Ok(Self { parser, directory })
    }

    pub fn reader(&self) -> &Arc<R> {
        self.parser.reader()
    }

    /// List all entries in Central Directory order
    pub async fn list_entries(&self) -> Result<Vec<ArchiveEntry>> {
        self.parser.list_entries(&self.directory).await
    }

    /// Read the complete, decompressed content of an entry.
    ///
    /// # Arguments
    ///
    /// * `entry` - An entry listed by [`list_entries()`](Self::list_entries)
    ///
    /// # Returns
    ///
    /// Exactly `uncompressed_size` bytes matching the entry's CRC-32.
    ///
    /// # Errors
    ///
    /// Fails for encrypted entries, unknown compression methods, sizes
    /// that do not fit the archive file, short reads and CRC mismatches.
    /// Declared sizes are checked against the file before any buffer is
    /// allocated.
    pub async fn read_entry(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            bail!("{} is encrypted", entry.name);
        }
        if entry.compression_method == CompressionMethod::Stored
            && entry.compressed_size != entry.uncompressed_size
        {
            bail!(
                "Short read on {}: stored {} of {} bytes",
                entry.name,
                entry.compressed_size,
                entry.uncompressed_size
            );
        }

        let data_offset = self.parser.data_offset(entry).await?;
        let data_end = data_offset.checked_add(entry.compressed_size);
        if data_end.is_none_or(|end| end > self.parser.reader().size()) {
            bail!(
                "Data of {} ({} bytes at offset {}) extends past end of archive",
                entry.name,
                entry.compressed_size,
                data_offset
            );
        }

        let mut raw = alloc_buffer(entry.compressed_size)?;
        self.parser
            .reader()
            .read_exact_at(data_offset, &mut raw)
            .await
            .with_context(|| format!("Reading {}", entry.name))?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => inflate(&raw, entry.uncompressed_size)
                .with_context(|| format!("Inflating {}", entry.name))?,
            CompressionMethod::Unknown(method) => {
                bail!("{}: unsupported compression method {}", entry.name, method)
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            bail!(
                "Short read on {}: {} of {} bytes",
                entry.name,
                data.len(),
                entry.uncompressed_size
            );
        }

        let mut crc = flate2::Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            bail!("CRC mismatch on {}", entry.name);
        }

        Ok(data)
    }
}

/// Allocate a zeroed buffer, failing instead of aborting on huge sizes.
fn alloc_buffer(len: u64) -> Result<Vec<u8>> {
    let len = usize::try_from(len)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|err| anyhow!("Cannot allocate {} bytes: {}", len, err))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Largest expansion DEFLATE can achieve.
const MAX_DEFLATE_RATIO: u64 = 1032;

/// Inflate raw DEFLATE data.
///
/// Reads at most one byte beyond `expected` so overlong streams are
/// noticed without decoding them completely.
fn inflate(raw: &[u8], expected: u64) -> Result<Vec<u8>> {
    let reserve = expected.min((raw.len() as u64).saturating_mul(MAX_DEFLATE_RATIO));
    let mut out = Vec::new();
    out.try_reserve_exact(usize::try_from(reserve)?)
        .map_err(|err| anyhow!("Cannot allocate {} bytes: {}", reserve, err))?;
    DeflateDecoder::new(raw)
        .take(expected.saturating_add(1))
        .read_to_end(&mut out)?;
    Ok(out)
}
