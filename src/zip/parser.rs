//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. If ZIP64, read the ZIP64 EOCD for large file support
//! 3. Read the Central Directory to get metadata for all files
//! 4. For reading an entry, skip its Local File Header to the data
//!
//! Step 1 and 2 happen when an archive is opened, step 3 whenever the
//! entry index is rebuilt, and step 4 once per served entry.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Low-level ZIP file parser.
///
/// Generic over the reader so tests and other sources can stand in for
/// a local file. Typically used through [`ZipExtractor`](super::ZipExtractor).
pub struct ZipParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// The EOCD is located at the end of the ZIP file, possibly followed
    /// by an archive comment, so this searches backwards for it.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in file).
    ///
    /// # Errors
    ///
    /// Returns an error if no valid EOCD can be found, indicating
    /// the file is not a valid ZIP archive.
    pub async fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64)> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            bail!("Not a valid ZIP file: {} bytes is too short", self.size);
        }

        // Common case first: no archive comment.
        let offset = self.size - eocd_size;
        let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
        self.reader.read_exact_at(offset, &mut buf).await?;
        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
            let eocd = EndOfCentralDirectory::from_bytes(&buf)?;
            return Ok((eocd, offset));
        }

        // Otherwise the comment pushes the record further up.
        let search_size = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_exact_at(search_start, &mut buf).await?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] != EndOfCentralDirectory::SIGNATURE {
                continue;
            }
            // The comment length must account for exactly the bytes that
            // follow, otherwise this is a signature inside the comment.
            let eocd = EndOfCentralDirectory::from_bytes(&buf[i..i + EndOfCentralDirectory::SIZE])?;
            if eocd.comment_len as usize == buf.len() - i - EndOfCentralDirectory::SIZE {
                return Ok((eocd, search_start + i as u64));
            }
        }

        bail!("Not a valid ZIP file")
    }

    /// Read the ZIP64 End of Central Directory record.
    ///
    /// Called when the regular EOCD has saturated 16 or 32 bit fields.
    pub async fn read_zip64_eocd(&self, eocd_offset: u64) -> Result<Zip64EOCD> {
        // The locator sits immediately before the regular EOCD
        let locator_offset = eocd_offset
            .checked_sub(Zip64EOCDLocator::SIZE as u64)
            .context("Invalid ZIP64 format: no room for locator")?;
        let mut locator_buf = vec![0u8; Zip64EOCDLocator::SIZE];
        self.reader
            .read_exact_at(locator_offset, &mut locator_buf)
            .await?;

        let locator = Zip64EOCDLocator::from_bytes(&locator_buf)?;
        if locator.disk_with_eocd64 != 0 || locator.total_disks > 1 {
            bail!("Multi-disk archives are not supported");
        }

        let mut eocd64_buf = vec![0u8; Zip64EOCD::MIN_SIZE];
        self.reader
            .read_exact_at(locator.eocd64_offset, &mut eocd64_buf)
            .await?;

        Zip64EOCD::from_bytes(&eocd64_buf)
    }

    /// Locate the Central Directory.
    ///
    /// This is what "opening" an archive amounts to: a file for which this
    /// fails is not an archive at all.
    pub async fn locate_directory(&self) -> Result<CentralDirectory> {
        let (eocd, eocd_offset) = self.find_eocd().await?;

        let directory = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset).await?;
            CentralDirectory {
                offset: eocd64.cd_offset,
                size: eocd64.cd_size,
                total_entries: eocd64.total_entries,
            }
        } else {
            if eocd.disk_number != 0 || eocd.disk_with_cd != 0 {
                bail!("Multi-disk archives are not supported");
            }
            CentralDirectory {
                offset: eocd.cd_offset as u64,
                size: eocd.cd_size as u64,
                total_entries: eocd.total_entries as u64,
            }
        };

        if directory.offset.saturating_add(directory.size) > self.size {
            bail!("Central Directory extends past end of archive");
        }

        Ok(directory)
    }

    /// List all entries of the Central Directory in on-disk order.
    ///
    /// The directory is read in one go. Any malformed header fails the
    /// whole listing; callers never see a partial result.
    ///
    /// # Arguments
    ///
    /// * `directory` - The location returned by [`locate_directory()`](Self::locate_directory)
    pub async fn list_entries(&self, directory: &CentralDirectory) -> Result<Vec<ArchiveEntry>> {
        if directory.total_entries == 0 {
            return Ok(Vec::new());
        }

        let mut cd_data = vec![0u8; directory.size as usize];
        self.reader
            .read_exact_at(directory.offset, &mut cd_data)
            .await?;

        // A corrupt entry count must not turn into a huge allocation.
        let capacity = directory
            .total_entries
            .min(directory.size / CDFH_MIN_SIZE as u64);
        let mut entries = Vec::with_capacity(capacity as usize);
        let mut cursor = Cursor::new(cd_data.as_slice());

        for n in 0..directory.total_entries {
            let entry = Self::parse_cdfh(&mut cursor)
                .with_context(|| format!("Central Directory entry {}", n))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Parse a Central Directory File Header from a cursor.
    fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ArchiveEntry> {
        let mut sig = [0u8; 4];
        cursor.read_exact(&mut sig)?;
        if sig != CDFH_SIGNATURE {
            bail!("Invalid Central Directory File Header");
        }

        let _version_made_by = cursor.read_u16::<LittleEndian>()?;
        let _version_needed = cursor.read_u16::<LittleEndian>()?;
        let flags = cursor.read_u16::<LittleEndian>()?;
        let compression_method = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
        let crc32 = cursor.read_u32::<LittleEndian>()?;
        let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;
        let file_comment_length = cursor.read_u16::<LittleEndian>()?;
        let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
        let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
        let _external_attrs = cursor.read_u32::<LittleEndian>()?;
        let mut position = cursor.read_u32::<LittleEndian>()? as u64;

        let mut name_bytes = vec![0u8; file_name_length as usize];
        cursor.read_exact(&mut name_bytes)?;
        let name = String::from_utf8_lossy(&name_bytes).into_owned();

        // ZIP64 extended information lives in extra field 0x0001; each
        // value is present only if its header field is saturated.
        let extra_field_end = cursor.position() + extra_field_length as u64;
        if extra_field_end > cursor.get_ref().len() as u64 {
            bail!("Extra field of {} runs past Central Directory", name);
        }

        while cursor.position() + 4 <= extra_field_end {
            let header_id = cursor.read_u16::<LittleEndian>()?;
            let field_size = cursor.read_u16::<LittleEndian>()?;
            let field_end = cursor.position() + field_size as u64;

            if header_id == 0x0001 {
                if uncompressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                    uncompressed_size = cursor.read_u64::<LittleEndian>()?;
                }
                if compressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                    compressed_size = cursor.read_u64::<LittleEndian>()?;
                }
                if position == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                    position = cursor.read_u64::<LittleEndian>()?;
                }
            }
            cursor.set_position(field_end.min(extra_field_end));
        }

        cursor.set_position(extra_field_end + file_comment_length as u64);

        Ok(ArchiveEntry {
            name,
            position,
            compression_method: CompressionMethod::from_u16(compression_method),
            flags,
            crc32,
            compressed_size,
            uncompressed_size,
        })
    }

    /// Get the offset where an entry's data begins.
    ///
    /// The Local File Header repeats the name and carries its own extra
    /// field, which may differ in length from the Central Directory's.
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry from [`list_entries()`](Self::list_entries)
    ///
    /// # Returns
    ///
    /// The byte offset where the compressed file data begins.
    ///
    /// # Errors
    ///
    /// Returns an error if the LFH is invalid.
    pub async fn data_offset(&self, entry: &ArchiveEntry) -> Result<u64> {
        let mut lfh_buf = vec![0u8; LFH_SIZE];
        self.reader.read_exact_at(entry.position, &mut lfh_buf).await?;

        if &lfh_buf[0..4] != LFH_SIGNATURE {
            bail!("Invalid Local File Header for {}", entry.name);
        }

        let mut cursor = Cursor::new(&lfh_buf);
        cursor.set_position(26);

        let file_name_length = cursor.read_u16::<LittleEndian>()? as u64;
        let extra_field_length = cursor.read_u16::<LittleEndian>()? as u64;

        Ok(entry.position + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}
