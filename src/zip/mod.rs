//! ZIP archive reading.
//!
//! This is the archive backend behind the gateway. It reads both plain
//! ZIP archives and MAFF files, which are ZIP archives by another name.
//!
//! ## Architecture
//!
//! - [`structures`]: ZIP format records (EOCD, ZIP64, entries)
//! - [`parser`]: Low-level parsing of those records from a [`ReadAt`] source
//! - [`extractor`]: An opened archive that lists and reads entries
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED and DEFLATE compression methods, with CRC-32 verification
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods
//!
//! [`ReadAt`]: crate::io::ReadAt

mod extractor;
mod parser;
mod structures;

pub use extractor::ZipExtractor;
pub use parser::ZipParser;
pub use structures::*;
