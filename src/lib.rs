//! # zipbrowser
//!
//! A loopback HTTP gateway that serves files out of ZIP and MAFF archives.
//!
//! Web views cannot read archives, but they can fetch URLs. The gateway
//! answers URLs of the shape
//!
//! ```text
//! http://127.0.0.1:7766/<archive path>/__FILES/<entry path>
//! ```
//!
//! with the decompressed bytes of that entry, so archived HTML pages load
//! like any other site. A URL ending in `/` serves `index.html` or
//! `index.htm` from that directory. Every failure answers `200 OK` with a
//! small "File not found" page.
//!
//! One archive is kept open at a time, together with a case-insensitive
//! index of its entries. Consecutive requests into the same archive reuse
//! both; a request into another archive replaces them.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zipbrowser::{ArchiveGateway, http};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = http::bind("127.0.0.1:7766".parse()?)?;
//!     let gateway = Arc::new(ArchiveGateway::new());
//!     http::http_listener(listener, gateway, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod gateway;
pub mod http;
pub mod io;
pub mod resolve;
pub mod zip;

pub use archive::{ArchiveIndex, ArchiveSession};
pub use cli::Cli;
pub use gateway::{ArchiveGateway, Reply, NOT_FOUND_BODY};
pub use io::{LocalFileReader, ReadAt};
pub use resolve::{gateway_url, ResolvedRequest};
pub use zip::{ArchiveEntry, ZipExtractor};

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod fixture;
