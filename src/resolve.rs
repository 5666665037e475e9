//! Splitting request paths into archive and entry.
//!
//! Gateway URLs have the shape `/<archive path>/__FILES/<entry path>`.
//! Everything before the marker is the filesystem path of the archive,
//! everything after it names an entry inside that archive. A path ending
//! in `/` asks for the default document of that directory.

use std::net::SocketAddr;

use anyhow::{Result, anyhow, bail};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::archive::ArchiveIndex;
use crate::zip::ArchiveEntry;

/// Separates the archive path from the entry path.
pub const MARKER: &str = "/__FILES/";

/// Tried in this order for directory-like requests.
pub const DEFAULT_DOCUMENTS: [&str; 2] = ["index.html", "index.htm"];

/// Archives with this suffix get no default document.
///
/// MAFF archives keep each page in its own top-level folder, so there is
/// no single index to pick. A listing page for them is not implemented.
pub const MULTI_PAGE_SUFFIX: &str = "maff";

/// Characters escaped when an archive path is put into a URL.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A request path split at the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRequest<'a> {
    archive_id: &'a str,
    entry_path: &'a str,
    directory_like: bool,
}

impl<'a> ResolvedRequest<'a> {
    /// Split a decoded request path.
    ///
    /// Fails if the path carries no marker. One stray slash right after
    /// the marker is dropped so `__FILES//page.html` still finds
    /// `page.html`.
    pub fn parse(path: &'a str) -> Result<Self> {
        let start = path
            .find(MARKER)
            .ok_or_else(|| anyhow!("No {} marker in {}", MARKER, path))?;
        let rest = &path[start + MARKER.len()..];
        Ok(Self {
            archive_id: &path[..start],
            entry_path: rest.strip_prefix('/').unwrap_or(rest),
            directory_like: rest.is_empty() || rest.ends_with('/'),
        })
    }

    pub fn archive_id(&self) -> &'a str {
        self.archive_id
    }

    /// The entry path relative to the archive root.
    pub fn entry_path(&self) -> &'a str {
        self.entry_path
    }

    pub fn is_directory_like(&self) -> bool {
        self.directory_like
    }

    /// The entry names to look up, in order of preference.
    pub fn candidates(&self) -> Result<Vec<String>> {
        if !self.directory_like {
            return Ok(vec![self.entry_path.to_string()]);
        }
        if self.archive_id.ends_with(MULTI_PAGE_SUFFIX) {
            bail!(
                "No default document for directory {:?} in multi-page archive {}",
                self.entry_path,
                self.archive_id
            );
        }
        Ok(DEFAULT_DOCUMENTS
            .iter()
            .map(|doc| format!("{}{}", self.entry_path, doc))
            .collect())
    }

    /// Find the entry this request names in `index`.
    pub fn locate<'i>(&self, index: &'i ArchiveIndex) -> Result<&'i ArchiveEntry> {
        let candidates = self.candidates()?;
        candidates
            .iter()
            .find_map(|name| index.lookup(name))
            .ok_or_else(|| anyhow!("{:?} not found in {}", candidates, self.archive_id))
    }
}

/// The URL that opens the default document of `archive_path` through a
/// gateway listening on `addr`.
///
/// `archive_path` should be absolute so the URL path starts with `/`.
pub fn gateway_url(addr: SocketAddr, archive_path: &str) -> String {
    format!(
        "http://{}{}{}",
        addr,
        utf8_percent_encode(archive_path, PATH_ESCAPE),
        MARKER
    )
}
