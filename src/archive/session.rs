use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};

use super::index::ArchiveIndex;
use crate::io::LocalFileReader;
use crate::zip::{ArchiveEntry, ZipExtractor};

/// The archive currently held open, with its index.
pub struct OpenArchive {
    id: String,
    archive: ZipExtractor<LocalFileReader>,
    index: ArchiveIndex,
}

impl OpenArchive {
    async fn open(id: &str) -> Result<Self> {
        let reader = LocalFileReader::new(Path::new(id))?;
        let archive = ZipExtractor::open(Arc::new(reader))
            .await
            .with_context(|| format!("Cannot read archive {}", id))?;
        let index = ArchiveIndex::rebuild(&archive).await;
        Ok(Self {
            id: id.to_string(),
            archive,
            index,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    /// Read an entry found through this archive's index.
    pub async fn read(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        self.archive.read_entry(entry).await
    }
}

/// Keeps at most one archive open at a time.
///
/// Requests for the archive already held reuse it without any I/O. Any
/// other archive replaces it: the old handle is dropped first, then the
/// new file is opened and indexed. A failed open leaves nothing held, so
/// the next request for the same archive tries again.
#[derive(Default)]
pub struct ArchiveSession {
    current: Option<OpenArchive>,
    opens: u64,
}

impl ArchiveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ensure_open(&mut self, archive_id: &str) -> Result<&OpenArchive> {
        let held = matches!(&self.current, Some(open) if open.id == archive_id);
        if held {
            debug!("Reusing open archive {}", archive_id);
        } else {
            if let Some(old) = self.current.take() {
                debug!("Closing archive {}", old.archive.reader().path().display());
            }
            self.opens += 1;
            let open = OpenArchive::open(archive_id).await?;
            info!(
                "Opened archive {} ({} entries indexed)",
                archive_id,
                open.index.len()
            );
            self.current = Some(open);
        }
        self.current
            .as_ref()
            .context("Archive session holds no archive")
    }

    pub fn current(&self) -> Option<&OpenArchive> {
        self.current.as_ref()
    }

    /// Number of open attempts so far, successful or not.
    pub fn opens(&self) -> u64 {
        self.opens
    }
}
