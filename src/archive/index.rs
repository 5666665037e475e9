use std::collections::HashMap;

use log::warn;

use crate::io::ReadAt;
use crate::zip::{ArchiveEntry, ZipExtractor};

/// Case-insensitive lookup table over all entries of one archive.
///
/// Names are compared ignoring ASCII case only. When two stored names
/// collide, the later one in directory order wins.
#[derive(Debug, Default)]
pub struct ArchiveIndex {
    entries: Vec<ArchiveEntry>,
    by_name: HashMap<String, usize>,
}

impl ArchiveIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ArchiveEntry>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.name.to_ascii_lowercase(), pos))
            .collect();
        Self { entries, by_name }
    }

    /// Build the index from the archive's Central Directory.
    ///
    /// An unreadable directory yields an empty index, so every lookup
    /// against it misses.
    pub async fn rebuild<R: ReadAt>(archive: &ZipExtractor<R>) -> Self {
        match archive.list_entries().await {
            Ok(entries) => Self::from_entries(entries),
            Err(err) => {
                warn!("Cannot index archive, treating it as empty: {:#}", err);
                Self::empty()
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&ArchiveEntry> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
